//! `simplus-zones` – proximity zone scoring
//!
//! Scores a robot pose against named zones anchored on simulation objects.
//!
//! # Modules
//!
//! - [`config`] – parser for the `;`-separated zone tables, including the
//!   instance-name expansion used by the simulator scenes.
//! - [`registry`] – [`ZoneRegistry`][registry::ZoneRegistry]: resolves
//!   reference names to positions once, through an injected
//!   [`WorldQuery`][simplus_hal::WorldQuery].
//! - [`nearest`] – nearest-target resolution with first-minimum tie-breaking.
//! - [`zone`] – [`ZoneGeometry`][zone::ZoneGeometry], the resolved shape.
//! - [`action`] – [`ActionZone`][action::ActionZone]: stateless reward or
//!   penalty on every evaluation.
//! - [`trap`] – [`TrapZone`][trap::TrapZone]: hysteresis penalty that fires
//!   once on entry and rearms after a full retreat.
//! - [`table`] – [`ZoneTable`][table::ZoneTable]: zones keyed by id, with
//!   action lookup and trap sweeps.
//!
//! Every fallible operation happens while loading.  Once a table is built,
//! evaluation cannot fail.

pub mod action;
pub mod config;
pub mod nearest;
pub mod registry;
pub mod table;
pub mod trap;
pub mod zone;

pub use action::ActionZone;
pub use config::{ZoneDefinition, ZoneKind, ZoneRule, load_zone_table, parse_zone_table};
pub use nearest::{Nearest, ReferenceSet, nearest};
pub use registry::ZoneRegistry;
pub use table::{TrapSweep, Zone, ZoneTable};
pub use trap::{TrapState, TrapZone};
pub use zone::ZoneGeometry;
