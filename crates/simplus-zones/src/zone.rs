//! [`ZoneGeometry`] – the static, resolved shape shared by every zone kind.

use simplus_types::Pose3D;

use crate::nearest::{NearestMatch, ReferenceSet};

/// A circular (spherical, in 3-D) region of interest around one or more
/// reference objects.  Positions are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGeometry {
    pub id: String,
    pub references: ReferenceSet,
    /// Inclusive trigger radius in metres.
    pub trigger_radius: f64,
}

impl ZoneGeometry {
    pub fn new(id: impl Into<String>, references: ReferenceSet, trigger_radius: f64) -> Self {
        Self {
            id: id.into(),
            references,
            trigger_radius,
        }
    }

    pub fn nearest(&self, pose: &Pose3D) -> NearestMatch<'_> {
        self.references.nearest(pose)
    }
}
