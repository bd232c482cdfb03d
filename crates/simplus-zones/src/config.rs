//! Zone table parser.
//!
//! A zone table is plain text, one zone per line, six `;`-separated fields:
//!
//! ```text
//! name;obj1,obj2,...;count1,count2,...;radius;f4;f5
//! ```
//!
//! | Field | Action table | Trap table |
//! |---|---|---|
//! | `f4` | success score | bandgap radius |
//! | `f5` | failure score | penalty |
//!
//! Object names and counts are parallel lists.  A base name with count
//! `n > 1` expands to `n` scene names: the bare name followed by
//! `name0 .. name(n-2)`.  Scene objects duplicated in the simulator are named
//! exactly this way, so the expansion must not be "fixed".
//!
//! There is no header row, comment syntax or escaping.  Blank lines are
//! skipped.  Fields past the sixth are ignored.  A repeated zone name
//! replaces the earlier definition in place.
//!
//! # Example
//!
//! ```rust
//! use simplus_zones::config::{parse_zone_table, ZoneKind, ZoneRule};
//!
//! let zones = parse_zone_table("pickup;box;3;0.2;1.0;-0.5", ZoneKind::Action).unwrap();
//! assert_eq!(zones[0].reference_names, vec!["box", "box0", "box1"]);
//! assert_eq!(
//!     zones[0].rule,
//!     ZoneRule::Action { reward_score: 1.0, penalty_score: -0.5 }
//! );
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use simplus_types::SimError;

/// Which scoring engine a table feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Action,
    Trap,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneKind::Action => write!(f, "action"),
            ZoneKind::Trap => write!(f, "trap"),
        }
    }
}

/// Kind-specific scoring parameters of a zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneRule {
    /// Stateless: `reward_score` inside the trigger radius, `penalty_score`
    /// outside.
    Action { reward_score: f64, penalty_score: f64 },
    /// Hysteresis: `penalty` once on entry; rearms after the robot retreats
    /// past `trigger_radius + bandgap_radius`.
    Trap { bandgap_radius: f64, penalty: f64 },
}

impl ZoneRule {
    pub fn kind(&self) -> ZoneKind {
        match self {
            ZoneRule::Action { .. } => ZoneKind::Action,
            ZoneRule::Trap { .. } => ZoneKind::Trap,
        }
    }
}

/// One parsed zone whose reference names are not yet resolved to positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDefinition {
    pub id: String,
    pub reference_names: Vec<String>,
    pub trigger_radius: f64,
    pub rule: ZoneRule,
}

impl ZoneDefinition {
    pub fn kind(&self) -> ZoneKind {
        self.rule.kind()
    }
}

/// Expand parallel base-name/count lists into scene object names.
///
/// `("box", 3)` yields `box, box0, box1`; counts of 1 or less yield only the
/// base name.
pub fn expand_reference_names<S: AsRef<str>>(bases: &[S], counts: &[i64]) -> Vec<String> {
    let mut names = Vec::new();
    for (base, &count) in bases.iter().zip(counts) {
        let base = base.as_ref();
        names.push(base.to_string());
        if count > 1 {
            names.extend((0..count - 1).map(|j| format!("{base}{j}")));
        }
    }
    names
}

/// Parse a whole zone table.  Definitions come back in file order; a
/// repeated id keeps the position of its first occurrence with the contents
/// of its last.
///
/// # Errors
///
/// Returns [`SimError::ConfigParse`] naming the 1-based line and the field
/// for the first malformed line.
pub fn parse_zone_table(text: &str, kind: ZoneKind) -> Result<Vec<ZoneDefinition>, SimError> {
    let mut definitions: Vec<ZoneDefinition> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let def = parse_zone_line(line, idx + 1, kind)?;
        match positions.get(&def.id) {
            Some(&pos) => definitions[pos] = def,
            None => {
                positions.insert(def.id.clone(), definitions.len());
                definitions.push(def);
            }
        }
    }
    Ok(definitions)
}

/// Read and parse a zone table from disk.
pub fn load_zone_table(path: &Path, kind: ZoneKind) -> Result<Vec<ZoneDefinition>, SimError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SimError::Io(format!("failed to read {}: {e}", path.display())))?;
    parse_zone_table(&raw, kind)
}

/// Parse a single table line.  `line_no` is only used for error reporting.
pub fn parse_zone_line(
    line: &str,
    line_no: usize,
    kind: ZoneKind,
) -> Result<ZoneDefinition, SimError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    let (f4_name, f5_name) = match kind {
        ZoneKind::Action => ("success_score", "failure_score"),
        ZoneKind::Trap => ("bandgap", "penalty"),
    };
    let field = |index: usize, name: &'static str| field_at(&fields, index, line_no, name);

    let id = field(0, "name")?;
    if id.is_empty() {
        return Err(parse_error(line_no, "name", "zone name is empty"));
    }

    let bases: Vec<&str> = field(1, "objects")?.split(',').map(str::trim).collect();
    if bases.iter().any(|b| b.is_empty()) {
        return Err(parse_error(line_no, "objects", "empty object name"));
    }

    let counts = field(2, "counts")?
        .split(',')
        .map(|c| {
            c.trim().parse::<i64>().map_err(|e| {
                parse_error(line_no, "counts", &format!("`{}`: {e}", c.trim()))
            })
        })
        .collect::<Result<Vec<i64>, SimError>>()?;
    if counts.len() != bases.len() {
        return Err(parse_error(
            line_no,
            "counts",
            &format!("{} counts for {} objects", counts.len(), bases.len()),
        ));
    }

    let trigger_radius = parse_float(field(3, "radius")?, line_no, "radius")?;
    let f4 = parse_float(field(4, f4_name)?, line_no, f4_name)?;
    let f5 = parse_float(field(5, f5_name)?, line_no, f5_name)?;

    let rule = match kind {
        ZoneKind::Action => ZoneRule::Action {
            reward_score: f4,
            penalty_score: f5,
        },
        ZoneKind::Trap => ZoneRule::Trap {
            bandgap_radius: f4,
            penalty: f5,
        },
    };

    Ok(ZoneDefinition {
        id: id.to_string(),
        reference_names: expand_reference_names(&bases, &counts),
        trigger_radius,
        rule,
    })
}

fn field_at<'a>(
    fields: &[&'a str],
    index: usize,
    line_no: usize,
    name: &str,
) -> Result<&'a str, SimError> {
    fields.get(index).copied().ok_or_else(|| {
        parse_error(line_no, name, &format!("missing field {} of 6", index + 1))
    })
}

fn parse_float(raw: &str, line_no: usize, field: &str) -> Result<f64, SimError> {
    raw.parse::<f64>()
        .map_err(|e| parse_error(line_no, field, &format!("`{raw}`: {e}")))
}

fn parse_error(line: usize, field: &str, details: &str) -> SimError {
    SimError::ConfigParse {
        line,
        field: field.to_string(),
        details: details.to_string(),
    }
}
