//! Nearest-target resolution.
//!
//! Distances are Euclidean in 3-D.  The scan is linear and keeps the first
//! minimum, so of two equidistant objects the one listed first wins.

use simplus_types::{Pose3D, ReferenceObject, SimError};

/// Index and distance of the closest reference object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub index: usize,
    pub distance: f64,
}

/// Find the reference object closest to `pose`.
///
/// # Errors
///
/// Returns [`SimError::EmptyZone`] when `objects` is empty.  The error
/// carries no zone id; [`ReferenceSet::new`] is the zone-aware entry point.
///
/// # Example
///
/// ```
/// use simplus_types::{Pose3D, ReferenceObject};
/// use simplus_zones::nearest::nearest;
///
/// let objects = vec![
///     ReferenceObject::new("far", Pose3D::new(5.0, 0.0, 0.0)),
///     ReferenceObject::new("near", Pose3D::new(1.0, 0.0, 0.0)),
/// ];
/// let hit = nearest(&Pose3D::origin(), &objects).unwrap();
/// assert_eq!(hit.index, 1);
/// assert!((hit.distance - 1.0).abs() < 1e-12);
/// ```
pub fn nearest(pose: &Pose3D, objects: &[ReferenceObject]) -> Result<Nearest, SimError> {
    let (head, tail) = objects
        .split_first()
        .ok_or_else(|| SimError::EmptyZone(String::new()))?;
    let (index, _, distance) = closest(pose, head, tail);
    Ok(Nearest { index, distance })
}

fn closest<'a>(
    pose: &Pose3D,
    head: &'a ReferenceObject,
    tail: &'a [ReferenceObject],
) -> (usize, &'a ReferenceObject, f64) {
    let mut best = (0, head, pose.distance_to(&head.position));
    for (i, obj) in tail.iter().enumerate() {
        let d = pose.distance_to(&obj.position);
        // Strict comparison: ties keep the earlier object.
        if d < best.2 {
            best = (i + 1, obj, d);
        }
    }
    best
}

/// A non-empty, ordered set of resolved reference objects.
///
/// Emptiness is rejected at construction, so [`ReferenceSet::nearest`] is
/// total.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    head: ReferenceObject,
    tail: Vec<ReferenceObject>,
}

/// The closest member of a [`ReferenceSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch<'a> {
    pub index: usize,
    pub object: &'a ReferenceObject,
    pub distance: f64,
}

impl ReferenceSet {
    /// Build a set for zone `zone_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyZone`] with `zone_id` when `objects` is empty.
    pub fn new(zone_id: &str, objects: Vec<ReferenceObject>) -> Result<Self, SimError> {
        let mut objects = objects.into_iter();
        let head = objects
            .next()
            .ok_or_else(|| SimError::EmptyZone(zone_id.to_string()))?;
        Ok(Self {
            head,
            tail: objects.collect(),
        })
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceObject> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceObject> {
        match index {
            0 => Some(&self.head),
            i => self.tail.get(i - 1),
        }
    }

    /// Closest member to `pose`, first minimum on ties.
    pub fn nearest(&self, pose: &Pose3D) -> NearestMatch<'_> {
        let (index, object, distance) = closest(pose, &self.head, &self.tail);
        NearestMatch {
            index,
            object,
            distance,
        }
    }
}
