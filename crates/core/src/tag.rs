//! Trace classification and timeline records.

use crate::{SimTime, ThreadIndex};
use serde::{Deserialize, Serialize};

/// Trace classification of a timeline slice.
///
/// Tag `0` is reserved for idle gaps. Workloads define their own tags from
/// `1` upward and register a display name for each with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(pub u32);

impl TypeTag {
    /// Idle gap between two pieces of work.
    pub const NULL: TypeTag = TypeTag(0);

    /// Create a new type tag.
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Get the raw tag value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Whether this tag marks an idle gap.
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type-{}", self.0)
    }
}

/// One recorded segment of a thread's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// Length of the segment in simulated ticks.
    pub duration: SimTime,
    /// What the thread was doing; [`TypeTag::NULL`] for idle.
    pub type_tag: TypeTag,
}

impl Slice {
    /// Create a new slice.
    pub fn new(duration: SimTime, type_tag: TypeTag) -> Self {
        Self { duration, type_tag }
    }

    /// An idle gap of the given length.
    pub fn idle(duration: SimTime) -> Self {
        Self::new(duration, TypeTag::NULL)
    }

    /// Whether this slice is an idle gap.
    pub fn is_idle(&self) -> bool {
        self.type_tag.is_null()
    }
}

/// A request from a workload to run `work` on `thread`.
///
/// Returned from [`Workload::complete`](crate::Workload::complete); the
/// scheduler applies dispatches in the order they were returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<W> {
    /// Thread slot the work runs on.
    pub thread: ThreadIndex,
    /// The work to run.
    pub work: W,
}

impl<W> Dispatch<W> {
    /// Create a new dispatch request.
    pub fn new(thread: ThreadIndex, work: W) -> Self {
        Self { thread, work }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_tag_is_idle() {
        assert!(TypeTag::NULL.is_null());
        assert!(!TypeTag::new(3).is_null());
        assert!(Slice::idle(2.0).is_idle());
        assert!(!Slice::new(2.0, TypeTag::new(1)).is_idle());
    }

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::new(2).to_string(), "type-2");
    }

    #[test]
    fn test_slice_serializes_tag_as_number() {
        let json = serde_json::to_string(&Slice::new(4.0, TypeTag::new(2))).unwrap();
        assert_eq!(json, r#"{"duration":4.0,"type_tag":2}"#);
    }
}
