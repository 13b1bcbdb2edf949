//! Entity trait: identity + continuity across refetches.

/// Entity marker + minimal interface.
///
/// Records mirrored from the backend are re-fetched wholesale, so identity is
/// what lets a caller key results by id when overlapping fetches resolve out
/// of order.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
