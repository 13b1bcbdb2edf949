//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values (a shelf
/// life of 5 days is the same as any other shelf life of 5 days). Entities, in
/// contrast, are compared by identifier.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ShelfLife(u32);
///
/// impl ValueObject for ShelfLife {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
