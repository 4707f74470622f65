//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared entirely by their attribute
/// values: two `ItemFulfillment`s with the same counts are the same value,
/// whereas two sales with the same lines are still distinct entities. To
/// "modify" a value object, construct a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
