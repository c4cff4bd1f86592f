//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; two value objects with the same values
//! are considered equal (e.g. two product codes that differ only in case).

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
