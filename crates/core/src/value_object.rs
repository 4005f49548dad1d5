//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two values with the same attributes are
/// interchangeable. `NumberLocale` is one: two locales with the same separators
/// format and parse identically.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
