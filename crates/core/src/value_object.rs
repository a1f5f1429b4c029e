//! Value object trait: equality by value, not identity.
//!
//! Prices, packaging labels and view selections carry no identity of their
//! own; two with the same attributes are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Packaging(String);
///
/// impl ValueObject for Packaging {}
///
/// assert_eq!(Packaging("60 caps".into()), Packaging("60 caps".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
