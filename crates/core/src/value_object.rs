//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**; two values with the same attributes
/// are interchangeable. A category or an expiration window is a value object;
/// an inventory item, keyed by its id, is not.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct ExpirationWindow(u32);
///
/// impl ValueObject for ExpirationWindow {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
