pub mod date_range;

pub use date_range::DateRange;

/// Implement `From<T>` for a type which already implements `From<&T>`.
#[macro_export]
macro_rules! derive_from_reference {
    ($from_type:ty, $impl_type:ty) => {
        impl From<$from_type> for $impl_type {
            fn from(value: $from_type) -> Self {
                Self::from(&value)
            }
        }
    };
}
