//! By-value optional for primitives.
//!
//! Primitive payloads cannot use the null-pointer sentinel, so absence is
//! carried in an explicit tag next to the value.

/// `#[repr(C)]` optional crossing the boundary by value.
///
/// When `is_some` is false, `val` is unspecified and must not be read.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FfiOption<T> {
    pub is_some: bool,
    pub val: T,
}

impl<T> FfiOption<T> {
    pub fn some(val: T) -> Self {
        Self { is_some: true, val }
    }

    pub fn into_option(self) -> Option<T> {
        if self.is_some {
            Some(self.val)
        } else {
            None
        }
    }
}

impl<T: Default> FfiOption<T> {
    pub fn none() -> Self {
        Self {
            is_some: false,
            val: T::default(),
        }
    }
}

impl<T: Default> From<Option<T>> for FfiOption<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(val) => Self::some(val),
            None => Self::none(),
        }
    }
}

impl<T> From<FfiOption<T>> for Option<T> {
    fn from(value: FfiOption<T>) -> Self {
        value.into_option()
    }
}
