//! Non-owning buffer views passed by value across the boundary.
//!
//! A view is valid only while the buffer it describes is alive and not
//! reallocated. Neither side frees memory through a view.

use std::fmt;
use std::ptr::{self, NonNull};

use crate::{AbiError, AbiResult};

/// Contiguous run of `len` elements starting at `start`.
#[repr(C)]
pub struct FfiSlice<T> {
    pub start: *const T,
    pub len: usize,
}

impl<T> Clone for FfiSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FfiSlice<T> {}

impl<T> fmt::Debug for FfiSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfiSlice")
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> FfiSlice<T> {
    /// Builds a view from raw parts, rejecting a null start for a non-empty view.
    pub fn new(start: *const T, len: usize) -> AbiResult<Self> {
        if start.is_null() && len != 0 {
            return Err(AbiError::NullSlice { len });
        }
        Ok(Self { start, len })
    }

    /// Describes an existing Rust slice.
    pub fn from_slice(slice: &[T]) -> Self {
        Self {
            start: slice.as_ptr(),
            len: slice.len(),
        }
    }

    pub fn empty() -> Self {
        Self {
            start: NonNull::dangling().as_ptr(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reinterprets the view as a Rust slice.
    ///
    /// An empty view yields an empty slice even when `start` is null.
    ///
    /// # Safety
    /// `start` must point to `len` initialised elements that stay alive and
    /// unmodified for `'a`.
    pub unsafe fn as_slice<'a>(&self) -> &'a [T] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: non-empty views carry a valid start per the caller contract.
        unsafe { std::slice::from_raw_parts(self.start, self.len) }
    }
}

/// UTF-8 text view handed out by the core runtime.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RustStr {
    pub start: *const u8,
    pub len: usize,
}

impl RustStr {
    /// Borrows a consumer-side string for the duration of one boundary call.
    pub fn borrow_str(text: &str) -> Self {
        Self {
            start: text.as_ptr(),
            len: text.len(),
        }
    }

    pub fn empty() -> Self {
        Self {
            start: ptr::null(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw bytes behind the view.
    ///
    /// # Safety
    /// Same contract as [`FfiSlice::as_slice`].
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: the caller guarantees the view describes live bytes.
        unsafe { std::slice::from_raw_parts(self.start, self.len) }
    }

    /// Checked conversion for views of unknown provenance.
    ///
    /// # Safety
    /// Same contract as [`FfiSlice::as_slice`].
    pub unsafe fn to_str<'a>(&self) -> AbiResult<&'a str> {
        if self.start.is_null() && self.len != 0 {
            return Err(AbiError::NullSlice { len: self.len });
        }
        // SAFETY: forwarded caller contract.
        let bytes = unsafe { self.as_bytes() };
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Conversion for views produced by the core runtime, which only hands out UTF-8.
    ///
    /// # Safety
    /// Same contract as [`FfiSlice::as_slice`], and the bytes must be UTF-8.
    pub unsafe fn to_str_unchecked<'a>(&self) -> &'a str {
        // SAFETY: forwarded caller contract.
        let bytes = unsafe { self.as_bytes() };
        debug_assert!(std::str::from_utf8(bytes).is_ok(), "core runtime returned non-UTF-8 text");
        // SAFETY: the caller guarantees UTF-8.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }
}

impl fmt::Debug for RustStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustStr")
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}
