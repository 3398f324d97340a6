//! `RustString`: the core runtime's owned text type and its views.

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};

use bridge_abi::{OpaqueHandle, RustStr};

use crate::ffi;
use crate::owned::{OpaqueType, Owned, Ref, RefMut};
use crate::vectorizable::Vectorizable;

/// Owned text living in the core runtime.
pub struct RustString(Owned<RustString>);

/// Read-only view of a `RustString` owned elsewhere.
pub type RustStringRef<'a> = Ref<'a, RustString>;

/// Read-write view of a `RustString` owned elsewhere.
pub type RustStringRefMut<'a> = RefMut<'a, RustString>;

impl OpaqueType for RustString {
    const TYPE_NAME: &'static str = "RustString";

    unsafe fn free(handle: OpaqueHandle) {
        // SAFETY: forwarded trait contract.
        unsafe { ffi::rust_string_free(handle.as_ptr()) }
    }
}

impl RustString {
    pub fn new() -> Self {
        // SAFETY: `RustString$new` returns a fresh, non-null owned handle.
        unsafe { Self::from_raw(OpaqueHandle::from_raw_unchecked(ffi::rust_string_new())) }
    }

    /// Adopts a handle returned by another core-runtime call.
    ///
    /// # Safety
    /// `handle` must be a live, owned `RustString` handle with no other owner.
    pub unsafe fn from_raw(handle: OpaqueHandle) -> Self {
        // SAFETY: forwarded caller contract.
        Self(unsafe { Owned::adopt(handle) })
    }

    /// Releases ownership; the caller becomes responsible for the handle.
    pub fn into_raw(self) -> OpaqueHandle {
        self.0.release_ownership()
    }

    pub fn handle(&self) -> OpaqueHandle {
        self.0.handle()
    }

    pub fn as_string_ref(&self) -> RustStringRef<'_> {
        self.0.borrow()
    }

    pub fn as_string_mut(&mut self) -> RustStringRefMut<'_> {
        self.0.borrow_mut()
    }

    /// Copies the text into a consumer-side `String`.
    pub fn to_owned_string(&self) -> String {
        self.as_str().to_owned()
    }
}

impl Default for RustString {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RustString {
    fn from(text: &str) -> Self {
        // SAFETY: the view borrows `text` for the duration of the call only,
        // and `RustString$new_with_str` returns a fresh, non-null owned handle.
        unsafe {
            let raw = ffi::rust_string_new_with_str(RustStr::borrow_str(text));
            Self::from_raw(OpaqueHandle::from_raw_unchecked(raw))
        }
    }
}

impl<'a> RustStringRef<'a> {
    /// Text with the full lifetime of the view rather than of `&self`.
    pub fn into_str(self) -> &'a str {
        // SAFETY: the view guarantees the string is live and unmutated for 'a,
        // and the core runtime only stores UTF-8.
        unsafe { ffi::rust_string_as_str(self.handle().as_ptr()).to_str_unchecked() }
    }
}

mod private {
    pub trait Sealed {}
}

impl private::Sealed for RustString {}
impl private::Sealed for RustStringRef<'_> {}
impl private::Sealed for RustStringRefMut<'_> {}

/// Read operations shared by `RustString` and both of its views.
pub trait RustStrRead: private::Sealed {
    #[doc(hidden)]
    fn raw_handle(&self) -> *mut c_void;

    fn len(&self) -> usize {
        // SAFETY: sealed implementors only return live string handles.
        unsafe { ffi::rust_string_len(self.raw_handle()) }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw view of the text; valid until the string is mutated or freed.
    fn as_rust_str(&self) -> RustStr {
        // SAFETY: sealed implementors only return live string handles.
        unsafe { ffi::rust_string_as_str(self.raw_handle()) }
    }

    fn as_str(&self) -> &str {
        // SAFETY: mutation needs `&mut` on the owner or a `RefMut`, neither of
        // which can coexist with this borrow; the runtime only stores UTF-8.
        unsafe { self.as_rust_str().to_str_unchecked() }
    }

    fn trim(&self) -> &str {
        // SAFETY: as for `as_str`.
        unsafe { ffi::rust_string_trim(self.raw_handle()).to_str_unchecked() }
    }
}

/// Mutations available on `RustString` and `RustStringRefMut`.
pub trait RustStrWrite: RustStrRead {
    fn push_str(&mut self, text: &str) {
        // SAFETY: `&mut self` excludes any outstanding view of this string,
        // so `text` cannot alias its storage.
        unsafe { ffi::rust_string_push_str(self.raw_handle(), RustStr::borrow_str(text)) }
    }

    fn clear(&mut self) {
        // SAFETY: as for `push_str`.
        unsafe { ffi::rust_string_clear(self.raw_handle()) }
    }
}

impl RustStrRead for RustString {
    fn raw_handle(&self) -> *mut c_void {
        self.handle().as_ptr()
    }
}

impl RustStrRead for RustStringRef<'_> {
    fn raw_handle(&self) -> *mut c_void {
        self.handle().as_ptr()
    }
}

impl RustStrRead for RustStringRefMut<'_> {
    fn raw_handle(&self) -> *mut c_void {
        self.handle().as_ptr()
    }
}

impl RustStrWrite for RustString {}
impl RustStrWrite for RustStringRefMut<'_> {}

fn runtime_eq(lhs: &impl RustStrRead, rhs: &impl RustStrRead) -> bool {
    // SAFETY: both sides are live string handles.
    unsafe { ffi::rust_string_partial_eq(lhs.raw_handle(), rhs.raw_handle()) }
}

fn runtime_hash(value: &impl RustStrRead) -> u64 {
    // SAFETY: live string handle.
    unsafe { ffi::rust_string_hash(value.raw_handle()) }
}

macro_rules! text_traits {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                runtime_eq(self, other)
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                state.write_u64(runtime_hash(self));
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self.as_str(), f)
            }
        }
    };
}

text_traits!(RustString);
text_traits!(RustStringRef<'_>);
text_traits!(RustStringRefMut<'_>);

impl Vectorizable for RustString {
    type Ref<'a> = RustStringRef<'a>;
    type RefMut<'a> = RustStringRefMut<'a>;
    type Elem = c_void;

    fn vec_new() -> OpaqueHandle {
        // SAFETY: `Vec_RustString$new` returns a fresh, non-null handle.
        unsafe { OpaqueHandle::from_raw_unchecked(ffi::vec_rust_string_new()) }
    }

    unsafe fn vec_free(vec: OpaqueHandle) {
        // SAFETY: forwarded trait contract.
        unsafe { ffi::vec_rust_string_drop(vec.as_ptr()) }
    }

    unsafe fn vec_push(vec: OpaqueHandle, value: Self) {
        // Ownership is released and handed to the vector in one step.
        // SAFETY: forwarded trait contract; `value` is owned and now released.
        unsafe { ffi::vec_rust_string_push(vec.as_ptr(), value.into_raw().as_ptr()) }
    }

    unsafe fn vec_pop(vec: OpaqueHandle) -> Option<Self> {
        // SAFETY: forwarded trait contract; a non-null pop result is a fresh owned handle.
        unsafe {
            OpaqueHandle::from_raw(ffi::vec_rust_string_pop(vec.as_ptr()))
                .map(|handle| Self::from_raw(handle))
        }
    }

    unsafe fn vec_get<'a>(vec: OpaqueHandle, index: usize) -> Option<Self::Ref<'a>> {
        // SAFETY: forwarded trait contract; the element lives as long as the vector.
        unsafe {
            OpaqueHandle::from_raw(ffi::vec_rust_string_get(vec.as_ptr(), index))
                .map(|handle| Ref::from_handle(handle))
        }
    }

    unsafe fn vec_get_mut<'a>(vec: OpaqueHandle, index: usize) -> Option<Self::RefMut<'a>> {
        // SAFETY: forwarded trait contract.
        unsafe {
            OpaqueHandle::from_raw(ffi::vec_rust_string_get_mut(vec.as_ptr(), index))
                .map(|handle| RefMut::from_handle(handle))
        }
    }

    unsafe fn vec_as_ptr(vec: OpaqueHandle) -> *const c_void {
        // SAFETY: forwarded trait contract.
        unsafe { ffi::vec_rust_string_as_ptr(vec.as_ptr()) }
    }

    unsafe fn vec_len(vec: OpaqueHandle) -> usize {
        // SAFETY: forwarded trait contract.
        unsafe { ffi::vec_rust_string_len(vec.as_ptr()) }
    }
}
