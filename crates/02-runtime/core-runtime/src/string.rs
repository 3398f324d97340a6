//! `RustString` boundary functions.
//!
//! An owned handle is a `Box<String>` cast to `void*`. A borrowed handle (from
//! `Vec_RustString$get`) points at a `String` stored inside a vector; the same
//! read and mutate functions accept both kinds.

use std::collections::hash_map::DefaultHasher;
use std::ffi::c_void;
use std::hash::{Hash, Hasher};

use bridge_abi::RustStr;

use crate::ledger::{self, LedgerEvent};
use crate::trace_call;

/// Boxes a string into a fresh owned handle.
pub(crate) fn into_handle(value: String) -> *mut c_void {
    ledger::record(LedgerEvent::StringAlloc);
    Box::into_raw(Box::new(value)).cast()
}

/// Reclaims the string behind an owned handle.
///
/// # Safety
/// `handle` must come from [`into_handle`] and not have been reclaimed yet.
pub(crate) unsafe fn take_handle(handle: *mut c_void) -> String {
    // SAFETY: caller contract; the box was produced by `into_handle`.
    *unsafe { Box::from_raw(handle.cast::<String>()) }
}

unsafe fn borrow<'a>(handle: *mut c_void) -> &'a String {
    // SAFETY: callers pass a live owned or borrowed string handle.
    unsafe { &*handle.cast::<String>() }
}

unsafe fn borrow_mut<'a>(handle: *mut c_void) -> &'a mut String {
    // SAFETY: callers pass a live handle with no other active borrow.
    unsafe { &mut *handle.cast::<String>() }
}

/// # Safety
/// `text` must describe live UTF-8 bytes for the duration of the call.
unsafe fn read_view<'a>(text: RustStr) -> &'a str {
    // SAFETY: forwarded caller contract.
    unsafe { text.to_str_unchecked() }
}

#[export_name = "__bridge__$RustString$new"]
pub extern "C" fn new() -> *mut c_void {
    trace_call("RustString$new");
    into_handle(String::new())
}

/// # Safety
/// `text` must describe live UTF-8 bytes.
#[export_name = "__bridge__$RustString$new_with_str"]
pub unsafe extern "C" fn new_with_str(text: RustStr) -> *mut c_void {
    trace_call("RustString$new_with_str");
    // SAFETY: caller contract.
    into_handle(unsafe { read_view(text) }.to_owned())
}

/// # Safety
/// `handle` must be an owned handle that has not been freed or transferred.
#[export_name = "__bridge__$RustString$_free"]
pub unsafe extern "C" fn free(handle: *mut c_void) {
    trace_call("RustString$_free");
    ledger::record(LedgerEvent::StringFree);
    // SAFETY: caller contract.
    drop(unsafe { take_handle(handle) });
}

/// # Safety
/// `handle` must be a live owned or borrowed handle.
#[export_name = "__bridge__$RustString$len"]
pub unsafe extern "C" fn len(handle: *mut c_void) -> usize {
    trace_call("RustString$len");
    // SAFETY: caller contract.
    unsafe { borrow(handle) }.len()
}

/// # Safety
/// `handle` must be a live owned or borrowed handle. The returned view is
/// valid until the string is mutated or freed.
#[export_name = "__bridge__$RustString$as_str"]
pub unsafe extern "C" fn as_str(handle: *mut c_void) -> RustStr {
    trace_call("RustString$as_str");
    // SAFETY: caller contract.
    RustStr::borrow_str(unsafe { borrow(handle) }.as_str())
}

/// # Safety
/// Same as [`as_str`].
#[export_name = "__bridge__$RustString$trim"]
pub unsafe extern "C" fn trim(handle: *mut c_void) -> RustStr {
    trace_call("RustString$trim");
    // SAFETY: caller contract.
    RustStr::borrow_str(unsafe { borrow(handle) }.trim())
}

/// # Safety
/// `handle` must be a live handle with no outstanding views; `text` must
/// describe live UTF-8 bytes that do not alias the string's own storage.
#[export_name = "__bridge__$RustString$push_str"]
pub unsafe extern "C" fn push_str(handle: *mut c_void, text: RustStr) {
    trace_call("RustString$push_str");
    // SAFETY: caller contract.
    let text = unsafe { read_view(text) };
    // SAFETY: caller contract.
    unsafe { borrow_mut(handle) }.push_str(text);
}

/// # Safety
/// `handle` must be a live handle with no outstanding views.
#[export_name = "__bridge__$RustString$clear"]
pub unsafe extern "C" fn clear(handle: *mut c_void) {
    trace_call("RustString$clear");
    // SAFETY: caller contract.
    unsafe { borrow_mut(handle) }.clear();
}

/// # Safety
/// Both handles must be live owned or borrowed handles.
#[export_name = "__bridge__$RustString$_partial_eq"]
pub unsafe extern "C" fn partial_eq(lhs: *mut c_void, rhs: *mut c_void) -> bool {
    trace_call("RustString$_partial_eq");
    // SAFETY: caller contract.
    unsafe { borrow(lhs) == borrow(rhs) }
}

/// Stable within a process: the hasher is unkeyed.
///
/// # Safety
/// `handle` must be a live owned or borrowed handle.
#[export_name = "__bridge__$RustString$_hash"]
pub unsafe extern "C" fn hash(handle: *mut c_void) -> u64 {
    trace_call("RustString$_hash");
    let mut hasher = DefaultHasher::new();
    // SAFETY: caller contract.
    unsafe { borrow(handle) }.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger;

    fn text(handle: *mut c_void) -> &'static str {
        unsafe { as_str(handle).to_str_unchecked() }
    }

    #[test]
    fn owned_string_lifecycle() {
        ledger::reset();
        let handle = unsafe { new_with_str(RustStr::borrow_str("  padded ")) };
        assert_eq!(unsafe { len(handle) }, 9);
        assert_eq!(text(handle), "  padded ");
        assert_eq!(unsafe { trim(handle).to_str_unchecked() }, "padded");

        unsafe { push_str(handle, RustStr::borrow_str("tail")) };
        assert_eq!(text(handle), "  padded tail");

        unsafe { clear(handle) };
        assert_eq!(unsafe { len(handle) }, 0);

        unsafe { free(handle) };
        let snap = ledger::snapshot();
        assert_eq!(snap.string_allocs, 1);
        assert_eq!(snap.string_frees, 1);
        assert_eq!(snap.live_strings(), 0);
    }

    #[test]
    fn empty_view_builds_empty_string() {
        let handle = unsafe { new_with_str(RustStr::empty()) };
        assert_eq!(unsafe { len(handle) }, 0);
        unsafe { free(handle) };

        let fresh = new();
        assert_eq!(text(fresh), "");
        unsafe { free(fresh) };
    }

    #[test]
    fn equality_and_hash_follow_contents() {
        let a = unsafe { new_with_str(RustStr::borrow_str("same")) };
        let b = unsafe { new_with_str(RustStr::borrow_str("same")) };
        let c = unsafe { new_with_str(RustStr::borrow_str("other")) };

        assert!(unsafe { partial_eq(a, b) });
        assert!(!unsafe { partial_eq(a, c) });
        assert_eq!(unsafe { hash(a) }, unsafe { hash(b) });

        for handle in [a, b, c] {
            unsafe { free(handle) };
        }
    }
}
