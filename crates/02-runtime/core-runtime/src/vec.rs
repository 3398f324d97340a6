//! Vector boundary functions.
//!
//! A vector handle is a `Box<Vec<T>>` cast to `void*`. Opaque elements
//! (`Vec_RustString`) move in and out as owned handles and are lent out as
//! pointers into the vector's storage; primitive elements cross by value with
//! [`FfiOption`] marking absence.

use std::ffi::c_void;
use std::ptr;

use bridge_abi::FfiOption;

use crate::config::vec_capacity_hint;
use crate::ledger::{self, LedgerEvent};
use crate::string::{into_handle, take_handle};
use crate::trace_call;

pub(crate) fn alloc_vec<T>() -> *mut c_void {
    let capacity = vec_capacity_hint();
    ledger::record(LedgerEvent::VecAlloc);
    let handle: *mut c_void = Box::into_raw(Box::new(Vec::<T>::with_capacity(capacity))).cast();
    log::debug!(
        "allocated Vec<{}> {handle:p} (capacity {capacity})",
        std::any::type_name::<T>()
    );
    handle
}

/// # Safety
/// `handle` must come from [`alloc_vec::<T>`] and not have been freed.
pub(crate) unsafe fn free_vec<T>(handle: *mut c_void, owned_elements: bool) {
    // SAFETY: caller contract.
    let vec = unsafe { Box::from_raw(handle.cast::<Vec<T>>()) };
    let elements = if owned_elements { vec.len() as u64 } else { 0 };
    log::debug!(
        "dropping Vec<{}> {handle:p} with {} elements",
        std::any::type_name::<T>(),
        vec.len()
    );
    drop(vec);
    ledger::record(LedgerEvent::VecFree { elements });
}

pub(crate) unsafe fn vec_ref<'a, T>(handle: *mut c_void) -> &'a Vec<T> {
    // SAFETY: callers pass a live vector handle of element type `T`.
    unsafe { &*handle.cast::<Vec<T>>() }
}

pub(crate) unsafe fn vec_mut<'a, T>(handle: *mut c_void) -> &'a mut Vec<T> {
    // SAFETY: callers pass a live vector handle with no other active borrow.
    unsafe { &mut *handle.cast::<Vec<T>>() }
}

#[export_name = "__bridge__$Vec_RustString$new"]
pub extern "C" fn string_vec_new() -> *mut c_void {
    trace_call("Vec_RustString$new");
    alloc_vec::<String>()
}

/// Frees the vector and every string it still owns.
///
/// # Safety
/// `vec` must be a live owned vector handle.
#[export_name = "__bridge__$Vec_RustString$drop"]
pub unsafe extern "C" fn string_vec_drop(vec: *mut c_void) {
    trace_call("Vec_RustString$drop");
    // SAFETY: caller contract.
    unsafe { free_vec::<String>(vec, true) };
}

/// Moves the string behind `item` into the vector; `item` is consumed.
///
/// # Safety
/// `vec` must be live; `item` must be an owned string handle whose owner has
/// released it.
#[export_name = "__bridge__$Vec_RustString$push"]
pub unsafe extern "C" fn string_vec_push(vec: *mut c_void, item: *mut c_void) {
    trace_call("Vec_RustString$push");
    // SAFETY: caller contract.
    let value = unsafe { take_handle(item) };
    ledger::record(LedgerEvent::StringTransfer);
    // SAFETY: caller contract.
    unsafe { vec_mut::<String>(vec) }.push(value);
}

/// Returns a fresh owned handle for the last element, or null when empty.
///
/// # Safety
/// `vec` must be live.
#[export_name = "__bridge__$Vec_RustString$pop"]
pub unsafe extern "C" fn string_vec_pop(vec: *mut c_void) -> *mut c_void {
    trace_call("Vec_RustString$pop");
    // SAFETY: caller contract.
    match unsafe { vec_mut::<String>(vec) }.pop() {
        Some(value) => into_handle(value),
        None => ptr::null_mut(),
    }
}

/// Borrowed handle to element `index`, or null when out of range.
///
/// # Safety
/// `vec` must be live. The result is valid until the vector is mutated.
#[export_name = "__bridge__$Vec_RustString$get"]
pub unsafe extern "C" fn string_vec_get(vec: *mut c_void, index: usize) -> *mut c_void {
    trace_call("Vec_RustString$get");
    // SAFETY: caller contract.
    match unsafe { vec_ref::<String>(vec) }.get(index) {
        Some(value) => (value as *const String).cast_mut().cast(),
        None => ptr::null_mut(),
    }
}

/// Mutable borrowed handle to element `index`, or null when out of range.
///
/// # Safety
/// As [`string_vec_get`], and no other view of the element may be in use.
#[export_name = "__bridge__$Vec_RustString$get_mut"]
pub unsafe extern "C" fn string_vec_get_mut(vec: *mut c_void, index: usize) -> *mut c_void {
    trace_call("Vec_RustString$get_mut");
    // SAFETY: caller contract.
    match unsafe { vec_mut::<String>(vec) }.get_mut(index) {
        Some(value) => (value as *mut String).cast(),
        None => ptr::null_mut(),
    }
}

/// # Safety
/// `vec` must be live.
#[export_name = "__bridge__$Vec_RustString$len"]
pub unsafe extern "C" fn string_vec_len(vec: *mut c_void) -> usize {
    trace_call("Vec_RustString$len");
    // SAFETY: caller contract.
    unsafe { vec_ref::<String>(vec) }.len()
}

/// Start of the element storage; valid until the vector reallocates.
///
/// # Safety
/// `vec` must be live.
#[export_name = "__bridge__$Vec_RustString$as_ptr"]
pub unsafe extern "C" fn string_vec_as_ptr(vec: *mut c_void) -> *const c_void {
    trace_call("Vec_RustString$as_ptr");
    // SAFETY: caller contract.
    unsafe { vec_ref::<String>(vec) }.as_ptr().cast()
}

/// Exports the by-value vector ABI for one primitive type inside module `$module`.
macro_rules! primitive_vec_abi {
    ($module:ident, $ty:ident) => {
        pub mod $module {
            use super::*;

            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$new")]
            pub extern "C" fn new() -> *mut c_void {
                trace_call(concat!("Vec_", stringify!($ty), "$new"));
                alloc_vec::<$ty>()
            }

            /// # Safety
            /// `vec` must be a live owned vector handle.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$drop")]
            pub unsafe extern "C" fn drop(vec: *mut c_void) {
                trace_call(concat!("Vec_", stringify!($ty), "$drop"));
                // SAFETY: caller contract.
                unsafe { free_vec::<$ty>(vec, false) };
            }

            /// # Safety
            /// `vec` must be live.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$push")]
            pub unsafe extern "C" fn push(vec: *mut c_void, item: $ty) {
                trace_call(concat!("Vec_", stringify!($ty), "$push"));
                // SAFETY: caller contract.
                unsafe { vec_mut::<$ty>(vec) }.push(item);
            }

            /// # Safety
            /// `vec` must be live.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$pop")]
            pub unsafe extern "C" fn pop(vec: *mut c_void) -> FfiOption<$ty> {
                trace_call(concat!("Vec_", stringify!($ty), "$pop"));
                // SAFETY: caller contract.
                unsafe { vec_mut::<$ty>(vec) }.pop().into()
            }

            /// # Safety
            /// `vec` must be live.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$get")]
            pub unsafe extern "C" fn get(vec: *mut c_void, index: usize) -> FfiOption<$ty> {
                trace_call(concat!("Vec_", stringify!($ty), "$get"));
                // SAFETY: caller contract.
                unsafe { vec_ref::<$ty>(vec) }.get(index).copied().into()
            }

            /// # Safety
            /// `vec` must be live.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$get_mut")]
            pub unsafe extern "C" fn get_mut(vec: *mut c_void, index: usize) -> FfiOption<$ty> {
                trace_call(concat!("Vec_", stringify!($ty), "$get_mut"));
                // SAFETY: caller contract.
                unsafe { vec_mut::<$ty>(vec) }.get_mut(index).copied().into()
            }

            /// # Safety
            /// `vec` must be live.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$len")]
            pub unsafe extern "C" fn len(vec: *mut c_void) -> usize {
                trace_call(concat!("Vec_", stringify!($ty), "$len"));
                // SAFETY: caller contract.
                unsafe { vec_ref::<$ty>(vec) }.len()
            }

            /// # Safety
            /// `vec` must be live; the pointer is valid until the vector reallocates.
            #[export_name = concat!("__bridge__$Vec_", stringify!($ty), "$as_ptr")]
            pub unsafe extern "C" fn as_ptr(vec: *mut c_void) -> *const $ty {
                trace_call(concat!("Vec_", stringify!($ty), "$as_ptr"));
                // SAFETY: caller contract.
                unsafe { vec_ref::<$ty>(vec) }.as_ptr()
            }
        }
    };
}

primitive_vec_abi!(vec_u8, u8);
primitive_vec_abi!(vec_u16, u16);
primitive_vec_abi!(vec_u32, u32);
primitive_vec_abi!(vec_u64, u64);
primitive_vec_abi!(vec_usize, usize);
primitive_vec_abi!(vec_i8, i8);
primitive_vec_abi!(vec_i16, i16);
primitive_vec_abi!(vec_i32, i32);
primitive_vec_abi!(vec_i64, i64);
primitive_vec_abi!(vec_isize, isize);
primitive_vec_abi!(vec_f32, f32);
primitive_vec_abi!(vec_f64, f64);
primitive_vec_abi!(vec_bool, bool);
