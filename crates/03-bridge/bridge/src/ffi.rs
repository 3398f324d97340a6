//! `extern "C"` declarations of the boundary consumed from the core runtime.
//!
//! Pointer returns use null for "absent"; primitive returns use [`FfiOption`].

use std::ffi::c_void;

use bridge_abi::RustStr;

extern "C" {
    #[link_name = "__bridge__$RustString$new"]
    pub(crate) fn rust_string_new() -> *mut c_void;
    #[link_name = "__bridge__$RustString$new_with_str"]
    pub(crate) fn rust_string_new_with_str(text: RustStr) -> *mut c_void;
    #[link_name = "__bridge__$RustString$_free"]
    pub(crate) fn rust_string_free(handle: *mut c_void);
    #[link_name = "__bridge__$RustString$len"]
    pub(crate) fn rust_string_len(handle: *mut c_void) -> usize;
    #[link_name = "__bridge__$RustString$as_str"]
    pub(crate) fn rust_string_as_str(handle: *mut c_void) -> RustStr;
    #[link_name = "__bridge__$RustString$trim"]
    pub(crate) fn rust_string_trim(handle: *mut c_void) -> RustStr;
    #[link_name = "__bridge__$RustString$push_str"]
    pub(crate) fn rust_string_push_str(handle: *mut c_void, text: RustStr);
    #[link_name = "__bridge__$RustString$clear"]
    pub(crate) fn rust_string_clear(handle: *mut c_void);
    #[link_name = "__bridge__$RustString$_partial_eq"]
    pub(crate) fn rust_string_partial_eq(lhs: *mut c_void, rhs: *mut c_void) -> bool;
    #[link_name = "__bridge__$RustString$_hash"]
    pub(crate) fn rust_string_hash(handle: *mut c_void) -> u64;

    #[link_name = "__bridge__$Vec_RustString$new"]
    pub(crate) fn vec_rust_string_new() -> *mut c_void;
    #[link_name = "__bridge__$Vec_RustString$drop"]
    pub(crate) fn vec_rust_string_drop(vec: *mut c_void);
    #[link_name = "__bridge__$Vec_RustString$push"]
    pub(crate) fn vec_rust_string_push(vec: *mut c_void, item: *mut c_void);
    #[link_name = "__bridge__$Vec_RustString$pop"]
    pub(crate) fn vec_rust_string_pop(vec: *mut c_void) -> *mut c_void;
    #[link_name = "__bridge__$Vec_RustString$get"]
    pub(crate) fn vec_rust_string_get(vec: *mut c_void, index: usize) -> *mut c_void;
    #[link_name = "__bridge__$Vec_RustString$get_mut"]
    pub(crate) fn vec_rust_string_get_mut(vec: *mut c_void, index: usize) -> *mut c_void;
    #[link_name = "__bridge__$Vec_RustString$len"]
    pub(crate) fn vec_rust_string_len(vec: *mut c_void) -> usize;
    #[link_name = "__bridge__$Vec_RustString$as_ptr"]
    pub(crate) fn vec_rust_string_as_ptr(vec: *mut c_void) -> *const c_void;
}

macro_rules! primitive_vec_externs {
    ($module:ident, $ty:ident) => {
        pub(crate) mod $module {
            use std::ffi::c_void;

            use bridge_abi::FfiOption;

            extern "C" {
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$new")]
                pub(crate) fn new() -> *mut c_void;
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$drop")]
                pub(crate) fn drop(vec: *mut c_void);
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$push")]
                pub(crate) fn push(vec: *mut c_void, item: $ty);
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$pop")]
                pub(crate) fn pop(vec: *mut c_void) -> FfiOption<$ty>;
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$get")]
                pub(crate) fn get(vec: *mut c_void, index: usize) -> FfiOption<$ty>;
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$get_mut")]
                pub(crate) fn get_mut(vec: *mut c_void, index: usize) -> FfiOption<$ty>;
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$len")]
                pub(crate) fn len(vec: *mut c_void) -> usize;
                #[link_name = concat!("__bridge__$Vec_", stringify!($ty), "$as_ptr")]
                pub(crate) fn as_ptr(vec: *mut c_void) -> *const $ty;
            }
        }
    };
}

primitive_vec_externs!(vec_u8, u8);
primitive_vec_externs!(vec_u16, u16);
primitive_vec_externs!(vec_u32, u32);
primitive_vec_externs!(vec_u64, u64);
primitive_vec_externs!(vec_usize, usize);
primitive_vec_externs!(vec_i8, i8);
primitive_vec_externs!(vec_i16, i16);
primitive_vec_externs!(vec_i32, i32);
primitive_vec_externs!(vec_i64, i64);
primitive_vec_externs!(vec_isize, isize);
primitive_vec_externs!(vec_f32, f32);
primitive_vec_externs!(vec_f64, f64);
primitive_vec_externs!(vec_bool, bool);
