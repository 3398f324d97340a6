//! `Vectorizable` for the primitive element types.
//!
//! Primitives cross the boundary by value, so `get` and `get_mut` both lend
//! out a copy of the element rather than a view.

use std::ffi::c_void;

use bridge_abi::{OpaqueHandle, Primitive};

use crate::ffi;
use crate::vectorizable::Vectorizable;

mod private {
    pub trait Sealed {}
}

/// A primitive whose vectors store elements inline, so their storage can be
/// viewed as a plain slice.
pub trait BridgedPrimitive: Vectorizable<Elem = Self> + Copy + private::Sealed {
    const KIND: Primitive;
}

macro_rules! bridged_primitive {
    ($module:ident, $ty:ident, $kind:ident) => {
        impl private::Sealed for $ty {}

        impl BridgedPrimitive for $ty {
            const KIND: Primitive = Primitive::$kind;
        }

        impl Vectorizable for $ty {
            type Ref<'a> = $ty;
            type RefMut<'a> = $ty;
            type Elem = $ty;

            fn vec_new() -> OpaqueHandle {
                // SAFETY: the constructor returns a fresh, non-null handle.
                unsafe { OpaqueHandle::from_raw_unchecked(ffi::$module::new()) }
            }

            unsafe fn vec_free(vec: OpaqueHandle) {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::drop(vec.as_ptr()) }
            }

            unsafe fn vec_push(vec: OpaqueHandle, value: Self) {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::push(vec.as_ptr(), value) }
            }

            unsafe fn vec_pop(vec: OpaqueHandle) -> Option<Self> {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::pop(vec.as_ptr()) }.into_option()
            }

            unsafe fn vec_get<'a>(vec: OpaqueHandle, index: usize) -> Option<Self::Ref<'a>> {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::get(vec.as_ptr(), index) }.into_option()
            }

            unsafe fn vec_get_mut<'a>(
                vec: OpaqueHandle,
                index: usize,
            ) -> Option<Self::RefMut<'a>> {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::get_mut(vec.as_ptr(), index) }.into_option()
            }

            unsafe fn vec_as_ptr(vec: OpaqueHandle) -> *const c_void {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::as_ptr(vec.as_ptr()) }.cast()
            }

            unsafe fn vec_len(vec: OpaqueHandle) -> usize {
                // SAFETY: forwarded trait contract.
                unsafe { ffi::$module::len(vec.as_ptr()) }
            }
        }
    };
}

bridged_primitive!(vec_u8, u8, U8);
bridged_primitive!(vec_u16, u16, U16);
bridged_primitive!(vec_u32, u32, U32);
bridged_primitive!(vec_u64, u64, U64);
bridged_primitive!(vec_usize, usize, Usize);
bridged_primitive!(vec_i8, i8, I8);
bridged_primitive!(vec_i16, i16, I16);
bridged_primitive!(vec_i32, i32, I32);
bridged_primitive!(vec_i64, i64, I64);
bridged_primitive!(vec_isize, isize, Isize);
bridged_primitive!(vec_f32, f32, F32);
bridged_primitive!(vec_f64, f64, F64);
bridged_primitive!(vec_bool, bool, Bool);
