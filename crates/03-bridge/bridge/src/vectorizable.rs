use std::ffi::c_void;

use bridge_abi::OpaqueHandle;

/// Per-element table of vector boundary operations.
///
/// One [`RustVec`](crate::RustVec) implementation serves every element type
/// through this trait: opaque composites hand out [`Ref`](crate::Ref) /
/// [`RefMut`](crate::RefMut) views, primitives hand out plain values.
///
/// Every function taking a `vec` handle requires it to be a live vector of
/// `Self` created by [`Vectorizable::vec_new`].
pub trait Vectorizable: Sized {
    /// What `get` lends out.
    type Ref<'a>;
    /// What `get_mut` lends out.
    type RefMut<'a>;
    /// Element type as laid out in the runtime's storage; `c_void` when the
    /// layout is private to the runtime.
    type Elem;

    fn vec_new() -> OpaqueHandle;

    /// Frees the vector and every element it still owns.
    ///
    /// # Safety
    /// `vec` must be owned by the caller and not used afterwards.
    unsafe fn vec_free(vec: OpaqueHandle);

    /// Moves `value` into the vector.
    ///
    /// # Safety
    /// `vec` must be live.
    unsafe fn vec_push(vec: OpaqueHandle, value: Self);

    /// # Safety
    /// `vec` must be live.
    unsafe fn vec_pop(vec: OpaqueHandle) -> Option<Self>;

    /// Bounds-checked lookup; out of range yields `None`.
    ///
    /// # Safety
    /// `vec` must be live and unmodified for `'a`.
    unsafe fn vec_get<'a>(vec: OpaqueHandle, index: usize) -> Option<Self::Ref<'a>>;

    /// # Safety
    /// `vec` must be live for `'a` and the element must not be viewed elsewhere.
    unsafe fn vec_get_mut<'a>(vec: OpaqueHandle, index: usize) -> Option<Self::RefMut<'a>>;

    /// Start of the element storage; valid until the vector reallocates.
    ///
    /// # Safety
    /// `vec` must be live.
    unsafe fn vec_as_ptr(vec: OpaqueHandle) -> *const c_void;

    /// # Safety
    /// `vec` must be live.
    unsafe fn vec_len(vec: OpaqueHandle) -> usize;
}
