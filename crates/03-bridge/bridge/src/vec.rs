//! `RustVec<T>`: one generic consumer-side vector for every bridged element type.

use std::fmt;
use std::marker::PhantomData;

use bridge_abi::{FfiSlice, OpaqueHandle};

use crate::iter::Iter;
use crate::primitive::BridgedPrimitive;
use crate::vectorizable::Vectorizable;

/// Owning handle to a vector held by the core runtime.
///
/// Dropping the handle frees the vector and every element it still owns.
/// Views returned by [`get`](Self::get) and [`get_mut`](Self::get_mut) borrow
/// the vector, so it cannot be mutated or dropped while they are alive.
pub struct RustVec<T: Vectorizable> {
    handle: OpaqueHandle,
    owns_memory: bool,
    _marker: PhantomData<*mut T>,
}

impl<T: Vectorizable> RustVec<T> {
    pub fn new() -> Self {
        let handle = T::vec_new();
        log::trace!("new RustVec {:?}", handle);
        Self {
            handle,
            owns_memory: true,
            _marker: PhantomData,
        }
    }

    /// Adopts a vector handle returned by another core-runtime call.
    ///
    /// # Safety
    /// `handle` must be a live, owned vector of `T` with no other owner.
    pub unsafe fn from_raw(handle: OpaqueHandle) -> Self {
        Self {
            handle,
            owns_memory: true,
            _marker: PhantomData,
        }
    }

    /// Releases ownership; the caller becomes responsible for freeing the vector.
    pub fn into_raw(mut self) -> OpaqueHandle {
        self.owns_memory = false;
        self.handle
    }

    pub fn handle(&self) -> OpaqueHandle {
        self.handle
    }

    /// Moves `value` into the vector; the value's previous owner will not free it.
    pub fn push(&mut self, value: T) {
        // SAFETY: `self` owns a live vector of `T`.
        unsafe { T::vec_push(self.handle, value) }
    }

    /// Removes the last element and hands its ownership to the caller.
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: `self` owns a live vector of `T`.
        unsafe { T::vec_pop(self.handle) }
    }

    pub fn get(&self, index: usize) -> Option<T::Ref<'_>> {
        // SAFETY: the shared borrow of `self` keeps the vector alive and unmodified.
        unsafe { T::vec_get(self.handle, index) }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<T::RefMut<'_>> {
        // SAFETY: the exclusive borrow of `self` makes this the only view.
        unsafe { T::vec_get_mut(self.handle, index) }
    }

    /// Like [`get`](Self::get), but panics when `index` is out of range.
    pub fn at(&self, index: usize) -> T::Ref<'_> {
        match self.get(index) {
            Some(item) => item,
            None => panic!("index {index} out of range for RustVec of length {}", self.len()),
        }
    }

    pub fn len(&self) -> usize {
        // SAFETY: `self` owns a live vector of `T`.
        unsafe { T::vec_len(self.handle) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the element storage, typed as the runtime lays it out.
    /// Invalidated by `push` and by dropping the vector.
    pub fn as_ptr(&self) -> *const T::Elem {
        // SAFETY: `self` owns a live vector of `T`.
        unsafe { T::vec_as_ptr(self.handle) }.cast()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: BridgedPrimitive> RustVec<T> {
    /// Slice View over the runtime's storage; valid until the vector is mutated.
    pub fn as_ffi_slice(&self) -> FfiSlice<T> {
        FfiSlice {
            start: self.as_ptr(),
            len: self.len(),
        }
    }

    /// The elements as a slice, read straight from the runtime's storage.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: primitive vectors store `len` contiguous `T` values, and the
        // shared borrow of `self` rules out reallocation for the slice's lifetime.
        unsafe { self.as_ffi_slice().as_slice() }
    }
}

impl<T: Vectorizable> Default for RustVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Vectorizable> Drop for RustVec<T> {
    fn drop(&mut self) {
        if self.owns_memory {
            log::trace!("dropping RustVec {:?}", self.handle);
            // SAFETY: this wrapper is the single owner and drops exactly once.
            unsafe { T::vec_free(self.handle) };
        }
    }
}

impl<T: Vectorizable> Extend<T> for RustVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Vectorizable> FromIterator<T> for RustVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<'a, T: Vectorizable> IntoIterator for &'a RustVec<T> {
    type Item = T::Ref<'a>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for RustVec<T>
where
    T: Vectorizable,
    for<'a> T::Ref<'a>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
