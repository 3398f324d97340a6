//! Single-owner handles and the borrowed views lent out by their owners.
//!
//! An [`Owned`] handle frees its allocation exactly once, when it is dropped
//! while still holding ownership. Handing the allocation to another owner goes
//! through [`Owned::release_ownership`], which consumes the wrapper so the
//! released binding cannot be used again.
//!
//! [`Ref`] and [`RefMut`] never free anything. Their lifetime parameter ties
//! them to the borrow of whatever produced them (an owner or a container);
//! beyond that, validity is the core runtime's contract.

use std::marker::PhantomData;

use bridge_abi::OpaqueHandle;

/// A core-runtime type that can be freed through the boundary.
pub trait OpaqueType {
    /// Name used in boundary symbols and log lines.
    const TYPE_NAME: &'static str;

    /// Releases an owned allocation.
    ///
    /// # Safety
    /// `handle` must be a live, owned handle of this type that no other
    /// wrapper will free.
    unsafe fn free(handle: OpaqueHandle);
}

/// Owning wrapper around one opaque handle.
///
/// Not `Send`/`Sync`: handles follow the core runtime's single-thread rule.
pub struct Owned<T: OpaqueType> {
    handle: OpaqueHandle,
    owns_memory: bool,
    _marker: PhantomData<*mut T>,
}

impl<T: OpaqueType> Owned<T> {
    /// Takes ownership of a handle returned by a constructor or extraction call.
    ///
    /// # Safety
    /// `handle` must be a live, owned handle of type `T` with no other owner.
    pub unsafe fn adopt(handle: OpaqueHandle) -> Self {
        Self {
            handle,
            owns_memory: true,
            _marker: PhantomData,
        }
    }

    pub fn handle(&self) -> OpaqueHandle {
        self.handle
    }

    pub fn owns_memory(&self) -> bool {
        self.owns_memory
    }

    /// Gives up ownership and returns the raw handle for the receiving owner.
    ///
    /// The wrapper is consumed; dropping it afterwards is a no-op.
    pub fn release_ownership(mut self) -> OpaqueHandle {
        self.owns_memory = false;
        log::trace!("released {} {:?}", T::TYPE_NAME, self.handle);
        self.handle
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        // SAFETY: the owner keeps the handle alive for the borrow.
        unsafe { Ref::from_handle(self.handle) }
    }

    pub fn borrow_mut(&mut self) -> RefMut<'_, T> {
        // SAFETY: the exclusive borrow of the owner makes this the only view.
        unsafe { RefMut::from_handle(self.handle) }
    }
}

impl<T: OpaqueType> Drop for Owned<T> {
    fn drop(&mut self) {
        if self.owns_memory {
            log::trace!("freeing {} {:?}", T::TYPE_NAME, self.handle);
            // SAFETY: this wrapper is the single owner and drops exactly once.
            unsafe { T::free(self.handle) };
        }
    }
}

/// Read-only view of a handle owned elsewhere.
pub struct Ref<'a, T> {
    handle: OpaqueHandle,
    _marker: PhantomData<&'a T>,
}

impl<T> Clone for Ref<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ref<'_, T> {}

impl<'a, T> Ref<'a, T> {
    /// # Safety
    /// `handle` must stay live and unmutated for `'a`.
    pub unsafe fn from_handle(handle: OpaqueHandle) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    pub fn handle(&self) -> OpaqueHandle {
        self.handle
    }
}

/// Read-write view of a handle owned elsewhere.
pub struct RefMut<'a, T> {
    handle: OpaqueHandle,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> RefMut<'a, T> {
    /// # Safety
    /// `handle` must stay live for `'a` and no other view may use it meanwhile.
    pub unsafe fn from_handle(handle: OpaqueHandle) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    pub fn handle(&self) -> OpaqueHandle {
        self.handle
    }

    /// Read-only reborrow.
    pub fn as_shared(&self) -> Ref<'_, T> {
        // SAFETY: shares the validity of `self` for the reborrow.
        unsafe { Ref::from_handle(self.handle) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::c_void;

    thread_local! {
        static FREED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    struct Probe;

    impl OpaqueType for Probe {
        const TYPE_NAME: &'static str = "Probe";

        unsafe fn free(handle: OpaqueHandle) {
            FREED.with(|freed| freed.borrow_mut().push(handle.addr()));
        }
    }

    fn freed() -> Vec<usize> {
        FREED.with(|freed| freed.borrow().clone())
    }

    fn fake_handle(addr: usize) -> OpaqueHandle {
        OpaqueHandle::from_raw(addr as *mut c_void).expect("non-null")
    }

    #[test]
    fn drop_frees_exactly_once_per_owner() {
        {
            let _a = unsafe { Owned::<Probe>::adopt(fake_handle(0x10)) };
            let _b = unsafe { Owned::<Probe>::adopt(fake_handle(0x20)) };
            let _c = unsafe { Owned::<Probe>::adopt(fake_handle(0x30)) };
        }
        let mut seen = freed();
        seen.sort_unstable();
        assert_eq!(seen, vec![0x10, 0x20, 0x30]);
    }

    #[test]
    fn released_owner_does_not_free() {
        let owner = unsafe { Owned::<Probe>::adopt(fake_handle(0x40)) };
        assert!(owner.owns_memory());
        let raw = owner.release_ownership();
        assert_eq!(raw, fake_handle(0x40));
        assert!(freed().is_empty());

        // The receiver is now the only owner.
        drop(unsafe { Owned::<Probe>::adopt(raw) });
        assert_eq!(freed(), vec![0x40]);
    }

    #[test]
    fn views_share_the_owner_handle() {
        let mut owner = unsafe { Owned::<Probe>::adopt(fake_handle(0x50)) };
        assert_eq!(owner.borrow().handle(), owner.handle());
        let view = owner.borrow_mut();
        assert_eq!(view.as_shared().handle(), fake_handle(0x50));
        drop(owner);
        assert_eq!(freed(), vec![0x50]);
    }
}
