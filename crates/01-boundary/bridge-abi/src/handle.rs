use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// Address-sized token naming a core-runtime allocation.
///
/// The consumer never dereferences it; it is only ever passed back into
/// boundary functions. Holding a handle says nothing about who owns the
/// allocation behind it.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueHandle(NonNull<c_void>);

impl OpaqueHandle {
    /// Maps the boundary's null sentinel to `None`.
    #[inline]
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Wraps a pointer without checking for the null sentinel.
    ///
    /// # Safety
    /// `ptr` must be non-null.
    #[inline]
    pub unsafe fn from_raw_unchecked(ptr: *mut c_void) -> Self {
        // SAFETY: the caller guarantees `ptr` is non-null.
        Self(unsafe { NonNull::new_unchecked(ptr) })
    }

    /// Raw pointer form passed to boundary functions.
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Numeric address, only meaningful for logging and equality checks.
    #[inline]
    pub fn addr(self) -> usize {
        self.0.as_ptr() as usize
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueHandle({:#x})", self.addr())
    }
}
