#![deny(unsafe_op_in_unsafe_fn)]
//! Consumer side of the opaque-handle bridge.
//!
//! Values live in the core runtime and are reached only through boundary
//! calls. This crate wraps the raw handles in types that free exactly once
//! ([`Owned`], [`RustVec`]), lend out views bounded by their owner
//! ([`Ref`], [`RefMut`]), and share one vector implementation across every
//! element type through [`Vectorizable`].
//!
//! ```
//! use bridge::prelude::*;
//!
//! let mut names = RustVec::new();
//! names.push(RustString::from("a"));
//! names.push(RustString::from("b"));
//! assert_eq!(names.len(), 2);
//! assert_eq!(names.pop().map(|s| s.to_owned_string()), Some("b".to_owned()));
//! assert_eq!(names.at(0).as_str(), "a");
//! ```

// Links the runtime that exports the `__bridge__$…` symbols.
use core_runtime as _;

mod ffi;
mod iter;
mod owned;
mod primitive;
mod string;
mod vec;
mod vectorizable;

pub use bridge_abi::{FfiOption, FfiSlice, OpaqueHandle, RustStr};
pub use iter::Iter;
pub use owned::{OpaqueType, Owned, Ref, RefMut};
pub use primitive::BridgedPrimitive;
pub use string::{RustStrRead, RustStrWrite, RustString, RustStringRef, RustStringRefMut};
pub use vec::RustVec;
pub use vectorizable::Vectorizable;

pub mod prelude {
    pub use crate::{RustStrRead, RustStrWrite, RustString, RustVec, Vectorizable};
}
