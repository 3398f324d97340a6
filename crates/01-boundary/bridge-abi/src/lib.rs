#![deny(unsafe_op_in_unsafe_fn)]
//! Boundary types shared by the core runtime and its consumers.
//!
//! Everything in this crate crosses the `extern "C"` boundary by value and is
//! laid out identically on both sides:
//! * [`OpaqueHandle`] – address-sized token for a core-runtime allocation.
//! * [`FfiSlice`] / [`RustStr`] – non-owning `(start, len)` buffer views.
//! * [`FfiOption`] – by-value optional used where a null sentinel is unavailable.
//! * [`symbol`] – boundary symbol naming and C declaration rendering.

mod error;
mod handle;
mod option;
mod slice;
pub mod symbol;

pub use error::{AbiError, AbiResult};
pub use handle::OpaqueHandle;
pub use option::FfiOption;
pub use slice::{FfiSlice, RustStr};
pub use symbol::{BoundarySymbol, Primitive, VecOp, SYMBOL_PREFIX};
