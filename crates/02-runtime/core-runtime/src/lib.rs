#![deny(unsafe_op_in_unsafe_fn)]
//! Reference core runtime.
//!
//! Owns every bridged allocation and exposes it only through `extern "C"`
//! functions named `__bridge__$<Owner>$<op>`. Handles returned to the consumer
//! are boxed values cast to `void*`; borrowed handles point into live storage
//! (e.g. a vector element) and must never be freed.
//!
//! The exported functions are `unsafe` whenever they accept a handle: passing
//! a handle that was freed, transferred, or belongs to another type is
//! undefined behaviour, exactly as for any C library.

mod config;
pub mod ledger;
pub mod string;
pub mod vec;

pub use config::{config, configure, RuntimeConfig};
pub use ledger::LedgerSnapshot;

/// Emits a trace line for a boundary entry when tracing is switched on.
#[inline]
pub(crate) fn trace_call(symbol: &'static str) {
    if config::tracing_enabled() {
        log::trace!(target: "core_runtime::boundary", "{symbol}");
    }
}
