//! Per-thread counters of boundary-level allocation events.
//!
//! The ledger counts what crossed the boundary, not what the allocator did:
//! a string pushed into a vector is a transfer, not a free, even though its
//! box is released internally. Counters are thread-local so a test observes
//! only the calls made from its own thread.

use std::cell::Cell;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LedgerEvent {
    /// A fresh owned string handle was handed out (new, new_with_str, pop).
    StringAlloc,
    /// `RustString$_free` released an owned handle.
    StringFree,
    /// An owned string handle was moved into a vector.
    StringTransfer,
    VecAlloc,
    /// A vector was dropped together with `elements` owned strings.
    VecFree { elements: u64 },
}

/// Counters observed on the current thread since the last [`reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub string_allocs: u64,
    pub string_frees: u64,
    pub string_transfers: u64,
    pub vec_allocs: u64,
    pub vec_frees: u64,
    pub elements_dropped: u64,
}

impl LedgerSnapshot {
    /// Owned string handles still held by the consumer.
    pub fn live_strings(&self) -> u64 {
        self.string_allocs
            .saturating_sub(self.string_frees)
            .saturating_sub(self.string_transfers)
    }

    pub fn live_vecs(&self) -> u64 {
        self.vec_allocs.saturating_sub(self.vec_frees)
    }

    /// Counter-wise difference against an earlier snapshot from the same thread.
    /// Counters reset in between clamp to zero.
    pub fn since(&self, earlier: &LedgerSnapshot) -> LedgerSnapshot {
        LedgerSnapshot {
            string_allocs: self.string_allocs.saturating_sub(earlier.string_allocs),
            string_frees: self.string_frees.saturating_sub(earlier.string_frees),
            string_transfers: self.string_transfers.saturating_sub(earlier.string_transfers),
            vec_allocs: self.vec_allocs.saturating_sub(earlier.vec_allocs),
            vec_frees: self.vec_frees.saturating_sub(earlier.vec_frees),
            elements_dropped: self.elements_dropped.saturating_sub(earlier.elements_dropped),
        }
    }
}

thread_local! {
    static LEDGER: Cell<LedgerSnapshot> = const { Cell::new(LedgerSnapshot {
        string_allocs: 0,
        string_frees: 0,
        string_transfers: 0,
        vec_allocs: 0,
        vec_frees: 0,
        elements_dropped: 0,
    }) };
}

pub(crate) fn record(event: LedgerEvent) {
    LEDGER.with(|cell| {
        let mut snap = cell.get();
        match event {
            LedgerEvent::StringAlloc => snap.string_allocs += 1,
            LedgerEvent::StringFree => snap.string_frees += 1,
            LedgerEvent::StringTransfer => snap.string_transfers += 1,
            LedgerEvent::VecAlloc => snap.vec_allocs += 1,
            LedgerEvent::VecFree { elements } => {
                snap.vec_frees += 1;
                snap.elements_dropped += elements;
            }
        }
        cell.set(snap);
    });
}

pub fn snapshot() -> LedgerSnapshot {
    LEDGER.with(Cell::get)
}

pub fn reset() {
    LEDGER.with(|cell| cell.set(LedgerSnapshot::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_accumulate_per_kind() {
        reset();
        record(LedgerEvent::StringAlloc);
        record(LedgerEvent::StringAlloc);
        record(LedgerEvent::StringAlloc);
        record(LedgerEvent::StringTransfer);
        record(LedgerEvent::StringFree);
        record(LedgerEvent::VecAlloc);
        record(LedgerEvent::VecFree { elements: 1 });

        let snap = snapshot();
        assert_eq!(snap.string_allocs, 3);
        assert_eq!(snap.live_strings(), 1);
        assert_eq!(snap.live_vecs(), 0);
        assert_eq!(snap.elements_dropped, 1);
    }

    #[test]
    fn ledgers_are_thread_local() {
        reset();
        record(LedgerEvent::VecAlloc);
        std::thread::spawn(|| {
            assert_eq!(snapshot(), LedgerSnapshot::default());
        })
        .join()
        .expect("ledger thread");
        assert_eq!(snapshot().vec_allocs, 1);
    }

    #[test]
    fn since_subtracts_baseline() {
        reset();
        record(LedgerEvent::StringAlloc);
        let before = snapshot();
        record(LedgerEvent::StringAlloc);
        record(LedgerEvent::StringFree);
        let delta = snapshot().since(&before);
        assert_eq!(delta.string_allocs, 1);
        assert_eq!(delta.string_frees, 1);
        assert_eq!(delta.vec_allocs, 0);
    }

    #[test]
    fn since_clamps_across_a_reset() {
        reset();
        record(LedgerEvent::StringAlloc);
        record(LedgerEvent::StringAlloc);
        let before = snapshot();
        reset();
        record(LedgerEvent::StringAlloc);
        let delta = snapshot().since(&before);
        assert_eq!(delta.string_allocs, 0);
        assert_eq!(delta, LedgerSnapshot::default());
    }
}
