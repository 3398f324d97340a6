#![cfg(test)]

use bridge::prelude::*;
use bridge::{OpaqueHandle, Owned};
use core_runtime::ledger;
use proptest::prelude::*;

#[test]
fn dropped_owners_each_free_once() {
    ledger::reset();
    {
        let _owners: Vec<RustString> = (0..5)
            .map(|i| RustString::from(i.to_string().as_str()))
            .collect();
    }
    let snap = ledger::snapshot();
    assert_eq!(snap.string_allocs, 5);
    assert_eq!(snap.string_frees, 5);
    assert_eq!(snap.string_transfers, 0);
}

#[test]
fn transfer_into_vector_moves_the_free() {
    ledger::reset();
    let mut vec = RustVec::new();
    let value = RustString::from("moved");
    vec.push(value);
    // `value` is moved; using it here would not compile.
    assert_eq!(ledger::snapshot().string_frees, 0);

    drop(vec);
    let snap = ledger::snapshot();
    assert_eq!(snap.string_frees, 0);
    assert_eq!(snap.string_transfers, 1);
    assert_eq!(snap.vec_frees, 1);
    assert_eq!(snap.elements_dropped, 1);
}

#[test]
fn borrowed_views_never_free() {
    ledger::reset();
    let vec: RustVec<RustString> = ["x", "y"].into_iter().map(RustString::from).collect();
    for _ in 0..3 {
        let views: Vec<_> = vec.iter().collect();
        assert_eq!(views.len(), 2);
    }
    let _ = vec.get(1);
    assert_eq!(ledger::snapshot().string_frees, 0);
    drop(vec);
    assert_eq!(ledger::snapshot().elements_dropped, 2);
}

#[test]
fn released_handle_is_adopted_by_a_new_owner() {
    ledger::reset();
    let raw: OpaqueHandle = RustString::from("handoff").into_raw();
    assert_eq!(ledger::snapshot().string_frees, 0);

    let owner: Owned<RustString> = unsafe { Owned::adopt(raw) };
    assert!(owner.owns_memory());
    assert_eq!(owner.borrow().into_str(), "handoff");
    drop(owner);
    assert_eq!(ledger::snapshot().string_frees, 1);
}

#[test]
fn popped_elements_become_independent_owners() {
    ledger::reset();
    let mut vec: RustVec<RustString> = ["keep", "me"].into_iter().map(RustString::from).collect();
    let popped = vec.pop().expect("last element");
    drop(vec);
    assert_eq!(popped, "me");
    assert_eq!(ledger::snapshot().string_frees, 0);
    drop(popped);
    assert_eq!(ledger::snapshot().string_frees, 1);
    assert_eq!(ledger::snapshot().live_strings(), 0);
}

proptest! {
    /// Whatever mix of pushes, pops and drops happens, no string is leaked or double-freed.
    #[test]
    fn every_allocation_is_released_exactly_once(
        values in proptest::collection::vec("[a-z ]{0,8}", 0..40),
        pops in 0usize..50,
    ) {
        ledger::reset();
        {
            let mut vec: RustVec<RustString> =
                values.iter().map(|v| RustString::from(v.as_str())).collect();
            let mut held = Vec::new();
            for _ in 0..pops {
                match vec.pop() {
                    Some(value) => held.push(value),
                    None => break,
                }
            }
            prop_assert_eq!(vec.len() + held.len(), values.len());
        }
        let snap = ledger::snapshot();
        prop_assert_eq!(snap.live_strings(), 0);
        prop_assert_eq!(snap.live_vecs(), 0);
        prop_assert_eq!(snap.string_transfers, values.len() as u64);
        prop_assert_eq!(snap.string_frees + snap.elements_dropped, values.len() as u64);
    }
}
