//! Cross-crate tests for the bridge: consumer wrappers driving the reference runtime.

#[cfg(test)]
mod ownership;

#[cfg(test)]
mod vec_props;

#[cfg(test)]
mod tests {
    use bridge::prelude::*;
    use core_runtime::ledger;

    #[test]
    fn push_pop_get_walkthrough() {
        let _ = env_logger::builder().is_test(true).try_init();
        ledger::reset();

        let mut vec = RustVec::new();
        vec.push(RustString::from("a"));
        vec.push(RustString::from("b"));
        vec.push(RustString::from("c"));
        assert_eq!(vec.len(), 3);

        assert_eq!(vec.pop().expect("c").as_str(), "c");
        assert_eq!(vec.pop().expect("b").as_str(), "b");
        assert_eq!(vec.get(0).expect("a").as_str(), "a");
        assert_eq!(vec.pop().expect("a").as_str(), "a");
        assert!(vec.pop().is_none());
        drop(vec);

        let snap = ledger::snapshot();
        assert_eq!(snap.live_strings(), 0);
        assert_eq!(snap.live_vecs(), 0);
    }

    #[test]
    fn mutation_through_get_mut_is_visible_to_get() {
        let mut vec: RustVec<RustString> = ["  alpha  ", "beta"]
            .into_iter()
            .map(RustString::from)
            .collect();
        {
            let mut first = vec.get_mut(0).expect("element 0");
            first.clear();
            first.push_str("gamma");
        }
        let texts: Vec<&str> = vec.iter().map(|s| s.into_str()).collect();
        assert_eq!(texts, ["gamma", "beta"]);
    }

    #[test]
    fn boundary_tracing_and_capacity_hint_do_not_change_results() {
        let _ = env_logger::builder().is_test(true).try_init();
        let previous = core_runtime::config();
        core_runtime::configure(core_runtime::RuntimeConfig {
            trace_boundary_calls: true,
            vec_capacity_hint: 32,
        });

        let vec: RustVec<u8> = (0..=255).collect();
        assert_eq!(vec.len(), 256);
        assert_eq!(vec.as_slice()[200], 200);

        core_runtime::configure(previous);
    }
}
