#![cfg(test)]

use bridge::prelude::*;
use proptest::collection;
use proptest::prelude::*;

fn string_vec(values: &[String]) -> RustVec<RustString> {
    values.iter().map(|v| RustString::from(v.as_str())).collect()
}

proptest! {
    /// Pushing N values and popping N returns them in reverse; one more pop is empty.
    #[test]
    fn pop_is_lifo(values in collection::vec(".{0,12}", 0..32)) {
        let mut vec = string_vec(&values);
        prop_assert_eq!(vec.len(), values.len());
        for expected in values.iter().rev() {
            let popped = vec.pop();
            prop_assert_eq!(popped.map(|s| s.to_owned_string()), Some(expected.clone()));
        }
        prop_assert!(vec.pop().is_none());
        prop_assert!(vec.is_empty());
    }

    /// Lookups inside the length read the stored value; anything past it is empty.
    #[test]
    fn get_is_bounds_checked(values in collection::vec(any::<i32>(), 0..64), probe in 0usize..96) {
        let vec: RustVec<i32> = values.iter().copied().collect();
        prop_assert_eq!(vec.get(probe), values.get(probe).copied());
        prop_assert_eq!(vec.iter().get(probe), values.get(probe).copied());
        prop_assert_eq!(vec.as_slice(), values.as_slice());
    }

    /// Overwriting through `get_mut` is what the next `get` reads.
    #[test]
    fn get_reads_latest_write(
        values in collection::vec("[a-z]{1,6}", 1..16),
        suffix in "[0-9]{1,3}",
    ) {
        let mut vec = string_vec(&values);
        let index = values.len() / 2;
        {
            let mut slot = vec.get_mut(index).expect("index in range");
            slot.push_str(&suffix);
        }
        let expected = format!("{}{}", values[index], suffix);
        prop_assert_eq!(vec.get(index).map(|s| s.into_str()), Some(expected.as_str()));
    }

    /// Two fresh adapters over an unmodified vector yield the same sequence.
    #[test]
    fn iteration_restarts(values in collection::vec(".{0,6}", 0..24)) {
        let vec = string_vec(&values);
        let first: Vec<String> = vec.iter().map(|s| s.as_str().to_owned()).collect();
        let second: Vec<String> = (&vec).into_iter().map(|s| s.as_str().to_owned()).collect();
        prop_assert_eq!(&first, &values);
        prop_assert_eq!(first, second);

        let reversed: Vec<String> = vec.iter().rev().map(|s| s.as_str().to_owned()).collect();
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(reversed, expected);
    }

    /// Primitive vectors of every width agree with a plain `Vec`.
    #[test]
    fn primitive_vectors_mirror_std(
        bytes in collection::vec(any::<u8>(), 0..48),
        floats in collection::vec(-1.0e6f64..1.0e6, 0..48),
        flags in collection::vec(any::<bool>(), 0..48),
    ) {
        let byte_vec: RustVec<u8> = bytes.iter().copied().collect();
        let float_vec: RustVec<f64> = floats.iter().copied().collect();
        let flag_vec: RustVec<bool> = flags.iter().copied().collect();

        prop_assert_eq!(byte_vec.as_slice(), bytes.as_slice());
        prop_assert_eq!(float_vec.iter().collect::<Vec<_>>(), floats.clone());
        prop_assert_eq!(flag_vec.iter().len(), flags.len());
        prop_assert_eq!(
            flag_vec.iter().filter(|f| *f).count(),
            flags.iter().filter(|f| **f).count()
        );
    }
}
