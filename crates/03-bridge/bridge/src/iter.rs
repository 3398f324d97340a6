use std::iter::FusedIterator;

use crate::vec::RustVec;
use crate::vectorizable::Vectorizable;

/// Borrowing cursor over a [`RustVec`], front to back.
///
/// Elements are fetched through the vector's bounds-checked `get`, so the
/// iterator stops as soon as a lookup comes back empty. Cloning yields an
/// independent cursor at the same position.
pub struct Iter<'a, T: Vectorizable> {
    vec: &'a RustVec<T>,
    front: usize,
    back: usize,
}

impl<'a, T: Vectorizable> Iter<'a, T> {
    pub(crate) fn new(vec: &'a RustVec<T>) -> Self {
        Self {
            vec,
            front: 0,
            back: vec.len(),
        }
    }

    /// Random access relative to the underlying vector, ignoring the cursor.
    pub fn get(&self, index: usize) -> Option<T::Ref<'a>> {
        self.vec.get(index)
    }

    /// Elements not yet yielded from either end.
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }
}

impl<T: Vectorizable> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            vec: self.vec,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T: Vectorizable> Iterator for Iter<'a, T> {
    type Item = T::Ref<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        match self.vec.get(self.front) {
            Some(item) => {
                self.front += 1;
                Some(item)
            }
            None => {
                self.front = self.back;
                None
            }
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }

    fn count(self) -> usize {
        self.remaining()
    }
}

impl<T: Vectorizable> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let item = self.vec.get(self.back);
        if item.is_none() {
            self.back = self.front;
        }
        item
    }
}

impl<T: Vectorizable> ExactSizeIterator for Iter<'_, T> {}

impl<T: Vectorizable> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::{RustStrRead, RustString};

    fn letters() -> RustVec<RustString> {
        ["a", "b", "c", "d"].into_iter().map(RustString::from).collect()
    }

    #[test]
    fn walks_every_element_in_order() {
        let vec = letters();
        let seen: Vec<&str> = vec.iter().map(|s| s.into_str()).collect();
        assert_eq!(seen, ["a", "b", "c", "d"]);

        let mut total = 0;
        for value in &vec {
            total += value.len();
        }
        assert_eq!(total, 4);
    }

    #[test]
    fn restarts_from_scratch_each_time() {
        let vec: RustVec<u16> = [5, 6, 7].into_iter().collect();
        let first: Vec<u16> = vec.iter().collect();
        let second: Vec<u16> = vec.iter().collect();
        assert_eq!(first, second);
        assert_eq!(vec.iter().len(), 3);
    }

    #[test]
    fn both_ends_meet_in_the_middle() {
        let vec = letters();
        let mut iter = vec.iter();
        assert_eq!(iter.next().map(|s| s.into_str()), Some("a"));
        assert_eq!(iter.next_back().map(|s| s.into_str()), Some("d"));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next_back().map(|s| s.into_str()), Some("c"));
        assert_eq!(iter.next().map(|s| s.into_str()), Some("b"));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn nth_and_random_access() {
        let vec: RustVec<i8> = (0..10).collect();
        let mut iter = vec.iter();
        assert_eq!(iter.nth(3), Some(3));
        assert_eq!(iter.next(), Some(4));
        assert_eq!(iter.get(0), Some(0));
        assert_eq!(iter.get(10), None);
        assert_eq!(iter.clone().count(), 5);
        assert_eq!(iter.nth(100), None);
        assert_eq!(iter.next(), None);
        assert_eq!(vec.iter().next_back(), Some(9));
    }

    #[test]
    fn empty_vector_yields_nothing() {
        let vec = RustVec::<f32>::new();
        assert_eq!(vec.iter().size_hint(), (0, Some(0)));
        assert!(vec.iter().next().is_none());
    }
}
