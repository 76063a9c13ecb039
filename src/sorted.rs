use crate::cmp::Comparator;
use crate::coin::Coin;
use crate::skip_list::SkipList;

/// Common surface of every sorted container in the crate, so the skip list
/// and the comparison baselines can be driven by the same code.
pub trait SortedCollection<T> {
    fn name(&self) -> &'static str;

    /// Inserts `value` at its sorted position. Duplicates are kept.
    fn insert(&mut self, value: T);

    /// Removes one occurrence of `value`, `false` if there was none.
    fn remove(&mut self, value: &T) -> bool;

    fn contains(&self, value: &T) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every value in non-decreasing order.
    fn to_vec(&self) -> Vec<T>;
}

impl<T, O, C> SortedCollection<T> for SkipList<T, O, C>
where
    T: Clone,
    O: Comparator<T>,
    C: Coin,
{
    fn name(&self) -> &'static str {
        "skip list"
    }

    fn insert(&mut self, value: T) {
        SkipList::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        SkipList::remove(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        SkipList::contains(self, value)
    }

    fn clear(&mut self) {
        SkipList::clear(self)
    }

    fn len(&self) -> usize {
        SkipList::len(self)
    }

    fn to_vec(&self) -> Vec<T> {
        SkipList::to_vec(self)
    }
}
