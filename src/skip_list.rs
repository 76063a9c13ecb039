//! Layered skip list over an index arena.
//!
//! Layer 0 holds every value in order. Each higher layer is a sparser
//! subsequence of the one below, and every node above layer 0 points `down`
//! at the node carrying the same value one layer lower. A value's nodes
//! across layers form its vertical chain.

use crate::cmp::{Comparator, NaturalOrder};
use crate::coin::{Coin, RngCoin};
use crate::config::{check_probability, SkipListConfig, DEFAULT_PROBABILITY};
use crate::errors::Result;
use crate::node::{Arena, Node};
use log::{debug, trace};
use rand::rngs::SmallRng;
use std::fmt::{self, Debug, Display};
use std::io;
use std::iter;

pub struct SkipList<T, O = NaturalOrder, C = RngCoin<SmallRng>> {
    nodes: Arena<T>,
    // Head node of every layer, index 0 = bottom.
    layers: Vec<usize>,
    len: usize,
    probability: f64,
    order: O,
    coin: C,

    // Reused across inserts: the node on each layer where the search stepped down.
    breadcrumbs: Vec<usize>,
}

/// Most layers an insertion into a list of `len` values may promote into.
#[inline]
fn height_cap(len: usize) -> usize {
    (len as f64).ln().floor() as usize
}

impl<T: PartialOrd + Clone> SkipList<T> {
    pub fn new() -> Self {
        SkipList::assemble(DEFAULT_PROBABILITY, NaturalOrder, RngCoin::from_entropy())
    }

    pub fn with_probability(p: f64) -> Result<Self> {
        SkipList::with_parts(p, NaturalOrder, RngCoin::from_entropy())
    }

    /// Deterministic promotion: two lists built with the same seed and the
    /// same operations end up with identical layers.
    pub fn seeded(p: f64, seed: u64) -> Result<Self> {
        SkipList::with_parts(p, NaturalOrder, RngCoin::seeded(seed))
    }

    pub fn from_config(config: &SkipListConfig) -> Result<Self> {
        let coin = match config.seed {
            Some(seed) => RngCoin::seeded(seed),
            None => RngCoin::from_entropy(),
        };
        SkipList::with_parts(config.probability, NaturalOrder, coin)
    }
}

impl<T: PartialOrd + Clone> Default for SkipList<T> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<T, O, C> SkipList<T, O, C> {
    fn assemble(probability: f64, order: O, coin: C) -> Self {
        SkipList {
            nodes: Arena::new(),
            layers: Vec::new(),
            len: 0,
            probability,
            order,
            coin,
            breadcrumbs: Vec::new(),
        }
    }

    /// Number of values stored, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of layers currently in use. Zero for an empty list.
    pub fn height(&self) -> usize {
        self.layers.len()
    }

    /// Forward, read-only walk over layer 0 in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.layers.first().copied(),
            remaining: self.len,
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.layers.first().map(|&head| &self.nodes[head].value)
    }

    /// Greatest value, found by running right then down from the top layer.
    pub fn last(&self) -> Option<&T> {
        let mut current = *self.layers.last()?;
        loop {
            while let Some(next) = self.nodes[current].next {
                current = next;
            }
            match self.nodes[current].down {
                Some(down) => current = down,
                None => return Some(&self.nodes[current].value),
            }
        }
    }

    /// Drops every node on every layer.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        debug!(
            "Clearing {} values ({} nodes) across {} layers",
            self.len,
            self.nodes.len(),
            self.layers.len()
        );
        self.nodes.clear();
        self.layers.clear();
        self.len = 0;
    }

    fn layer(&self, layer: usize) -> impl Iterator<Item = &T> + '_ {
        iter::successors(self.layers.get(layer).copied(), move |&id| {
            self.nodes[id].next
        })
        .map(move |id| &self.nodes[id].value)
    }
}

impl<T, O, C> SkipList<T, O, C>
where
    T: Clone,
    O: Comparator<T>,
    C: Coin,
{
    /// Builds an empty list with a custom ordering and promotion coin.
    pub fn with_parts(p: f64, order: O, coin: C) -> Result<Self> {
        check_probability(p)?;
        Ok(SkipList::assemble(p, order, coin))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Inserts `value` after any equal values already present.
    ///
    /// All comparisons happen before the structure is touched, so a
    /// comparator that panics leaves the list exactly as it was.
    pub fn insert(&mut self, value: T) {
        if self.layers.is_empty() {
            let id = self.nodes.alloc(Node::new(value, None, None, None));
            self.layers.push(id);
            self.len = 1;
            trace!("Inserted first value");
            return;
        }

        // Enter at the highest layer whose head does not exceed the value.
        let mut layer = self.layers.len() - 1;
        let mut current = self.layers[layer];
        while layer > 0 && self.order.less(&value, &self.nodes[current].value) {
            layer -= 1;
            current = self.layers[layer];
        }

        self.breadcrumbs.clear();
        loop {
            current = self.advance(current, &value);
            match self.nodes[current].down {
                Some(down) => {
                    self.breadcrumbs.push(current);
                    current = down;
                }
                None => break,
            }
        }
        // Only the layer 0 head can still be greater than the value here.
        let bottom = if self.order.less(&value, &self.nodes[current].value) {
            None
        } else {
            Some(current)
        };

        self.len += 1;
        let height = self.promotion_height();
        debug!(
            "Inserting with {} promotions (entered at layer {}, {} layers)",
            height,
            layer,
            self.layers.len()
        );

        let mut below = None;
        for level in 0..height {
            below = Some(self.link(level, value.clone(), below, bottom));
        }
        self.link(height, value, below, bottom);
    }

    /// Removes one occurrence of `value` together with its whole vertical
    /// chain. Returns `false` and leaves the list untouched if absent.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some((found, top)) = self.find(value) else {
            return false;
        };

        let mut current = found;
        for layer in (0..=top).rev() {
            let node = self.nodes.release(current);
            self.unlink(layer, &node);
            match node.down {
                Some(down) => current = down,
                None => break,
            }
        }

        self.len -= 1;
        debug!(
            "Removed chain of height {}, {} values left in {} layers",
            top + 1,
            self.len,
            self.layers.len()
        );
        true
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Locates the highest node holding a value equal to `value`, returning
    /// it with the layer it sits on.
    fn find(&self, value: &T) -> Option<(usize, usize)> {
        let mut layer = self.layers.len().checked_sub(1)?;
        let mut current = self.layers[layer];
        while layer > 0 && self.order.less(value, &self.nodes[current].value) {
            layer -= 1;
            current = self.layers[layer];
        }
        // Smaller than the minimum.
        if self.order.less(value, &self.nodes[current].value) {
            return None;
        }

        loop {
            current = self.advance(current, value);
            if self.order.equal(&self.nodes[current].value, value) {
                return Some((current, layer));
            }
            match self.nodes[current].down {
                Some(down) => {
                    current = down;
                    layer -= 1;
                }
                None => return None,
            }
        }
    }

    /// Moves right along a layer while the next value is <= `value`.
    #[inline]
    fn advance(&self, mut current: usize, value: &T) -> usize {
        while let Some(next) = self.nodes[current].next {
            if !self.order.less_or_equal(&self.nodes[next].value, value) {
                break;
            }
            current = next;
        }
        current
    }

    fn promotion_height(&mut self) -> usize {
        let cap = height_cap(self.len);
        let mut height = 0;
        while height < cap && self.coin.flip(self.probability) {
            height += 1;
        }
        height
    }

    /// Links one node of a new vertical chain into `level`. Layer 0 uses the
    /// search position, higher layers the breadcrumb left on the way down;
    /// without one the node becomes the layer head or starts a new layer.
    fn link(
        &mut self,
        level: usize,
        value: T,
        down: Option<usize>,
        bottom: Option<usize>,
    ) -> usize {
        let anchor = if level == 0 {
            bottom
        } else {
            self.breadcrumbs.pop()
        };

        match anchor {
            Some(prev) => {
                let next = self.nodes[prev].next;
                let id = self.nodes.alloc(Node::new(value, Some(prev), next, down));
                self.nodes[prev].next = Some(id);
                if let Some(next) = next {
                    self.nodes[next].prev = Some(id);
                }
                id
            }
            None if level < self.layers.len() => {
                let head = self.layers[level];
                let id = self.nodes.alloc(Node::new(value, None, Some(head), down));
                self.nodes[head].prev = Some(id);
                self.layers[level] = id;
                id
            }
            None => {
                let id = self.nodes.alloc(Node::new(value, None, None, down));
                self.layers.push(id);
                trace!("Opened layer {}", level);
                id
            }
        }
    }

    fn unlink(&mut self, layer: usize, node: &Node<T>) {
        if let Some(next) = node.next {
            self.nodes[next].prev = node.prev;
        }
        match (node.prev, node.next) {
            (Some(prev), _) => self.nodes[prev].next = node.next,
            (None, Some(next)) => self.layers[layer] = next,
            (None, None) => {
                // Higher layers are subsets of this one, so they are gone already.
                debug_assert_eq!(layer + 1, self.layers.len());
                self.layers.pop();
                trace!("Dropped empty layer {}", layer);
            }
        }
    }
}

impl<T: Display, O, C> SkipList<T, O, C> {
    /// Writes the list for inspection. With `all_layers` every layer gets a
    /// line of its own followed by the size, otherwise only layer 0 is shown.
    pub fn print<W: io::Write>(&self, out: &mut W, all_layers: bool) -> io::Result<()> {
        if all_layers {
            if self.is_empty() {
                writeln!(out, " Empty")?;
            }
            for layer in 0..self.layers.len() {
                write!(out, " Layer {}:", layer)?;
                for value in self.layer(layer) {
                    write!(out, " {}", value)?;
                }
                writeln!(out)?;
            }
            writeln!(out, " Size: {}", self.len)?;
        } else {
            for value in self.iter() {
                write!(out, " {}", value)?;
            }
            writeln!(out)?;
        }
        writeln!(out)
    }
}

impl<T: Display, O, C> Display for SkipList<T, O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<T: Debug, O, C> Debug for SkipList<T, O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Cloning re-inserts every value, so the copy holds the same sequence but
/// draws its own layer heights.
impl<T, O, C> Clone for SkipList<T, O, C>
where
    T: Clone,
    O: Comparator<T> + Clone,
    C: Coin + Clone,
{
    fn clone(&self) -> Self {
        let mut copy: Self =
            SkipList::assemble(self.probability, self.order.clone(), self.coin.clone());
        copy.extend(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T, O, C> PartialEq for SkipList<T, O, C>
where
    O: Comparator<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.order.equal(a, b))
    }
}

impl<T, O, C> Extend<T> for SkipList<T, O, C>
where
    T: Clone,
    O: Comparator<T>,
    C: Coin,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<T: PartialOrd + Clone> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut list = SkipList::new();
        list.extend(values);
        list
    }
}

impl<'a, T, O, C> IntoIterator for &'a SkipList<T, O, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over layer 0. The list cannot be mutated while one is alive.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes: &'a Arena<T> = self.nodes;
        let node = &nodes[self.next?];
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::ScriptedCoin;
    use env_logger::{Builder, Env};
    use rand::seq::SliceRandom;
    use rand::Rng;
    use std::collections::HashSet;
    use std::panic::{self, AssertUnwindSafe};

    // Helper function to initialize the logger once
    fn init_logger() {
        let _ = Builder::from_env(Env::default().default_filter_or("debug"))
            .is_test(true)
            .try_init();
    }

    fn layer_values<T: Clone, O, C>(list: &SkipList<T, O, C>, layer: usize) -> Vec<T> {
        list.layer(layer).cloned().collect()
    }

    /// Walks every layer and checks ordering, back links, down links, the
    /// subset relation between layers and the node/size bookkeeping.
    fn assert_integrity<T, O, C>(list: &SkipList<T, O, C>)
    where
        T: Clone + Debug,
        O: Comparator<T>,
        C: Coin,
    {
        let mut total_nodes = 0;
        let mut lower: HashSet<usize> = HashSet::new();

        for layer in 0..list.layers.len() {
            let mut ids = Vec::new();
            let mut prev: Option<usize> = None;
            let mut current = Some(list.layers[layer]);
            while let Some(id) = current {
                let node = &list.nodes[id];
                assert_eq!(node.prev, prev, "broken back link at layer {}", layer);
                if let Some(p) = prev {
                    assert!(
                        list.order.less_or_equal(&list.nodes[p].value, &node.value),
                        "layer {} out of order",
                        layer
                    );
                }
                match node.down {
                    None => assert_eq!(layer, 0, "node above layer 0 without down link"),
                    Some(down) => {
                        assert!(layer > 0, "down link on layer 0");
                        assert!(lower.contains(&down), "down link leaves layer {}", layer - 1);
                        assert!(list.order.equal(&list.nodes[down].value, &node.value));
                    }
                }
                ids.push(id);
                prev = Some(id);
                current = node.next;
            }
            assert!(!ids.is_empty(), "empty layer {} left in the table", layer);
            if layer == 0 {
                assert_eq!(ids.len(), list.len, "size does not match layer 0");
            }
            total_nodes += ids.len();
            lower = ids.into_iter().collect();
        }

        if list.layers.is_empty() {
            assert_eq!(list.len, 0);
        }
        assert_eq!(total_nodes, list.nodes.len(), "arena holds unlinked nodes");
    }

    fn scripted(outcomes: &[bool]) -> SkipList<i32, NaturalOrder, ScriptedCoin> {
        SkipList::with_parts(0.5, NaturalOrder, ScriptedCoin::new(outcomes.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_insert_and_contains_basic() {
        init_logger();

        let mut list = SkipList::new();

        list.insert(5);
        list.insert(3);
        list.insert(8);
        list.insert(1);

        assert_eq!(list.to_vec(), vec![1, 3, 5, 8]);
        assert_eq!(list.len(), 4);

        assert!(list.remove(&3));
        assert_eq!(list.to_vec(), vec![1, 5, 8]);
        assert_eq!(list.len(), 3);

        assert!(!list.remove(&99));
        assert_eq!(list.len(), 3);

        assert!(list.contains(&8));
        assert!(!list.contains(&3));
        assert_integrity(&list);
    }

    #[test]
    fn test_insert_sorted_order() {
        init_logger();

        let mut list = SkipList::new();
        for i in 1..=10 {
            list.insert(i);
        }

        for i in 1..=10 {
            assert!(list.contains(&i));
        }
        assert!(!list.contains(&11));
        assert_eq!(list.to_vec(), (1..=10).collect::<Vec<_>>());
        assert_integrity(&list);
    }

    #[test]
    fn test_insert_reverse_order() {
        init_logger();

        let mut list = SkipList::new();
        for i in (1..=10).rev() {
            list.insert(i);
        }

        for i in 1..=10 {
            assert!(list.contains(&i));
        }
        assert!(!list.contains(&0));
        assert_eq!(list.to_vec(), (1..=10).collect::<Vec<_>>());
        assert_integrity(&list);
    }

    #[test]
    fn test_duplicates_are_kept() {
        init_logger();

        let mut list = SkipList::seeded(1.0, 3).unwrap();
        for value in [4, 1, 4, 2, 4, 1] {
            list.insert(value);
        }
        assert_eq!(list.to_vec(), vec![1, 1, 2, 4, 4, 4]);
        assert_integrity(&list);

        assert!(list.remove(&4));
        assert_eq!(list.to_vec(), vec![1, 1, 2, 4, 4]);
        assert!(list.remove(&4));
        assert!(list.remove(&4));
        assert!(!list.remove(&4));
        assert!(!list.contains(&4));
        assert_eq!(list.to_vec(), vec![1, 1, 2]);
        assert_integrity(&list);
    }

    #[test]
    fn test_equal_values_keep_insertion_order() {
        init_logger();

        // Orders by the number only; the tag tells the occurrences apart.
        let by_number = |a: &(i32, char), b: &(i32, char)| a.0 < b.0;
        let mut list: SkipList<(i32, char), _, _> =
            SkipList::with_parts(0.5, by_number, RngCoin::seeded(11)).unwrap();
        for item in [(2, 'a'), (1, 'a'), (2, 'b'), (3, 'a'), (2, 'c')] {
            list.insert(item);
        }
        assert_eq!(
            list.to_vec(),
            vec![(1, 'a'), (2, 'a'), (2, 'b'), (2, 'c'), (3, 'a')]
        );
        assert!(list.contains(&(2, 'z')));
        assert_integrity(&list);
    }

    #[test]
    fn test_search_nonexistent_values() {
        init_logger();

        let mut list = SkipList::new();
        list.insert(10);
        list.insert(20);
        list.insert(30);

        for value in [5, 15, 25, 35] {
            assert!(!list.contains(&value), "{} should not be found", value);
            assert!(!list.remove(&value));
        }
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_large_number_of_elements() {
        init_logger();

        let mut list = SkipList::seeded(0.5, 2024).unwrap();
        let num_elements = 1000;
        for i in 1..=num_elements {
            list.insert(i);
        }

        for i in 1..=num_elements {
            assert!(list.contains(&i));
        }
        for missing in [0, num_elements + 1, num_elements + 100] {
            assert!(!list.contains(&missing), "{} should not be found", missing);
        }
        assert!(list.height() <= height_cap(num_elements as usize) + 1);
        assert_integrity(&list);
    }

    #[test]
    fn test_random_insertions_and_removals() {
        init_logger();

        let mut list = SkipList::new();
        let mut rng = rand::thread_rng();
        let mut reference: Vec<i32> = Vec::new();

        for _ in 0..500 {
            let value = rng.gen_range(0..200);
            if rng.gen_bool(0.6) {
                list.insert(value);
                let at = reference.partition_point(|v| *v <= value);
                reference.insert(at, value);
            } else {
                let removed = list.remove(&value);
                match reference.iter().position(|v| *v == value) {
                    Some(at) => {
                        assert!(removed);
                        reference.remove(at);
                    }
                    None => assert!(!removed),
                }
            }
            assert_eq!(list.len(), reference.len());
        }

        assert_eq!(list.to_vec(), reference);
        assert_integrity(&list);
    }

    #[test]
    fn test_insert_then_remove_round_trip() {
        init_logger();

        let mut list = SkipList::seeded(0.5, 99).unwrap();
        list.extend([7, 3, 3, 9, 1, 5]);
        let before = list.to_vec();

        for value in [0, 3, 6, 10] {
            list.insert(value);
            assert!(list.remove(&value));
            assert_eq!(list.to_vec(), before);
        }
        assert_integrity(&list);
    }

    #[test]
    fn test_scripted_promotions_shape_layers() {
        init_logger();

        let mut list = scripted(&[true, true, true]);

        // Lists of size 1 and 2 never promote, so no flips are consumed.
        list.insert(10);
        list.insert(20);
        assert_eq!(list.coin.remaining(), 3);
        assert_eq!(list.height(), 1);

        // floor(ln 3) = 1: one promotion allowed, opens layer 1.
        list.insert(30);
        assert_eq!(list.coin.remaining(), 2);
        assert_eq!(list.height(), 2);
        assert_eq!(layer_values(&list, 1), vec![30]);

        // Smaller than every head: becomes the head of both layers.
        list.insert(5);
        assert_eq!(layer_values(&list, 0), vec![5, 10, 20, 30]);
        assert_eq!(layer_values(&list, 1), vec![5, 30]);

        // Attaches after the breadcrumb left on layer 1.
        list.insert(25);
        assert_eq!(list.coin.remaining(), 0);
        assert_eq!(layer_values(&list, 0), vec![5, 10, 20, 25, 30]);
        assert_eq!(layer_values(&list, 1), vec![5, 25, 30]);
        assert_integrity(&list);

        // Coin exhausted, stays on layer 0.
        list.insert(15);
        assert_eq!(layer_values(&list, 1), vec![5, 25, 30]);

        assert!(list.remove(&30));
        assert_eq!(layer_values(&list, 1), vec![5, 25]);
        assert!(list.remove(&5));
        assert_eq!(layer_values(&list, 0), vec![10, 15, 20, 25]);
        assert_eq!(layer_values(&list, 1), vec![25]);
        assert_integrity(&list);

        // Draining layer 1 drops it from the table.
        assert!(list.remove(&25));
        assert_eq!(list.height(), 1);
        assert_eq!(list.to_vec(), vec![10, 15, 20]);
        assert_integrity(&list);
    }

    #[test]
    fn test_height_cap_follows_natural_log() {
        init_logger();

        // Every flip succeeds, so each insert climbs to the cap.
        let mut list = SkipList::seeded(1.0, 5).unwrap();
        for i in 1..=20 {
            list.insert(i);
            assert_eq!(list.height(), height_cap(i as usize) + 1);
        }
        assert_eq!(list.height(), 3);

        // ln 21 > 3
        list.insert(21);
        assert_eq!(list.height(), 4);
        assert_eq!(layer_values(&list, 3), vec![21]);
        assert_integrity(&list);
    }

    #[test]
    fn test_zero_probability_stays_flat() {
        init_logger();

        let mut list = SkipList::seeded(0.0, 1).unwrap();
        for i in (0..100).rev() {
            list.insert(i);
        }
        assert_eq!(list.height(), 1);
        assert_integrity(&list);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        for p in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(SkipList::<i32>::with_probability(p).is_err());
        }
        assert_eq!(SkipList::<i32>::with_probability(0.25).unwrap().probability(), 0.25);
        assert_eq!(SkipList::<i32>::new().probability(), DEFAULT_PROBABILITY);
    }

    #[test]
    fn test_skiplist_empty() {
        init_logger();

        let mut list: SkipList<i32> = SkipList::new();
        assert!(!list.contains(&1));
        assert!(!list.remove(&0));
        assert!(list.is_empty());
        assert_eq!(list.height(), 0);
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.iter().next(), None);
        list.clear();
        assert_integrity(&list);
    }

    #[test]
    fn test_skiplist_single_element() {
        init_logger();

        let mut list = SkipList::new();
        list.insert(42);

        assert!(list.contains(&42));
        assert!(!list.contains(&41));
        assert!(!list.contains(&43));
        assert_eq!(list.first(), Some(&42));
        assert_eq!(list.last(), Some(&42));

        assert!(list.remove(&42));
        assert!(list.is_empty());
        assert_eq!(list.height(), 0);
        assert_integrity(&list);
    }

    #[test]
    fn test_clear_is_idempotent() {
        init_logger();

        let mut list = SkipList::seeded(0.5, 8).unwrap();
        list.extend(0..50);
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.to_vec().is_empty());
        assert!(!list.contains(&10));
        list.clear();
        assert_eq!(list.len(), 0);
        assert_integrity(&list);

        // Usable again afterwards.
        list.insert(3);
        assert_eq!(list.to_vec(), vec![3]);
    }

    #[test]
    fn test_first_last_and_iter() {
        let mut values: Vec<i32> = (0..300).collect();
        values.shuffle(&mut rand::thread_rng());
        let list: SkipList<i32> = values.into_iter().collect();

        assert_eq!(list.first(), Some(&0));
        assert_eq!(list.last(), Some(&299));

        let iter = list.iter();
        assert_eq!(iter.len(), 300);
        // Restartable: a clone walks from where it was taken.
        let again = iter.clone();
        assert!(iter.copied().eq(0..300));
        assert!(again.copied().eq(0..300));
        assert_eq!((&list).into_iter().count(), 300);
    }

    #[test]
    fn test_clone_rebuilds_independent_list() {
        init_logger();

        let mut original = SkipList::seeded(0.5, 17).unwrap();
        original.extend([9, 2, 7, 2, 5]);

        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_integrity(&copy);

        copy.insert(1);
        assert!(copy.remove(&9));
        assert_eq!(original.to_vec(), vec![2, 2, 5, 7, 9]);
        assert_eq!(copy.to_vec(), vec![1, 2, 2, 5, 7]);
        assert_ne!(copy, original);

        let mut target = SkipList::seeded(0.25, 1).unwrap();
        target.extend([100, 200]);
        target.clone_from(&original);
        assert_eq!(target.to_vec(), original.to_vec());
        assert_eq!(target.probability(), 0.25);
        assert_integrity(&target);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut source: SkipList<i32> = (1..=5).collect();
        let moved = std::mem::take(&mut source);
        assert!(source.is_empty());
        assert_eq!(source.height(), 0);
        assert_eq!(moved.to_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_panicking_comparator_leaves_list_intact() {
        init_logger();

        let touchy = |a: &i32, b: &i32| {
            if *a == 13 || *b == 13 {
                panic!("unlucky comparison");
            }
            a < b
        };
        let mut list: SkipList<i32, _, _> =
            SkipList::with_parts(1.0, touchy, RngCoin::seeded(4)).unwrap();
        list.extend([1, 5, 9, 20, 30, 40, 50]);
        let before = list.to_vec();
        let height = list.height();

        let result = panic::catch_unwind(AssertUnwindSafe(|| list.insert(13)));
        assert!(result.is_err());
        let result = panic::catch_unwind(AssertUnwindSafe(|| list.remove(&13)));
        assert!(result.is_err());

        assert_eq!(list.to_vec(), before);
        assert_eq!(list.height(), height);
        assert_integrity(&list);
    }

    #[test]
    fn test_print_formats() {
        let mut list: SkipList<i32> = SkipList::seeded(0.0, 1).unwrap();

        let mut out = Vec::new();
        list.print(&mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " Empty\n Size: 0\n\n");

        list.extend([5, 3, 8, 1]);

        let mut out = Vec::new();
        list.print(&mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " Layer 0: 1 3 5 8\n Size: 4\n\n");

        let mut out = Vec::new();
        list.print(&mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " 1 3 5 8\n\n");

        assert_eq!(list.to_string(), "1 3 5 8");
        assert_eq!(format!("{:?}", list), "[1, 3, 5, 8]");
    }

    #[test]
    fn test_print_all_layers() {
        let mut list = scripted(&[true]);
        list.extend([1, 2, 3]);

        let mut out = Vec::new();
        list.print(&mut out, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            " Layer 0: 1 2 3\n Layer 1: 3\n Size: 3\n\n"
        );
    }

    #[test]
    fn test_layer_integrity_after_many_operations() {
        init_logger();

        let mut list = SkipList::seeded(0.5, 31337).unwrap();
        let mut rng = rand::thread_rng();
        let mut inserted = Vec::new();

        for _ in 0..400 {
            let value = rng.gen_range(1..=1000);
            list.insert(value);
            inserted.push(value);
        }
        assert_integrity(&list);

        inserted.shuffle(&mut rng);
        for value in inserted.iter().take(250) {
            assert!(list.remove(value));
        }
        assert_eq!(list.len(), 150);
        assert_integrity(&list);

        for value in inserted.iter().skip(250) {
            assert!(list.remove(value));
        }
        assert!(list.is_empty());
        assert_eq!(list.height(), 0);
        assert_integrity(&list);
    }
}
