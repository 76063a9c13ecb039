//! Plain sorted containers the skip list is measured and checked against.

use crate::sorted::SortedCollection;
use std::iter;
use std::mem;

/// Sorted `Vec` using binary search for every operation.
#[derive(Clone, Debug)]
pub struct SortedVec<T> {
    values: Vec<T>,
}

impl<T: PartialOrd + Clone> SortedVec<T> {
    pub fn new() -> Self {
        SortedVec { values: Vec::new() }
    }

    /// Index of the first value not less than `value`.
    fn lower_bound(&self, value: &T) -> usize {
        self.values.partition_point(|v| v < value)
    }

    /// Index just past the last value not greater than `value`.
    fn upper_bound(&self, value: &T) -> usize {
        self.values.partition_point(|v| !(value < v))
    }
}

impl<T: PartialOrd + Clone> Default for SortedVec<T> {
    fn default() -> Self {
        SortedVec::new()
    }
}

impl<T: PartialOrd + Clone> SortedCollection<T> for SortedVec<T> {
    fn name(&self) -> &'static str {
        "sorted vector list"
    }

    fn insert(&mut self, value: T) {
        // Equal values keep insertion order, same as the skip list.
        let at = self.upper_bound(&value);
        self.values.insert(at, value);
    }

    fn remove(&mut self, value: &T) -> bool {
        let at = self.lower_bound(value);
        match self.values.get(at) {
            Some(found) if !(value < found) => {
                self.values.remove(at);
                true
            }
            _ => false,
        }
    }

    fn contains(&self, value: &T) -> bool {
        let at = self.lower_bound(value);
        matches!(self.values.get(at), Some(found) if !(value < found))
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }
}

struct Node<T> {
    data: T,
    next: Option<Box<Node<T>>>,
}

// Unlinks one node at a time so long lists don't recurse on drop.
fn unlink_all<T>(head: &mut Option<Box<Node<T>>>) {
    let mut curr = head.take();
    while let Some(mut node) = curr {
        curr = node.next.take();
    }
}

/// Singly linked list kept in order by linear scans.
pub struct SortedLinkedList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: PartialOrd + Clone> SortedLinkedList<T> {
    pub fn new() -> Self {
        SortedLinkedList { head: None, len: 0 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        iter::successors(self.head.as_deref(), |node| node.next.as_deref())
            .map(|node| &node.data)
    }
}

impl<T: PartialOrd + Clone> Default for SortedLinkedList<T> {
    fn default() -> Self {
        SortedLinkedList::new()
    }
}

impl<T: PartialOrd + Clone> SortedCollection<T> for SortedLinkedList<T> {
    fn name(&self) -> &'static str {
        "sorted linked list"
    }

    fn insert(&mut self, data: T) {
        let mut curr = &mut self.head;

        loop {
            match curr {
                None => {
                    // Reached the end of the list, insert here
                    *curr = Some(Box::new(Node { data, next: None }));
                    break;
                }
                Some(ref mut node) if data < node.data => {
                    // Found the correct position, insert before this node
                    let new_node = Box::new(Node {
                        data,
                        next: mem::replace(curr, None),
                    });
                    *curr = Some(new_node);
                    break;
                }
                Some(ref mut node) => {
                    curr = &mut node.next;
                }
            }
        }
        self.len += 1;
    }

    fn remove(&mut self, value: &T) -> bool {
        let mut curr = &mut self.head;
        while curr.as_ref().map_or(false, |node| node.data < *value) {
            curr = &mut curr.as_mut().unwrap().next;
        }

        match curr {
            Some(node) if !(*value < node.data) => {
                let next = node.next.take();
                *curr = next;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    fn contains(&self, value: &T) -> bool {
        self.iter()
            .take_while(|data| !(*value < **data))
            .any(|data| !(*data < *value))
    }

    fn clear(&mut self) {
        unlink_all(&mut self.head);
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Drop for SortedLinkedList<T> {
    fn drop(&mut self) {
        unlink_all(&mut self.head);
    }
}
