use std::ops::{Index, IndexMut};

/// One occurrence of a value on one layer. Links are indices into the
/// owning [`Arena`].
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub value: T,
    pub next: Option<usize>,
    pub prev: Option<usize>,
    // Same value one layer below, `None` on layer 0.
    pub down: Option<usize>,
}

impl<T> Node<T> {
    pub fn new(value: T, prev: Option<usize>, next: Option<usize>, down: Option<usize>) -> Self {
        Node {
            value,
            next,
            prev,
            down,
        }
    }
}

/// Slab of nodes addressed by stable indices. Released slots are recycled
/// by later allocations.
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Takes the node out of its slot and makes the slot available again.
    pub fn release(&mut self, index: usize) -> Node<T> {
        let node = self.slots[index]
            .take()
            .unwrap_or_else(|| panic!("node {} released twice", index));
        self.free.push(index);
        node
    }

    /// Number of live nodes across all layers.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, index: usize) -> &Node<T> {
        match self.slots.get(index) {
            Some(Some(node)) => node,
            _ => panic!("dangling node index {}", index),
        }
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Node<T> {
        match self.slots.get_mut(index) {
            Some(Some(node)) => node,
            _ => panic!("dangling node index {}", index),
        }
    }
}
