use core::fmt;

/// Slot index of the head sentinel.
const HEAD: usize = 0;
/// Slot index of the tail sentinel.
const TAIL: usize = 1;

/// Opaque handle to a node in a [`List`].
///
/// A handle stays valid until the node it names is removed. After that the
/// slot may be reused by a later insertion, so callers must drop handles of
/// removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node in the doubly linked list.
///
/// Contains a value and the slot indices of the previous and next nodes.
/// Sentinel nodes carry no value.
struct Node<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Node {
            val: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A doubly linked list stored in a slot arena.
///
/// Nodes live in a `Vec` and link to each other by index, so no raw pointers
/// are involved. Slots 0 and 1 are the head and tail sentinels: they are
/// always present, never hold a value, and make every insertion and removal
/// a plain relink with no edge cases. Freed slots are recycled through a free
/// list.
///
/// The front of the list is the node right after the head sentinel, the back
/// is the node right before the tail sentinel.
pub struct List<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> List<T> {
        List::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub fn with_capacity(cap: usize) -> List<T> {
        let mut nodes = Vec::with_capacity(cap + 2);
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        List {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of values in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `idx` names a live, non-sentinel node.
    #[inline]
    fn is_live(&self, idx: usize) -> bool {
        idx != HEAD
            && idx != TAIL
            && self
                .nodes
                .get(idx)
                .map(|node| node.val.is_some())
                .unwrap_or(false)
    }

    /// Stores `val` in a fresh or recycled slot, unlinked.
    fn alloc(&mut self, val: T) -> usize {
        let node = Node {
            val: Some(val),
            prev: HEAD,
            next: TAIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Links the unlinked node `idx` directly after `at`.
    fn link_after(&mut self, at: usize, idx: usize) {
        let next = self.nodes[at].next;
        self.nodes[idx].prev = at;
        self.nodes[idx].next = next;
        self.nodes[next].prev = idx;
        self.nodes[at].next = idx;
    }

    /// Unlinks `idx` from its neighbours, leaving its value in place.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Inserts `val` at the front of the list and returns its handle.
    pub fn push_front(&mut self, val: T) -> NodeId {
        let idx = self.alloc(val);
        self.link_after(HEAD, idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Inserts `val` at the back of the list and returns its handle.
    pub fn push_back(&mut self, val: T) -> NodeId {
        let idx = self.alloc(val);
        let last = self.nodes[TAIL].prev;
        self.link_after(last, idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Removes the node named by `id` and returns its value.
    ///
    /// Returns `None` if `id` does not name a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }
        self.unlink(id.0);
        let val = self.nodes[id.0].val.take();
        self.free.push(id.0);
        self.len -= 1;
        val
    }

    /// Removes and returns the value at the front of the list.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.nodes[HEAD].next;
        self.remove(NodeId(first))
    }

    /// Removes and returns the value at the back of the list.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.nodes[TAIL].prev;
        self.remove(NodeId(last))
    }

    /// Moves the node named by `id` to the front of the list.
    ///
    /// Returns `false` and leaves the list untouched if `id` is not live.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.is_live(id.0) {
            return false;
        }
        if self.nodes[HEAD].next != id.0 {
            self.unlink(id.0);
            self.link_after(HEAD, id.0);
        }
        true
    }

    /// Iterates values from front to back. Reverse with `.rev()`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.nodes[HEAD].next,
            back: self.nodes[TAIL].prev,
            remaining: self.len,
        }
    }

    /// Removes every value, keeping only the sentinels.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
        self.len = 0;
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.nodes.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Iterator over a [`List`], front to back.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.val.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
