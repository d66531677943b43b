use alloc::vec::Vec;
use ordered_float::{FloatCore, OrderedFloat};

/// Index of the shared sentinel leaf
const NIL: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Color {
    Red,
    Black,
}

/// A node of the tree, addressed by its index in the arena
#[derive(Debug, Clone, Copy)]
struct Node<T> {
    /// The stored value
    value: OrderedFloat<T>,
    /// Number of copies of `value` held by this node (multiset)
    count: usize,
    /// Total number of values in this subtree, duplicates included
    size: usize,
    parent: usize,
    left: usize,
    right: usize,
    color: Color,
}

impl<T: FloatCore> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: OrderedFloat(T::zero()),
            count: 0,
            size: 0,
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Black,
        }
    }
}

/// An order-statistic red-black tree over a flat node arena.
///
/// Holds a multiset of values with O(log n) insert, remove-by-value and
/// rank selection. Nodes live in a `Vec` and link to each other by index;
/// slots freed by removals are recycled, so after warm-up a sliding window
/// never allocates. Slot 0 is a black sentinel standing in for every leaf.
#[derive(Debug, Clone)]
pub struct RbTree<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    root: usize,
}

impl<T: FloatCore> RbTree<T> {
    /// Creates an empty tree with room for `capacity` distinct values
    pub fn new(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Total number of values stored, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes[self.root].size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Removes every value, keeping the arena allocation
    pub fn reset(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
        self.root = NIL;
    }

    /// Inserts one copy of `value`
    pub fn insert(&mut self, value: T) {
        let value = OrderedFloat(value);

        let mut parent = NIL;
        let mut current = self.root;
        while current != NIL {
            let node = &self.nodes[current];
            if value == node.value {
                self.nodes[current].count += 1;
                self.refresh_sizes_from(current);
                return;
            }
            parent = current;
            current = if value < node.value {
                node.left
            } else {
                node.right
            };
        }

        let idx = self.allocate(Node {
            value,
            count: 1,
            size: 1,
            parent,
            left: NIL,
            right: NIL,
            color: Color::Red,
        });

        if parent == NIL {
            self.root = idx;
        } else if value < self.nodes[parent].value {
            self.nodes[parent].left = idx;
        } else {
            self.nodes[parent].right = idx;
        }

        self.refresh_sizes_from(parent);
        self.fix_insert(idx);

        debug_assert!(self.verify_invariants());
    }

    /// Removes one copy of `value`
    ///
    /// # Returns
    ///
    /// * `bool` - `false` if `value` was not present
    pub fn remove(&mut self, value: T) -> bool {
        let Some(z) = self.find(OrderedFloat(value)) else {
            return false;
        };

        if self.nodes[z].count > 1 {
            self.nodes[z].count -= 1;
            self.refresh_sizes_from(z);
            return true;
        }

        self.delete(z);
        debug_assert!(self.verify_invariants());
        true
    }

    /// Returns the value of 0-indexed ascending rank `k`
    pub fn select(&self, k: usize) -> Option<T> {
        if k >= self.len() {
            return None;
        }

        let mut current = self.root;
        let mut remaining = k;
        while current != NIL {
            let node = &self.nodes[current];
            let left_size = self.nodes[node.left].size;
            if remaining < left_size {
                current = node.left;
            } else if remaining < left_size + node.count {
                return Some(node.value.into_inner());
            } else {
                remaining -= left_size + node.count;
                current = node.right;
            }
        }
        None
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
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

    fn find(&self, value: OrderedFloat<T>) -> Option<usize> {
        let mut current = self.root;
        while current != NIL {
            let node = &self.nodes[current];
            match value.cmp(&node.value) {
                core::cmp::Ordering::Equal => return Some(current),
                core::cmp::Ordering::Less => current = node.left,
                core::cmp::Ordering::Greater => current = node.right,
            }
        }
        None
    }

    fn minimum(&self, mut node: usize) -> usize {
        while self.nodes[node].left != NIL {
            node = self.nodes[node].left;
        }
        node
    }

    #[inline]
    fn recalculate_size(&mut self, idx: usize) {
        let node = &self.nodes[idx];
        let size = node.count + self.nodes[node.left].size + self.nodes[node.right].size;
        self.nodes[idx].size = size;
    }

    /// Recomputes subtree sizes from `idx` up to the root
    fn refresh_sizes_from(&mut self, mut idx: usize) {
        while idx != NIL {
            self.recalculate_size(idx);
            idx = self.nodes[idx].parent;
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes[x].right;
        let y_left = self.nodes[y].left;

        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }

        let x_parent = self.nodes[x].parent;
        self.nodes[y].parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.nodes[x_parent].left {
            self.nodes[x_parent].left = y;
        } else {
            self.nodes[x_parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;

        self.recalculate_size(x);
        self.recalculate_size(y);
    }

    fn rotate_right(&mut self, y: usize) {
        let x = self.nodes[y].left;
        let x_right = self.nodes[x].right;

        self.nodes[y].left = x_right;
        if x_right != NIL {
            self.nodes[x_right].parent = y;
        }

        let y_parent = self.nodes[y].parent;
        self.nodes[x].parent = y_parent;
        if y_parent == NIL {
            self.root = x;
        } else if y == self.nodes[y_parent].left {
            self.nodes[y_parent].left = x;
        } else {
            self.nodes[y_parent].right = x;
        }

        self.nodes[x].right = y;
        self.nodes[y].parent = x;

        self.recalculate_size(y);
        self.recalculate_size(x);
    }

    fn fix_insert(&mut self, mut z: usize) {
        while self.nodes[self.nodes[z].parent].color == Color::Red {
            let parent = self.nodes[z].parent;
            let grandparent = self.nodes[parent].parent;

            if parent == self.nodes[grandparent].left {
                let uncle = self.nodes[grandparent].right;
                if self.nodes[uncle].color == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.nodes[parent].right {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.nodes[z].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.nodes[grandparent].left;
                if self.nodes[uncle].color == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.nodes[parent].left {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.nodes[z].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`
    ///
    /// Writes `v.parent` even when `v` is the sentinel; the delete fix-up reads it.
    fn transplant(&mut self, u: usize, v: usize) {
        let parent = self.nodes[u].parent;
        if parent == NIL {
            self.root = v;
        } else if u == self.nodes[parent].left {
            self.nodes[parent].left = v;
        } else {
            self.nodes[parent].right = v;
        }
        self.nodes[v].parent = parent;
    }

    fn delete(&mut self, z: usize) {
        let z_left = self.nodes[z].left;
        let z_right = self.nodes[z].right;
        let mut removed_color = self.nodes[z].color;
        let x;

        if z_left == NIL {
            x = z_right;
            self.transplant(z, z_right);
        } else if z_right == NIL {
            x = z_left;
            self.transplant(z, z_left);
        } else {
            let y = self.minimum(z_right);
            removed_color = self.nodes[y].color;
            x = self.nodes[y].right;

            if self.nodes[y].parent == z {
                self.nodes[x].parent = y;
            } else {
                self.transplant(y, x);
                self.nodes[y].right = z_right;
                self.nodes[z_right].parent = y;
            }

            self.transplant(z, y);
            self.nodes[y].left = z_left;
            self.nodes[z_left].parent = y;
            self.nodes[y].color = self.nodes[z].color;
        }

        // sizes must be exact before the fix-up rotations read them
        self.refresh_sizes_from(self.nodes[x].parent);

        if removed_color == Color::Black {
            self.fix_delete(x);
        }

        self.nodes[NIL] = Node::sentinel();
        self.free.push(z);
    }

    fn fix_delete(&mut self, mut x: usize) {
        while x != self.root && self.nodes[x].color == Color::Black {
            let parent = self.nodes[x].parent;

            if x == self.nodes[parent].left {
                let mut w = self.nodes[parent].right;
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[parent].color = Color::Red;
                    self.rotate_left(parent);
                    w = self.nodes[parent].right;
                }

                let w_left = self.nodes[w].left;
                let w_right = self.nodes[w].right;
                if self.nodes[w_left].color == Color::Black
                    && self.nodes[w_right].color == Color::Black
                {
                    self.nodes[w].color = Color::Red;
                    x = parent;
                } else {
                    if self.nodes[w_right].color == Color::Black {
                        self.nodes[w_left].color = Color::Black;
                        self.nodes[w].color = Color::Red;
                        self.rotate_right(w);
                        w = self.nodes[parent].right;
                    }
                    self.nodes[w].color = self.nodes[parent].color;
                    self.nodes[parent].color = Color::Black;
                    let w_right = self.nodes[w].right;
                    self.nodes[w_right].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.nodes[parent].left;
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[parent].color = Color::Red;
                    self.rotate_right(parent);
                    w = self.nodes[parent].left;
                }

                let w_left = self.nodes[w].left;
                let w_right = self.nodes[w].right;
                if self.nodes[w_right].color == Color::Black
                    && self.nodes[w_left].color == Color::Black
                {
                    self.nodes[w].color = Color::Red;
                    x = parent;
                } else {
                    if self.nodes[w_left].color == Color::Black {
                        self.nodes[w_right].color = Color::Black;
                        self.nodes[w].color = Color::Red;
                        self.rotate_left(w);
                        w = self.nodes[parent].left;
                    }
                    self.nodes[w].color = self.nodes[parent].color;
                    self.nodes[parent].color = Color::Black;
                    let w_left = self.nodes[w].left;
                    self.nodes[w_left].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self.nodes[x].color = Color::Black;
    }

    fn verify_invariants(&self) -> bool {
        self.nodes[self.root].color == Color::Black && self.black_height(self.root).is_some()
    }

    fn black_height(&self, idx: usize) -> Option<usize> {
        if idx == NIL {
            return Some(1);
        }

        let node = &self.nodes[idx];
        if node.color == Color::Red
            && (self.nodes[node.left].color == Color::Red
                || self.nodes[node.right].color == Color::Red)
        {
            return None;
        }
        if node.size != node.count + self.nodes[node.left].size + self.nodes[node.right].size {
            return None;
        }

        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return None;
        }

        Some(left + usize::from(node.color == Color::Black))
    }
}
