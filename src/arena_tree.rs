//! A DOM-like tree of nodes with parent and sibling links, allocated in a
//! [`typed_arena::Arena`](https://docs.rs/typed-arena/).
//!
//! Design after <https://github.com/SimonSapin/rust-forest> (MIT license).
//! Links are `Cell`s of arena references, so the tree can be rewired (append,
//! splice, detach) through shared references while the arena owns every node
//! for the lifetime `'a`.

use std::cell::Cell;
use std::fmt;

/// A node inside a tree of `T`s.
pub struct Node<'a, T: 'a> {
    parent: Cell<Option<&'a Node<'a, T>>>,
    previous_sibling: Cell<Option<&'a Node<'a, T>>>,
    next_sibling: Cell<Option<&'a Node<'a, T>>>,
    first_child: Cell<Option<&'a Node<'a, T>>>,
    last_child: Cell<Option<&'a Node<'a, T>>>,

    /// The data held by the node itself.
    pub data: T,
}

impl<'a, T> Node<'a, T> {
    /// Creates a new node with no relationships.
    pub fn new(data: T) -> Node<'a, T> {
        Node {
            parent: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            data,
        }
    }

    /// Returns the parent of this node, unless it is a root.
    pub fn parent(&self) -> Option<&'a Node<'a, T>> {
        self.parent.get()
    }

    /// Returns the first child, if any.
    pub fn first_child(&self) -> Option<&'a Node<'a, T>> {
        self.first_child.get()
    }

    /// Returns the last child, if any.
    pub fn last_child(&self) -> Option<&'a Node<'a, T>> {
        self.last_child.get()
    }

    /// Returns the previous sibling, unless it is a first child.
    pub fn previous_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.previous_sibling.get()
    }

    /// Returns the next sibling, unless it is a last child.
    pub fn next_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.next_sibling.get()
    }

    /// Detaches a node from its parent and siblings. Children are unaffected.
    pub fn detach(&self) {
        let parent = self.parent.take();
        let previous_sibling = self.previous_sibling.take();
        let next_sibling = self.next_sibling.take();

        if let Some(next_sibling) = next_sibling {
            next_sibling.previous_sibling.set(previous_sibling);
        } else if let Some(parent) = parent {
            parent.last_child.set(previous_sibling);
        }

        if let Some(previous_sibling) = previous_sibling {
            previous_sibling.next_sibling.set(next_sibling);
        } else if let Some(parent) = parent {
            parent.first_child.set(next_sibling);
        }
    }

    /// Appends a new child to this node, after existing children.
    pub fn append(&'a self, new_child: &'a Node<'a, T>) {
        new_child.detach();
        new_child.parent.set(Some(self));
        if let Some(last_child) = self.last_child.take() {
            new_child.previous_sibling.set(Some(last_child));
            debug_assert!(last_child.next_sibling.get().is_none());
            last_child.next_sibling.set(Some(new_child));
        } else {
            debug_assert!(self.first_child.get().is_none());
            self.first_child.set(Some(new_child));
        }
        self.last_child.set(Some(new_child));
    }

    /// Prepends a new child to this node, before existing children.
    pub fn prepend(&'a self, new_child: &'a Node<'a, T>) {
        new_child.detach();
        new_child.parent.set(Some(self));
        if let Some(first_child) = self.first_child.take() {
            debug_assert!(first_child.previous_sibling.get().is_none());
            first_child.previous_sibling.set(Some(new_child));
            new_child.next_sibling.set(Some(first_child));
        } else {
            debug_assert!(self.last_child.get().is_none());
            self.last_child.set(Some(new_child));
        }
        self.first_child.set(Some(new_child));
    }

    /// Inserts a new sibling after this node.
    pub fn insert_after(&'a self, new_sibling: &'a Node<'a, T>) {
        new_sibling.detach();
        new_sibling.parent.set(self.parent.get());
        new_sibling.previous_sibling.set(Some(self));
        if let Some(next_sibling) = self.next_sibling.take() {
            next_sibling.previous_sibling.set(Some(new_sibling));
            new_sibling.next_sibling.set(Some(next_sibling));
        } else if let Some(parent) = self.parent.get() {
            parent.last_child.set(Some(new_sibling));
        }
        self.next_sibling.set(Some(new_sibling));
    }

    /// Inserts a new sibling before this node.
    pub fn insert_before(&'a self, new_sibling: &'a Node<'a, T>) {
        new_sibling.detach();
        new_sibling.parent.set(self.parent.get());
        new_sibling.next_sibling.set(Some(self));
        if let Some(previous_sibling) = self.previous_sibling.take() {
            previous_sibling.next_sibling.set(Some(new_sibling));
            new_sibling.previous_sibling.set(Some(previous_sibling));
        } else if let Some(parent) = self.parent.get() {
            parent.first_child.set(Some(new_sibling));
        }
        self.previous_sibling.set(Some(new_sibling));
    }

    /// Returns an iterator over ancestors, starting with the node itself.
    pub fn ancestors(&'a self) -> Ancestors<'a, T> {
        Ancestors(Some(self))
    }

    /// Returns an iterator over children, in order.
    pub fn children(&'a self) -> Children<'a, T> {
        Children(self.first_child.get())
    }

    /// Returns an iterator over children, in reverse order.
    pub fn reverse_children(&'a self) -> ReverseChildren<'a, T> {
        ReverseChildren(self.last_child.get())
    }

    /// Returns an iterator over the node and its descendants, in tree order.
    pub fn descendants(&'a self) -> Descendants<'a, T> {
        Descendants(self.traverse())
    }

    /// Returns an iterator over edges (start/end of each node) in tree order,
    /// starting with the node itself.
    pub fn traverse(&'a self) -> Traverse<'a, T> {
        Traverse {
            root: self,
            next: Some(NodeEdge::Start(self)),
        }
    }
}

macro_rules! axis_iterator {
    (#[$attr:meta] $name:ident, $next:ident) => {
        #[$attr]
        pub struct $name<'a, T: 'a>(Option<&'a Node<'a, T>>);

        impl<'a, T> Iterator for $name<'a, T> {
            type Item = &'a Node<'a, T>;

            fn next(&mut self) -> Option<&'a Node<'a, T>> {
                let node = self.0.take()?;
                self.0 = node.$next.get();
                Some(node)
            }
        }
    };
}

axis_iterator! {
    /// An iterator of nodes to the root of the tree.
    Ancestors, parent
}
axis_iterator! {
    /// An iterator of the children of a node.
    Children, next_sibling
}
axis_iterator! {
    /// An iterator of the children of a node, in reverse order.
    ReverseChildren, previous_sibling
}

/// An iterator of nodes in tree order.
pub struct Descendants<'a, T: 'a>(Traverse<'a, T>);

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<&'a Node<'a, T>> {
        for edge in &mut self.0 {
            if let NodeEdge::Start(node) = edge {
                return Some(node);
            }
        }
        None
    }
}

/// An edge of a node seen during traversal: entering it, before any of its
/// descendants, or leaving it, after all of them.
#[derive(Debug, Clone, Copy)]
pub enum NodeEdge<'a, T: 'a> {
    /// Yielded when entering a node.
    Start(&'a Node<'a, T>),

    /// Yielded when leaving a node.
    End(&'a Node<'a, T>),
}

/// A tree-order iterator of node edges.
pub struct Traverse<'a, T: 'a> {
    root: &'a Node<'a, T>,
    next: Option<NodeEdge<'a, T>>,
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeEdge<'a, T>;

    fn next(&mut self) -> Option<NodeEdge<'a, T>> {
        let item = self.next.take()?;
        self.next = match item {
            NodeEdge::Start(node) => match node.first_child.get() {
                Some(child) => Some(NodeEdge::Start(child)),
                None => Some(NodeEdge::End(node)),
            },
            NodeEdge::End(node) => {
                if std::ptr::eq(node, self.root) {
                    None
                } else {
                    match node.next_sibling.get() {
                        Some(sibling) => Some(NodeEdge::Start(sibling)),
                        None => node.parent.get().map(NodeEdge::End),
                    }
                }
            }
        };
        Some(item)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Node<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.data, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use typed_arena::Arena;

    #[test]
    fn relationships() {
        let arena = Arena::new();
        let a: &Node<char> = arena.alloc(Node::new('a'));
        let b = &*arena.alloc(Node::new('b'));
        let c = &*arena.alloc(Node::new('c'));
        a.append(b);
        a.append(c);

        assert!(a.first_child().map_or(false, |n| n.data == 'b'));
        assert!(a.last_child().map_or(false, |n| n.data == 'c'));
        assert!(b.next_sibling().map_or(false, |n| n.data == 'c'));
        assert!(c.previous_sibling().map_or(false, |n| n.data == 'b'));

        b.detach();
        assert!(a.first_child().map_or(false, |n| n.data == 'c'));
        assert!(c.previous_sibling().is_none());
    }

    #[test]
    fn splicing() {
        let arena = Arena::new();
        let a: &Node<char> = arena.alloc(Node::new('a'));
        let b = &*arena.alloc(Node::new('b'));
        let c = &*arena.alloc(Node::new('c'));
        let d = &*arena.alloc(Node::new('d'));
        a.append(b);
        a.append(d);
        b.insert_after(c);

        let order: String = a.children().map(|n| n.data).collect();
        assert_eq!(order, "bcd");

        let reverse: String = a.reverse_children().map(|n| n.data).collect();
        assert_eq!(reverse, "dcb");
    }

    #[test]
    fn descendants_over_non_copy_data() {
        use std::cell::RefCell;

        let arena = Arena::new();
        let a: &Node<RefCell<String>> = arena.alloc(Node::new(RefCell::new("a".into())));
        let b = &*arena.alloc(Node::new(RefCell::new("b".into())));
        let c = &*arena.alloc(Node::new(RefCell::new("c".into())));
        a.append(b);
        b.append(c);

        let order: Vec<String> = a.descendants().map(|n| n.data.borrow().clone()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }
}
