use std::slice;

use crate::{interval::Record, node::Node};

/// A depth-first, in-order walk of a subtree, yielding each node's records in
/// insertion order.
///
/// Records are yielded in ascending key order.
#[derive(Debug)]
pub(crate) struct InOrderIter<'a, R, V> {
    stack: Vec<&'a Node<R, V>>,
    records: slice::Iter<'a, Record<R, V>>,
}

impl<'a, R, V> InOrderIter<'a, R, V> {
    pub(crate) fn new(root: Option<&'a Node<R, V>>) -> Self {
        let mut this = Self {
            stack: vec![],
            records: [].iter(),
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<R, V>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, R, V> Iterator for InOrderIter<'a, R, V> {
    type Item = &'a Record<R, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(r) = self.records.next() {
                return Some(r);
            }

            let v = self.stack.pop()?;

            // Descend down the left side of the right hand child of this node,
            // if any.
            if let Some(right) = v.right() {
                self.push_subtree(right);
            }

            self.records = v.records().iter();
        }
    }
}
