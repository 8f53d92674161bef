use std::slice;

use crate::{interval::Record, node::Node};

/// A depth-first, pre-order walk of a subtree: the records of a node are
/// yielded (in insertion order) before those of its left subtree, followed by
/// its right subtree.
#[derive(Debug)]
pub(crate) struct PreOrderIter<'a, R, V> {
    stack: Vec<&'a Node<R, V>>,
    records: slice::Iter<'a, Record<R, V>>,
}

impl<'a, R, V> PreOrderIter<'a, R, V> {
    pub(crate) fn new(root: Option<&'a Node<R, V>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
            records: [].iter(),
        }
    }
}

impl<'a, R, V> Iterator for PreOrderIter<'a, R, V> {
    type Item = &'a Record<R, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(r) = self.records.next() {
                return Some(r);
            }

            let v = self.stack.pop()?;

            // Visit the left child before the right.
            self.stack.extend(v.right());
            self.stack.extend(v.left());

            self.records = v.records().iter();
        }
    }
}
