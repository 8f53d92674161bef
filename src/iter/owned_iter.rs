use std::vec;

use crate::{
    interval::{Interval, Record},
    node::Node,
};

/// An iterator of owned `(interval, payload)` tuples, in ascending key order,
/// as the underlying tree `into_iter()` impl.
#[derive(Debug)]
pub struct IntoIter<R, V> {
    stack: Vec<Box<Node<R, V>>>,
    records: vec::IntoIter<Record<R, V>>,
}

impl<R, V> IntoIter<R, V> {
    pub(crate) fn new(root: Option<Box<Node<R, V>>>) -> Self {
        let mut this = Self {
            stack: vec![],
            records: Vec::new().into_iter(),
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<R, V>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<R, V> Iterator for IntoIter<R, V> {
    type Item = (Interval<R>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(r) = self.records.next() {
                return Some(r.into_parts());
            }

            let mut v = self.stack.pop()?;

            // Descend down the left side of the right hand child of this node,
            // if any.
            if let Some(right) = v.take_right() {
                self.push_subtree(right);
            }

            self.records = v.into_records().into_iter();
        }
    }
}
