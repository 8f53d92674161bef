use std::{cmp::Ordering, fmt::Debug};

use log::trace;

use crate::{eq::PayloadEq, interval::Record};

/// The outcome of a successful [`remove_recurse()`] call.
#[derive(Debug)]
pub(crate) enum RemoveResult<V> {
    /// One of several records sharing a key was removed.
    ///
    /// The tree shape is unchanged, only the subtree max of the ancestors
    /// needs repairing.
    Record(V),

    /// The sole record of a node was removed, and the node itself was unlinked
    /// from the tree.
    ///
    /// Ancestors must repair their height, balance and subtree max.
    Node(V),
}

impl<V> RemoveResult<V> {
    pub(crate) fn into_value(self) -> V {
        match self {
            Self::Record(v) | Self::Node(v) => v,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<R, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<R, V>>>,
    right: Option<Box<Node<R, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0, an absent child is treated as -1.
    height: u8,

    /// The maximum upper bound of all records in the subtree rooted at this
    /// [`Node`].
    subtree_max: R,

    /// The lower bound shared by every record in this node.
    key: R,

    /// All records with a lower bound of `key`, in insertion order.
    ///
    /// Never empty.
    records: Vec<Record<R, V>>,
}

impl<R, V> Node<R, V> {
    pub(crate) fn new(record: Record<R, V>) -> Self
    where
        R: Clone,
    {
        Self {
            key: record.interval().low().clone(),
            subtree_max: record.interval().high().clone(),
            records: vec![record],
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Insert `record` into the subtree rooted at `self` as a new leaf node,
    /// rebalancing on the way back up.
    ///
    /// The caller must ensure no node with the record's lower bound already
    /// exists; [`Node::append()`] handles that case.
    pub(crate) fn insert(self: &mut Box<Self>, record: Record<R, V>)
    where
        R: Ord + Clone + Debug,
    {
        debug_assert!(self.find(record.interval().low()).is_none());

        let high = record.interval().high().clone();
        let child = if *record.interval().low() < self.key {
            &mut self.left
        } else {
            &mut self.right
        };

        match child {
            Some(v) => v.insert(record),
            None => {
                // Insert the record as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(record)));

                // A single new leaf below self cannot skew self by more than 1,
                // so no rebalancing is needed here.
                update_height(self);
                grow_subtree_max(self, high);
                return;
            }
        }

        grow_subtree_max(self, high);
        update_height(self);
        rebalance(self);

        // Invariant: the absolute difference between tree heights ("balance
        // factor") cannot exceed 1.
        debug_assert!(balance(self).abs() <= 1);
    }

    /// Append `record` to the existing node keyed by its lower bound, growing
    /// the subtree max of every ancestor if needed.
    ///
    /// Returns false if no such node exists.
    pub(crate) fn append(&mut self, record: Record<R, V>) -> bool
    where
        R: Ord + Clone,
    {
        let high = record.interval().high().clone();
        let child = match record.interval().low().cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Greater => &mut self.right,
            Ordering::Equal => {
                self.records.push(record);
                grow_subtree_max(self, high);
                return true;
            }
        };

        let appended = match child {
            Some(v) => v.append(record),
            None => false,
        };

        if appended {
            grow_subtree_max(self, high);
        }

        appended
    }

    /// Return the node with a key of `key`, if any.
    pub(crate) fn find(&self, key: &R) -> Option<&Self>
    where
        R: Ord,
    {
        let mut ptr = Some(self);
        while let Some(v) = ptr {
            ptr = match key.cmp(&v.key) {
                Ordering::Less => v.left(),
                Ordering::Equal => return Some(v),
                Ordering::Greater => v.right(),
            };
        }
        None
    }

    /// Append the payload of every record in this subtree that overlaps the
    /// closed interval `[low, high]` to `out`.
    ///
    /// Results are appended in ascending key order, and in insertion order
    /// for records sharing a key.
    pub(crate) fn search<'a>(&'a self, low: &R, high: &R, out: &mut Vec<&'a V>)
    where
        R: Ord,
    {
        // No record in this subtree ends at or after the query start.
        if *low > self.subtree_max {
            return;
        }

        if let Some(left) = self.left() {
            if left.subtree_max >= *low {
                left.search(low, high, out);
            }
        }

        // Every record here starts at "key", so only the upper bounds need
        // checking once the key is known to be within the query.
        if self.key <= *high && *low <= *self.node_high() {
            out.extend(
                self.records
                    .iter()
                    .filter(|r| r.interval().high() >= low)
                    .map(|r| r.data()),
            );
        }

        // All keys in the right subtree are > key > high.
        if *high < self.key {
            return;
        }

        if let Some(right) = self.right() {
            right.search(low, high, out);
        }
    }

    /// The largest upper bound of the records held in this node (excluding
    /// descendants).
    pub(crate) fn node_high(&self) -> &R
    where
        R: Ord,
    {
        debug_assert!(!self.records.is_empty());
        let (first, rest) = self
            .records
            .split_first()
            .expect("a node always holds at least one record");

        rest.iter()
            .map(|r| r.interval().high())
            .fold(first.interval().high(), |acc, v| acc.max(v))
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &R {
        &self.key
    }

    pub(crate) fn records(&self) -> &[Record<R, V>] {
        &self.records
    }

    pub(crate) fn subtree_max(&self) -> &R {
        &self.subtree_max
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the records it contains.
    pub(crate) fn into_records(self) -> Vec<Record<R, V>> {
        self.records
    }
}

/// The AVL height of `n`, where an absent node has a height of -1.
fn height<R, V>(n: Option<&Node<R, V>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

fn update_height<R, V>(n: &mut Node<R, V>) {
    n.height = n
        .left()
        .map(|v| v.height() + 1)
        .max(n.right().map(|v| v.height() + 1))
        .unwrap_or_default()
}

/// Recompute the subtree max of `n` from its own records and the (already
/// correct) subtree max of its children.
fn update_subtree_max<R, V>(n: &mut Node<R, V>)
where
    R: Ord + Clone,
{
    let new_max = n
        .left()
        .map(|v| v.subtree_max())
        .max(n.right().map(|v| v.subtree_max()))
        .map_or(n.node_high(), |child| child.max(n.node_high()))
        .clone();

    n.subtree_max = new_max;
}

/// Raise the subtree max of `n` to `high` if it is larger.
fn grow_subtree_max<R, V>(n: &mut Node<R, V>, high: R)
where
    R: Ord,
{
    if high > n.subtree_max {
        n.subtree_max = high;
    }
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<R, V>(n: &Node<R, V>) -> i16 {
    height(n.left()) - height(n.right())
}

/// Restore the AVL balance of the subtree rooted at `n`, rotating as needed.
///
/// The children of `n` must already be balanced and carry a correct subtree
/// max. If a rotation is performed, the subtree max of the three nodes
/// involved is recomputed before returning.
fn rebalance<R, V>(n: &mut Box<Node<R, V>>)
where
    R: Ord + Clone + Debug,
{
    match balance(n) {
        (2..) if n.left().map(balance).unwrap_or_default() >= 0 => {
            trace!("left-left rebalance at key {:?}", n.key);
            rotate_right(n);
        }
        (2..) => {
            trace!("left-right rebalance at key {:?}", n.key);
            n.left_mut().map(rotate_left);
            rotate_right(n);
        }
        (..=-2) if n.right().map(balance).unwrap_or_default() <= 0 => {
            trace!("right-right rebalance at key {:?}", n.key);
            rotate_left(n);
        }
        (..=-2) => {
            trace!("right-left rebalance at key {:?}", n.key);
            n.right_mut().map(rotate_right);
            rotate_left(n);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => return,
    }

    repair_after_rotation(n);
}

/// Recompute the subtree max of the root of a freshly rotated subtree and
/// both of its children.
///
/// A rotation moves records between subtrees, so the children are repaired
/// strictly before the new subtree root that depends on them.
fn repair_after_rotation<R, V>(n: &mut Node<R, V>)
where
    R: Ord + Clone,
{
    if let Some(sibling) = n.left_mut() {
        update_subtree_max(sibling);
    }
    if let Some(sibling) = n.right_mut() {
        update_subtree_max(sibling);
    }
    update_subtree_max(n);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// Only heights are maintained; the caller repairs the subtree max of the
/// affected nodes with [`repair_after_rotation()`].
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<R, V>(x: &mut Box<Node<R, V>>) {
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// Only heights are maintained; the caller repairs the subtree max of the
/// affected nodes with [`repair_after_rotation()`].
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<R, V>(y: &mut Box<Node<R, V>>) {
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);
}

/// Unlink and return the minimum (left-most) node of the subtree in `slot`,
/// linking its right child (if any) in its place and rebalancing every
/// ancestor on the path.
fn take_subtree_min<R, V>(slot: &mut Option<Box<Node<R, V>>>) -> Option<Box<Node<R, V>>>
where
    R: Ord + Clone + Debug,
{
    let node = slot.as_mut()?;

    if node.left.is_some() {
        let min = take_subtree_min(&mut node.left);
        rebalance_after_remove(node);
        return min;
    }

    // This is the end of the left edge.
    let right = node.right.take();
    let mut min = std::mem::replace(slot, right)?;
    min.height = 0;
    Some(min)
}

/// Excise the node in `slot` from the tree, returning the records it held.
///
/// A node with two children adopts the key and records of its in-order
/// successor, which is then removed from the right subtree instead. Otherwise
/// the sole child (if any) takes the place of the node in `slot`.
///
/// The caller is responsible for repairing the ancestors of `slot`.
fn excise<R, V>(slot: &mut Option<Box<Node<R, V>>>) -> Option<Vec<Record<R, V>>>
where
    R: Ord + Clone + Debug,
{
    let node = slot.as_mut()?;

    if node.left.is_some() && node.right.is_some() {
        let successor = take_subtree_min(&mut node.right)?;

        // Invariant: the successor is a leaf or has only a right child, which
        // was linked into its old position.
        debug_assert!(successor.left.is_none());
        debug_assert!(successor.right.is_none());

        let Node { key, records, .. } = *successor;
        trace!("replacing node {:?} with successor {:?}", node.key, key);

        node.key = key;
        let old = std::mem::replace(&mut node.records, records);

        rebalance_after_remove(node);
        return Some(old);
    }

    // Zero or one child: link the child (if any) to the parent.
    let child = node.left.take().or_else(|| node.right.take());
    let old = std::mem::replace(slot, child)?;

    trace!("unlinked node {:?}", old.key);
    Some(old.into_records())
}

/// Recurse into `slot`, removing the record with a lower bound of `low`, an
/// upper bound of `high` and a payload equal (according to `eq`) to `data`
/// from the subtree rooted at `slot`, if it exists.
///
/// Returns [`None`] if no such record is found.
///
/// If the record is the last one held by its node, the node is unlinked. The
/// `slot` may be the root pointer of the tree, in which case the root is
/// replaced (or cleared) in place.
pub(crate) fn remove_recurse<R, V, E>(
    slot: &mut Option<Box<Node<R, V>>>,
    low: &R,
    high: &R,
    data: &V,
    eq: &E,
) -> Option<RemoveResult<V>>
where
    R: Ord + Clone + Debug,
    E: PayloadEq<V>,
{
    let node = slot.as_mut()?;

    // Prune this subtree from the search if the maximum upper bound in the
    // subtree is less than the target upper bound. If true, this subtree
    // cannot contain the record.
    if node.subtree_max < *high {
        return None;
    }

    let ret = match low.cmp(&node.key) {
        Ordering::Less => remove_recurse(&mut node.left, low, high, data, eq)?,
        Ordering::Greater => remove_recurse(&mut node.right, low, high, data, eq)?,
        Ordering::Equal => {
            let idx = node
                .records
                .iter()
                .position(|r| r.interval().high() == high && eq.eq_payload(r.data(), data))?;

            if node.records.len() > 1 {
                let (_, v) = node.records.remove(idx).into_parts();
                update_subtree_max(node);
                return Some(RemoveResult::Record(v));
            }

            // This was the only record: the whole node goes.
            let mut records = excise(slot)?;
            debug_assert_eq!(records.len(), 1);
            let (_, v) = records.pop()?.into_parts();
            return Some(RemoveResult::Node(v));
        }
    };

    match ret {
        RemoveResult::Record(_) => update_subtree_max(node),
        RemoveResult::Node(_) => rebalance_after_remove(node),
    }

    Some(ret)
}

fn rebalance_after_remove<R, V>(v: &mut Box<Node<R, V>>)
where
    R: Ord + Clone + Debug,
{
    // Recompute the height of the relocated node.
    update_height(v);

    // And rebalance the subtree, which repairs the subtree max of the nodes
    // that were rotated.
    rebalance(v);

    update_subtree_max(v);

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after removing a value.
    debug_assert!(balance(v).abs() <= 1);
}
