use std::fmt::Debug;

use log::debug;

use crate::{
    eq::{PayloadEq, StructuralEq},
    interval::{Interval, Record},
    iter::{InOrderIter, IntoIter, PreOrderIter},
    node::{remove_recurse, Node},
    InvalidInterval,
};

/// An augmented AVL tree of closed intervals, each carrying a payload.
///
/// All records sharing a lower bound are held in a single node, so the same
/// interval may be stored many times as long as the payloads differ (as
/// decided by `E`, see [`PayloadEq`]).
///
/// ```
/// use recavl::IntervalTree;
///
/// let mut t = IntervalTree::new();
///
/// t.insert(50, 150, "data1")?;
/// t.insert(50, 100, "data2")?;
/// t.insert(10, 20, "data3")?;
///
/// assert_eq!(t.search(&75, &100), [&"data1", &"data2"]);
/// assert_eq!(t.search(&125, &150), [&"data1"]);
/// assert_eq!(t.len(), 3);
///
/// assert!(t.remove(&50, &150, &"data1"));
/// assert!(t.search(&125, &150).is_empty());
/// # Ok::<_, recavl::InvalidInterval>(())
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<R, V, E = StructuralEq> {
    root: Option<Box<Node<R, V>>>,
    count: usize,
    eq: E,
}

impl<R, V, E> Default for IntervalTree<R, V, E>
where
    E: Default,
{
    fn default() -> Self {
        Self::with_eq(E::default())
    }
}

impl<R, V> IntervalTree<R, V, StructuralEq> {
    /// Construct an empty tree, comparing payloads with [`PartialEq`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R, V, E> IntervalTree<R, V, E> {
    /// Construct an empty tree, comparing payloads with `eq`.
    pub fn with_eq(eq: E) -> Self {
        Self {
            root: None,
            count: 0,
            eq,
        }
    }

    /// The number of records stored in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove all records from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    /// Iterate over all payloads, yielding the records of each node (in
    /// insertion order) before those of its left and then right subtrees.
    pub fn pre_order(&self) -> impl Iterator<Item = &V> {
        PreOrderIter::new(self.root.as_deref()).map(|v| v.data())
    }

    /// Iterate over all payloads in ascending lower bound order.
    ///
    /// Payloads of intervals sharing a lower bound are yielded in insertion
    /// order.
    pub fn in_order(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Iterate over all `(interval, payload)` tuples in the same order as
    /// [`IntervalTree::in_order()`].
    pub fn iter(&self) -> impl Iterator<Item = (&Interval<R>, &V)> {
        InOrderIter::new(self.root.as_deref()).map(|v| (v.interval(), v.data()))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<R, V>> {
        self.root.as_deref()
    }
}

impl<R, V, E> IntervalTree<R, V, E>
where
    R: Ord + Clone + Debug,
    E: PayloadEq<V>,
{
    /// Insert `data` against the closed interval `[low, high]`.
    ///
    /// Returns `Ok(false)` without modifying the tree if an identical record
    /// (same bounds, equal payload) already exists.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] if `low > high`; the tree is left
    /// unchanged.
    pub fn insert(&mut self, low: R, high: R, data: V) -> Result<bool, InvalidInterval> {
        let record = Record::new(Interval::new(low, high)?, data);

        let root = match self.root {
            Some(ref mut v) => v,
            None => {
                self.root = Some(Box::new(Node::new(record)));
                self.count += 1;
                return Ok(true);
            }
        };

        match root.find(record.interval().low()) {
            Some(n) if holds_record(&self.eq, n, &record) => {
                debug!("rejecting duplicate record {:?}", record.interval());
                return Ok(false);
            }
            Some(_) => {
                let appended = root.append(record);
                debug_assert!(appended);
            }
            None => root.insert(record),
        }

        self.count += 1;
        Ok(true)
    }

    /// Return true if a record with the given bounds and an equal payload is
    /// stored in the tree.
    pub fn contains(&self, low: &R, high: &R, data: &V) -> bool {
        self.root
            .as_ref()
            .and_then(|v| v.find(low))
            .map(|n| {
                n.records()
                    .iter()
                    .any(|r| r.interval().high() == high && self.eq.eq_payload(r.data(), data))
            })
            .unwrap_or_default()
    }

    /// Remove the record with the given bounds and an equal payload, returning
    /// the stored payload.
    pub fn take(&mut self, low: &R, high: &R, data: &V) -> Option<V> {
        let v = remove_recurse(&mut self.root, low, high, data, &self.eq)?.into_value();
        self.count -= 1;
        Some(v)
    }

    /// Remove the record with the given bounds and an equal payload.
    ///
    /// Returns true if a record was removed.
    pub fn remove(&mut self, low: &R, high: &R, data: &V) -> bool {
        self.take(low, high, data).is_some()
    }
}

/// Returns true if `n` holds a record with the same upper bound as `record`
/// and a payload equal to it according to `eq`.
fn holds_record<R, V, E>(eq: &E, n: &Node<R, V>, record: &Record<R, V>) -> bool
where
    R: PartialEq,
    E: PayloadEq<V>,
{
    n.records().iter().any(|r| {
        r.interval().high() == record.interval().high()
            && eq.eq_payload(r.data(), record.data())
    })
}

impl<R, V, E> IntervalTree<R, V, E>
where
    R: Ord + Debug,
{
    /// Return the payloads of all records overlapping the closed interval
    /// `[low, high]`, ordered by ascending lower bound (and insertion order
    /// for records sharing a lower bound).
    ///
    /// An inverted query (`low > high`) is not rejected: it returns exactly
    /// the records `r` where `r.low <= high` and `r.high >= low`.
    pub fn search(&self, low: &R, high: &R) -> Vec<&V> {
        if low > high {
            debug!("search with inverted query range {low:?} > {high:?}");
        }

        let mut out = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.search(low, high, &mut out);
        }
        out
    }

    /// Return the payloads of all records overlapping `query`.
    ///
    /// See [`IntervalTree::search()`].
    pub fn search_interval(&self, query: &Interval<R>) -> Vec<&V> {
        self.search(query.low(), query.high())
    }
}

impl<R, V, E> IntoIterator for IntervalTree<R, V, E> {
    type Item = (Interval<R>, V);
    type IntoIter = IntoIter<R, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}
