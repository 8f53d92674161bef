/// Decides whether two payloads are the same record for the purposes of
/// duplicate detection and removal.
///
/// An [`IntervalTree`] never inspects payloads other than through this trait.
/// Any `Fn(&V, &V) -> bool` closure implements it:
///
/// ```
/// use recavl::IntervalTree;
///
/// // Match payloads case-insensitively.
/// let mut t: IntervalTree<u32, String, _> =
///     IntervalTree::with_eq(|a: &String, b: &String| a.eq_ignore_ascii_case(b));
///
/// assert_eq!(t.insert(1, 5, "Bananas".to_string()), Ok(true));
/// assert_eq!(t.insert(1, 5, "BANANAS".to_string()), Ok(false));
/// assert!(t.remove(&1, &5, &"bananas".to_string()));
/// ```
///
/// [`IntervalTree`]: crate::IntervalTree
pub trait PayloadEq<V> {
    /// Returns true if `a` and `b` identify the same payload.
    fn eq_payload(&self, a: &V, b: &V) -> bool;
}

/// The default [`PayloadEq`], delegating to the payload's [`PartialEq`] impl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructuralEq;

impl<V> PayloadEq<V> for StructuralEq
where
    V: PartialEq,
{
    fn eq_payload(&self, a: &V, b: &V) -> bool {
        a == b
    }
}

impl<V, F> PayloadEq<V> for F
where
    F: Fn(&V, &V) -> bool,
{
    fn eq_payload(&self, a: &V, b: &V) -> bool {
        self(a, b)
    }
}
