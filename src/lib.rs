//! An augmented [AVL tree] of closed intervals, each carrying an opaque
//! payload.
//!
//! [`IntervalTree`] supports `O(log n)` insertion and removal, and overlap
//! queries in `O(k + log n)` time where `k` is the number of matching
//! records, by maintaining the maximum upper bound of every subtree across
//! all rotations.
//!
//! All records sharing a lower bound are stored in a single tree node, so the
//! same interval may be inserted any number of times with distinct payloads.
//! Payloads are compared only through a [`PayloadEq`] implementation, which
//! defaults to [`PartialEq`] and can be replaced with any closure.
//!
//! ```
//! use recavl::IntervalTree;
//!
//! let mut t = IntervalTree::new();
//!
//! t.insert(100, 150, "a")?;
//! t.insert(75, 100, "b")?;
//! t.insert(50, 75, "c")?;
//!
//! // Find all intervals that overlap [70, 80].
//! assert_eq!(t.search(&70, &80), [&"c", &"b"]);
//!
//! // Invalid intervals are rejected.
//! assert!(t.insert(10, 5, "d").is_err());
//! # Ok::<_, recavl::InvalidInterval>(())
//! ```
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    clippy::explicit_iter_loop,
    clippy::use_self,
    clippy::clone_on_ref_ptr,
    unreachable_pub
)]

mod eq;
mod error;
mod interval;
mod iter;
mod node;
mod tree;

pub use eq::*;
pub use error::*;
pub use interval::*;
pub use iter::IntoIter;
pub use tree::*;

#[cfg(test)]
mod test_utils;
