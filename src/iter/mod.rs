mod in_order;
mod owned_iter;
mod pre_order;

pub(crate) use in_order::*;
pub use owned_iter::*;
pub(crate) use pre_order::*;
