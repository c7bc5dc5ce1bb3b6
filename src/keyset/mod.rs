//! Key contributors and their share of the files they touched.

mod selector;
mod shares;

pub use selector::{DEFAULT_THRESHOLD, NodeClass, rank, select};
pub use shares::{contribution_shares, round2};
