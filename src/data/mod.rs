//! Input records and file loading

pub mod loader;
pub mod records;

pub use records::{EdgeRecord, LoggedEdge, MembershipRecord};
