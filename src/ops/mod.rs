//! Revision-chain algorithms, generic over the revision store.

pub mod compact;
pub mod get;
pub mod insert;
pub mod remove;
