//! Testing utilities and mock implementations
//!
//! Mock collaborators for exercising the fetch-backed parts of chatblocks
//! without network access.

pub mod mocks;

pub use mocks::*;
