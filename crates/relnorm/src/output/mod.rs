//! Writing normalized tables for downstream loaders.

mod writer;

pub use writer::{OutputFormat, TableWriter};
