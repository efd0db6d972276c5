//! Loading delimited text files into tables.

mod parser;

pub use parser::{Parser, ParserConfig, detect_delimiter};
