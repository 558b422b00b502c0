pub mod defs;

pub use defs::{Field, NewsItem, ParsingRule};
