//! Markdown outline engine
//!
//! Parses ATX headings into a heading forest and provides the operations a
//! document navigator needs on top of it.

pub mod error;
pub mod navigator;
pub mod outline;

pub use error::StoreError;
pub use navigator::{ExpansionStore, JsonFileStore, MemoryStore, OutlineNavigator};
pub use outline::{
    flatten, generate_toc, generate_toc_with, line_from_position, parse, parse_value,
    position_from_line, search, statistics, AnchorStyle, FlatHeadingEntry, HeadingNode,
    OutlineStatistics, TocOptions,
};
