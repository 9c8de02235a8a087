//! Outline engine - turns markdown text into a navigable heading forest

mod header;
mod inline;
mod normalize;
mod position;
mod tree;
mod utils;

pub use header::{match_header, HeaderMatch};
pub use inline::clean_header_text;
pub use normalize::normalize_line_endings;
pub use position::{line_from_position, position_from_line};
pub use tree::{build_hierarchy, heading_id, parse, parse_value, FlatHeadingEntry, HeadingNode};
pub use utils::{
    flatten, generate_toc, generate_toc_with, search, statistics, AnchorStyle, OutlineStatistics,
    TocOptions,
};
