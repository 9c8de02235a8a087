//! Navigator - the consuming side of the outline: selection, folding, cursor targets

mod store;
mod view;

pub use store::{ExpansionStore, JsonFileStore, MemoryStore};
pub use view::OutlineNavigator;
