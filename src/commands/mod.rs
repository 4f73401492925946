//! CLI command implementations.

pub mod product;
pub mod search;

pub use product::ProductCommand;
pub use search::SearchCommand;
