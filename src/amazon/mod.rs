//! Amazon-specific modules for sessions, extraction, and data models.

pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;
pub mod session;

pub use models::{DetailRecord, MergedListing, RawListing};
pub use regions::Region;
pub use session::{HttpPageProvider, HttpSession, PageProvider, Session};
