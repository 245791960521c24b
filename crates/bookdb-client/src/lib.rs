//! bookdb-client
//!
//! Client-side post-filtering: a snapshot from the last fetch plus the
//! user's filter criteria composed over it. Filtering never triggers
//! another fetch; a new fetch replaces the snapshot and the criteria
//! carry over.

pub mod filter;
pub mod session;

pub use filter::{available_categories, filter_category_options, FilterState};
pub use session::Session;
