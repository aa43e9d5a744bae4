//! Marketplace workflows sitting between the HTTP handlers and the repositories.

pub mod accounts;
pub mod catalog;
pub mod matching;
pub mod preferences;
pub mod requests;

pub use accounts::{LoggedIn, Registration};
pub use matching::{suggest_industries, Suggestion, WasteKind};
pub use preferences::parse_preferences;
pub use requests::RequestPlaced;
