//! Package registry access
//!
//! - [`index`]: the JSON index a registry search reads
//! - [`search`]: running that search off the control thread
//! - [`manifest`]: recording registry installs in the project manifest

pub mod index;
pub mod manifest;
pub mod search;

pub use index::RegistryIndex;
pub use search::{SearchHandle, SearchPoll};
