//! Configuration file handling for stagekit
//!
//! This module contains the data structures for `.stagekit/settings.yaml`,
//! the per-project settings every command loads on start.

pub mod settings;

pub use settings::{KEYS, Settings};
