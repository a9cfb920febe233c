pub mod authors;
pub mod config;
pub mod error;
pub mod git;
pub mod notes;
pub mod release;
pub mod tracker;
pub mod ui;

pub use error::{RelnotesError, Result};
