//! Shared types

mod errors;

pub use errors::{ConfError, Result};
