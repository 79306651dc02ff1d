//! File-backed config store
//!
//! Every operation exists twice: a blocking `*_sync` method and an
//! `async` method of the same stem running on tokio.

mod document;
mod nonblocking;
mod options;
mod user_conf;

pub use document::{Document, SENTINEL_KEY};
pub use options::StoreOptions;
pub use user_conf::{init, init_in, UserConf, UserConfBuilder};
