//! userconf - persistent JSON configuration for a named user profile
//!
//! Values are stored in `<home>/<name>.json` and addressed by dotted paths
//! such as `profile.name` or `servers[0].host`. Files written by this crate
//! carry a reserved marker key ([`SENTINEL_KEY`]) so arbitrary JSON files are
//! never mistaken for, or overwritten as, config files.
//!
//! ```no_run
//! use serde_json::json;
//!
//! # fn main() -> userconf::Result<()> {
//! let conf = userconf::init("myapp", Some(json!({"theme": "dark"})))?;
//! conf.set_path_sync("profile.name", "Ada")?;
//! assert_eq!(conf.get_sync("profile.name")?, Some(json!("Ada")));
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod store;
pub mod types;

pub use store::{init, init_in, Document, StoreOptions, UserConf, UserConfBuilder, SENTINEL_KEY};
pub use types::{ConfError, Result};
