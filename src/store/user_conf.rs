//! The config store handle and its blocking operations
//!
//! A [`UserConf`] holds nothing but the resolved file path. Every call
//! reads and/or rewrites the whole JSON document on disk; there is no
//! cache and no locking, so concurrent writers to the same file race.

use crate::json::{deep_merge, set_path, take_path, KeyPath};
use crate::store::document::{self, Document, SENTINEL_KEY};
use crate::store::options::StoreOptions;
use crate::types::{ConfError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Open (or create) the config `<home>/<name>.json` in the user's home directory
pub fn init(name: &str, base: Option<Value>) -> Result<UserConf> {
    let mut builder = UserConf::builder(name);
    if let Some(base) = base {
        builder = builder.base(base);
    }
    builder.open_sync()
}

/// Open (or create) the config `<home>/<name>.json` under an explicit directory
pub fn init_in(home: impl Into<PathBuf>, name: &str, base: Option<Value>) -> Result<UserConf> {
    let mut builder = UserConf::builder(name).home_dir(home);
    if let Some(base) = base {
        builder = builder.base(base);
    }
    builder.open_sync()
}

/// Builder for [`UserConf`]
#[derive(Debug, Clone)]
pub struct UserConfBuilder {
    name: String,
    base: Option<Value>,
    options: StoreOptions,
}

impl UserConfBuilder {
    /// Initial document written when the file does not exist yet
    pub fn base(mut self, base: Value) -> Self {
        self.base = Some(base);
        self
    }

    pub fn home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.home_dir = Some(dir.into());
        self
    }

    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate arguments and resolve the target path. Touches no files.
    pub(crate) fn prepare(self) -> Result<(PathBuf, Document)> {
        if self.name.is_empty() {
            return Err(ConfError::validation("Expecting name to be non-empty string"));
        }

        let base = match self.base {
            None => Document::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(ConfError::validation("Expecting base to be plain object")),
        };

        let path = self.options.config_path(&self.name)?;
        Ok((path, base))
    }

    /// Load the existing file or create it from the base document
    pub fn open_sync(self) -> Result<UserConf> {
        let (path, base) = self.prepare()?;

        if path.try_exists()? {
            let bytes = fs::read(&path)?;
            document::verify(&path, &bytes)?;
            debug!("Loaded existing config at {}", path.display());
        } else {
            fs::write(&path, document::encode(&base)?)?;
            info!("Created config at {}", path.display());
        }

        Ok(UserConf { path })
    }
}

/// Handle to one JSON config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConf {
    pub(crate) path: PathBuf,
}

impl UserConf {
    pub fn builder(name: impl Into<String>) -> UserConfBuilder {
        UserConfBuilder {
            name: name.into(),
            base: None,
            options: StoreOptions::default(),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sync(&self) -> Result<Document> {
        debug!("Reading config from {}", self.path.display());
        let bytes = fs::read(&self.path)?;
        document::decode(&self.path, &bytes)
    }

    fn write_sync(&self, doc: &Document) -> Result<()> {
        let bytes = document::encode(doc)?;
        fs::write(&self.path, &bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Value at a dotted path, or `None` when the path does not exist
    pub fn get_sync(&self, path: &str) -> Result<Option<Value>> {
        let key = KeyPath::parse(path)?;
        let doc = self.read_sync()?;
        Ok(lookup(doc, &key))
    }

    /// Value at a dotted path, deserialized into `T`
    pub fn get_as_sync<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let value = self.get_sync(path)?;
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    /// The whole document, without the marker
    pub fn get_all_sync(&self) -> Result<Document> {
        self.read_sync()
    }

    pub fn set_path_sync<V: Serialize>(&self, path: &str, value: V) -> Result<()> {
        let key = KeyPath::parse(path)?;
        let value = serde_json::to_value(value)?;

        let mut doc = self.read_sync()?;
        assign(&mut doc, &key, value)?;
        self.write_sync(&doc)
    }

    /// Replace the entire document. `doc` must be a JSON object.
    pub fn replace_document_sync(&self, doc: Value) -> Result<()> {
        let doc = document::expect_object(doc, "obj")?;
        self.write_sync(&doc)
    }

    /// Deep-merge `diff` into the stored document and return the result
    pub fn update_sync(&self, diff: Value) -> Result<Document> {
        let diff = document::expect_object(diff, "diff")?;

        let current = self.read_sync()?;
        let merged = merge(current, diff);
        self.write_sync(&merged)?;
        Ok(merged)
    }

    pub fn clear_sync(&self) -> Result<()> {
        self.write_sync(&Document::new())
    }

    /// Remove the backing file. A file that is already gone is not an error.
    pub fn destroy_sync(self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Destroyed config at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Config at {} already removed", self.path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) fn lookup(doc: Document, key: &KeyPath) -> Option<Value> {
    take_path(Value::Object(doc), key)
}

pub(crate) fn assign(doc: &mut Document, key: &KeyPath, value: Value) -> Result<()> {
    let mut root = Value::Object(std::mem::take(doc));
    let outcome = set_path(&mut root, key, value);
    // Paths always start with a key, so the root stays an object
    if let Value::Object(map) = root {
        *doc = map;
    }
    outcome
}

pub(crate) fn merge(current: Document, diff: Document) -> Document {
    let mut merged = Value::Object(current);
    deep_merge(&mut merged, &Value::Object(diff));

    match merged {
        Value::Object(mut map) => {
            map.remove(SENTINEL_KEY);
            map
        }
        _ => Document::new(),
    }
}
