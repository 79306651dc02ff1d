//! Non-blocking variants built on `tokio::fs`
//!
//! Arguments are validated before the first `.await`, so a bad key or
//! diff is reported without any file being touched.

use crate::json::KeyPath;
use crate::store::document::{self, Document};
use crate::store::user_conf::{assign, lookup, merge, UserConf, UserConfBuilder};
use crate::types::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io;
use tokio::fs;
use tracing::{debug, info};

impl UserConfBuilder {
    /// Load the existing file or create it from the base document
    pub async fn open(self) -> Result<UserConf> {
        let (path, base) = self.prepare()?;

        if fs::try_exists(&path).await? {
            let bytes = fs::read(&path).await?;
            document::verify(&path, &bytes)?;
            debug!("Loaded existing config at {}", path.display());
        } else {
            fs::write(&path, document::encode(&base)?).await?;
            info!("Created config at {}", path.display());
        }

        Ok(UserConf { path })
    }
}

impl UserConf {
    async fn read(&self) -> Result<Document> {
        debug!("Reading config from {}", self.path.display());
        let bytes = fs::read(&self.path).await?;
        document::decode(&self.path, &bytes)
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        let bytes = document::encode(doc)?;
        fs::write(&self.path, &bytes).await?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        let key = KeyPath::parse(path)?;
        let doc = self.read().await?;
        Ok(lookup(doc, &key))
    }

    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let value = self.get(path).await?;
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    pub async fn get_all(&self) -> Result<Document> {
        self.read().await
    }

    pub async fn set_path<V: Serialize>(&self, path: &str, value: V) -> Result<()> {
        let key = KeyPath::parse(path)?;
        let value = serde_json::to_value(value)?;

        let mut doc = self.read().await?;
        assign(&mut doc, &key, value)?;
        self.write(&doc).await
    }

    pub async fn replace_document(&self, doc: Value) -> Result<()> {
        let doc = document::expect_object(doc, "obj")?;
        self.write(&doc).await
    }

    pub async fn update(&self, diff: Value) -> Result<Document> {
        let diff = document::expect_object(diff, "diff")?;

        let current = self.read().await?;
        let merged = merge(current, diff);
        self.write(&merged).await?;
        Ok(merged)
    }

    pub async fn clear(&self) -> Result<()> {
        self.write(&Document::new()).await
    }

    pub async fn destroy(self) -> Result<()> {
        match fs::remove_file(&self.path).await {
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
