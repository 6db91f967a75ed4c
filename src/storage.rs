use crate::error::{EnterMediaError, EnterMediaResult};
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Access to the host's file storage
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Resolve a storage URI such as `public://2024/photo.jpg` to a local path
    fn realpath(&self, uri: &str) -> EnterMediaResult<PathBuf>;

    /// Read the whole file into memory
    async fn read(&self, path: &Path) -> EnterMediaResult<Bytes> {
        let contents = tokio::fs::read(path).await?;
        Ok(Bytes::from(contents))
    }
}

/// Maps storage schemes onto local directories.
/// Plain paths without a scheme are used as-is.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    schemes: HashMap<String, PathBuf>,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `scheme://` URIs from `root`
    pub fn with_scheme(mut self, scheme: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.schemes.insert(scheme.into(), root.into());
        self
    }
}

#[async_trait::async_trait]
impl FileSystem for LocalFileSystem {
    fn realpath(&self, uri: &str) -> EnterMediaResult<PathBuf> {
        let Some((scheme, relative)) = uri.split_once("://") else {
            return Ok(PathBuf::from(uri));
        };

        let root = self.schemes.get(scheme).ok_or_else(|| {
            EnterMediaError::invalid_param(format!("Unknown storage scheme: {}", scheme))
        })?;

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(EnterMediaError::invalid_param(format!(
                "Storage path escapes its root: {}",
                uri
            )));
        }

        Ok(root.join(relative))
    }
}
