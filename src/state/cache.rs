use crate::error::{BookingError, IOAction, IOSnafu};
use async_walkdir::WalkDir;
use futures::StreamExt;
use moka::future::{Cache, CacheBuilder};
use snafu::ResultExt;
use std::{
    io::{Error as IOError, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs::read_to_string;

///Template sources, read once from `www/` and kept in memory.
#[derive(Clone, Debug)]
pub struct TemplateCache {
    templates_cache: Cache<PathBuf, Arc<str>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        let templates_cache = CacheBuilder::default().name("templates_cache").build();

        Self { templates_cache }
    }

    pub async fn get(&self, path: impl AsRef<Path>) -> Result<Arc<str>, BookingError> {
        let path = path.as_ref().to_path_buf();

        if let Some(found) = self.templates_cache.get(&path).await {
            return Ok(found);
        }

        if !path.exists() {
            return Err(BookingError::IO {
                source: IOError::from(ErrorKind::NotFound),
                action: IOAction::ReadingFile(path),
            });
        }

        let read_in = read_to_string(&path)
            .await
            .with_context(|_e| IOSnafu {
                action: IOAction::ReadingFile(path.clone()),
            })?;
        let read_in: Arc<str> = read_in.into();
        self.templates_cache.insert(path, read_in.clone()).await;

        Ok(read_in)
    }

    pub async fn pre_populate(&self) {
        let mut entries = WalkDir::new("www/");

        while let Some(entry) = entries.next().await {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            let contents = match read_to_string(&path).await {
                Ok(c) => Arc::<str>::from(c),
                Err(e) => {
                    warn!(?e, ?path, "Error reading file for pre-population");
                    continue;
                }
            };

            self.templates_cache.insert(path, contents).await;
        }
    }
}
