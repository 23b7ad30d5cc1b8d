//! Named byte-blob persistence as effects.

use crate::effect::{Effect, EffectError};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Persistence collaborator: load and save byte blobs by name.
///
/// Like every environment capability this is a bag of function values, so a
/// test double is just a pair of closures ([`FileClient::from_fns`]).
#[derive(Clone)]
pub struct FileClient {
    load: Arc<dyn Fn(&str) -> Effect<Option<Vec<u8>>> + Send + Sync>,
    save: Arc<dyn Fn(&str, Vec<u8>) -> Effect<()> + Send + Sync>,
}

impl FileClient {
    pub fn from_fns(
        load: impl Fn(&str) -> Effect<Option<Vec<u8>>> + Send + Sync + 'static,
        save: impl Fn(&str, Vec<u8>) -> Effect<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            load: Arc::new(load),
            save: Arc::new(save),
        }
    }

    /// Filesystem-backed client rooted at a directory.
    ///
    /// A missing file loads as `None`; saving creates the root directory on
    /// demand. Save-then-load of the same name is byte-identical.
    pub fn live(root: PathBuf) -> Self {
        let load_root = root.clone();
        Self::from_fns(
            move |name| {
                let path = load_root.join(name);
                Effect::try_future(async move {
                    match tokio::fs::read(&path).await {
                        Ok(bytes) => Ok(Some(bytes)),
                        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
                        Err(error) => Err(EffectError::Io(error)),
                    }
                })
            },
            move |name, bytes| {
                let path = root.join(name);
                Effect::try_future(async move {
                    if let Some(parent) = path.parent() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                    tokio::fs::write(&path, &bytes).await?;
                    Ok(())
                })
            },
        )
    }

    /// Load the blob stored under `name`, `None` when absent.
    pub fn load(&self, name: &str) -> Effect<Option<Vec<u8>>> {
        (self.load)(name)
    }

    /// Persist `data` under `name`. Callers discard the output with
    /// [`Effect::fire_and_forget`].
    pub fn save(&self, name: &str, data: Vec<u8>) -> Effect<()> {
        (self.save)(name, data)
    }
}
