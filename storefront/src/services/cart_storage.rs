// dishdash/storefront/src/services/cart_storage.rs

//! `CartStorage` backed by one JSON file per cart in a directory.

use async_trait::async_trait;
use dishdash_core::{CartStorage, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct FileCartStorage {
  dir: PathBuf,
}

impl FileCartStorage {
  /// Creates `dir` if needed.
  pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
    let dir = dir.into();
    tokio::fs::create_dir_all(&dir).await.map_err(|e| StorageError::Backend {
      key: dir.display().to_string(),
      source: e.into(),
    })?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Keys are generated by the registry (`<prefix>:<uuid>`); anything outside
  /// `[A-Za-z0-9_-]` is replaced so a key can never leave the directory.
  fn path_for(&self, key: &str) -> PathBuf {
    let file_stem: String = key
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
      .collect();
    self.dir.join(format!("{}.json", file_stem))
  }
}

fn backend_error(key: &str, err: std::io::Error) -> StorageError {
  StorageError::Backend {
    key: key.to_string(),
    source: err.into(),
  }
}

#[async_trait]
impl CartStorage for FileCartStorage {
  #[instrument(name = "file_cart_storage::load", skip(self))]
  async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    match tokio::fs::read_to_string(self.path_for(key)).await {
      Ok(raw) => Ok(Some(raw)),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!("No cart file yet.");
        Ok(None)
      }
      Err(e) => Err(backend_error(key, e)),
    }
  }

  #[instrument(name = "file_cart_storage::save", skip(self, value), fields(bytes = value.len()))]
  async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    let path = self.path_for(key);
    // Write-then-rename so a crash never leaves half a record behind.
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, value).await.map_err(|e| backend_error(key, e))?;
    tokio::fs::rename(&tmp_path, &path).await.map_err(|e| backend_error(key, e))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use dishdash_core::{CartStore, NewCartItem};
  use std::sync::Arc;

  fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("dishdash-carts-{}", uuid::Uuid::new_v4()))
  }

  #[tokio::test]
  async fn missing_file_is_an_empty_cart() {
    let storage = FileCartStorage::open(scratch_dir()).await.unwrap();
    assert_eq!(storage.load("dishdash-cart:nobody").await.unwrap(), None);
    tokio::fs::remove_dir_all(storage.dir()).await.ok();
  }

  #[tokio::test]
  async fn cart_round_trips_through_disk() {
    let storage = Arc::new(FileCartStorage::open(scratch_dir()).await.unwrap());
    let key = "dishdash-cart:6a1f";

    let mut cart = CartStore::open(storage.clone(), key).await.unwrap();
    cart
      .add_item(NewCartItem::new("m1", "Masala Dosa", 6.0, "p1", "Spice Hub"))
      .await
      .unwrap();
    cart.update_quantity("m1", 2).await.unwrap();

    assert!(storage.path_for(key).ends_with("dishdash-cart_6a1f.json"));
    let reopened = CartStore::open(storage.clone(), key).await.unwrap();
    assert_eq!(reopened.get_cart_total(), 12.0);
    assert_eq!(reopened.provider_name(), Some("Spice Hub"));

    tokio::fs::remove_dir_all(storage.dir()).await.ok();
  }

  #[test]
  fn keys_cannot_escape_the_directory() {
    let storage = FileCartStorage { dir: PathBuf::from("/var/lib/dishdash/carts") };
    let path = storage.path_for("../../etc/passwd");
    assert_eq!(path.parent(), Some(Path::new("/var/lib/dishdash/carts")));
  }
}
