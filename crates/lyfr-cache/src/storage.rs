//! Cache storage capability and backends.
//!
//! Storage is a set of named *buckets* (one per cache version), each a
//! key-value map from request key to [`CachedResponse`]. Buckets are
//! created implicitly on first put, deleted whole during activation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::response::{CachedResponse, ResponseKind};

/// Capability: named, versioned response buckets.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Names of all existing buckets.
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Store a response under a key, creating the bucket if needed and
    /// replacing any previous entry.
    async fn put(&self, bucket: &str, key: &str, response: &CachedResponse) -> Result<()>;

    /// Look up a cached response. Corrupt entries read as misses.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<CachedResponse>>;

    /// Delete a bucket and everything in it. Deleting a missing bucket is
    /// not an error.
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;
}

// ============================================================================
// MemoryCacheStorage
// ============================================================================

/// In-memory storage for tests and ephemeral mirrors.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    buckets: Mutex<HashMap<String, HashMap<String, CachedResponse>>>,
}

impl MemoryCacheStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self
            .buckets
            .lock()
            .expect("cache storage poisoned")
            .keys()
            .cloned()
            .collect())
    }

    async fn put(&self, bucket: &str, key: &str, response: &CachedResponse) -> Result<()> {
        self.buckets
            .lock()
            .expect("cache storage poisoned")
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<CachedResponse>> {
        Ok(self
            .buckets
            .lock()
            .expect("cache storage poisoned")
            .get(bucket)
            .and_then(|b| b.get(key))
            .cloned())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.buckets
            .lock()
            .expect("cache storage poisoned")
            .remove(bucket);
        Ok(())
    }
}

// ============================================================================
// DirCacheStorage
// ============================================================================

/// Entry metadata persisted alongside the body file.
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    status: u16,
    kind: ResponseKind,
    content_type: Option<String>,
    fetched_at: DateTime<Utc>,
}

/// Directory-backed storage: one subdirectory per bucket, two files per
/// entry (`<key>.meta.json`, `<key>.body`).
#[derive(Debug, Clone)]
pub struct DirCacheStorage {
    root: PathBuf,
}

impl DirCacheStorage {
    /// Create storage rooted at a directory. The directory is created on
    /// first put.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(encode_component(bucket))
    }

    fn entry_paths(&self, bucket: &str, key: &str) -> (PathBuf, PathBuf) {
        let dir = self.bucket_dir(bucket);
        let stem = encode_component(key);
        (dir.join(format!("{stem}.meta.json")), dir.join(format!("{stem}.body")))
    }
}

/// Encode a bucket name or request key into a safe file-name component.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[async_trait]
impl CacheStorage for DirCacheStorage {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(_) => return Ok(names),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
        {
            if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                names.push(decode_component(&entry.file_name().to_string_lossy()));
            }
        }
        Ok(names)
    }

    async fn put(&self, bucket: &str, key: &str, response: &CachedResponse) -> Result<()> {
        let (meta_path, body_path) = self.entry_paths(bucket, key);
        tokio::fs::create_dir_all(self.bucket_dir(bucket)).await?;

        let meta = EntryMeta {
            status: response.status,
            kind: response.kind,
            content_type: response.content_type.clone(),
            fetched_at: response.fetched_at,
        };
        let raw = serde_json::to_vec(&meta).map_err(|e| Error::Storage(e.to_string()))?;
        tokio::fs::write(&meta_path, raw).await?;
        tokio::fs::write(&body_path, &response.body).await?;
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<CachedResponse>> {
        let (meta_path, body_path) = self.entry_paths(bucket, key);
        let raw = match tokio::fs::read(&meta_path).await {
            Ok(raw) => raw,
            Err(_) => return Ok(None),
        };
        let meta: EntryMeta = match serde_json::from_slice(&raw) {
            Ok(meta) => meta,
            Err(err) => {
                log::warn!("corrupt cache entry {meta_path:?}, treating as miss: {err}");
                return Ok(None);
            }
        };
        let body = match tokio::fs::read(&body_path).await {
            Ok(body) => body,
            Err(_) => return Ok(None),
        };
        Ok(Some(CachedResponse {
            status: meta.status,
            kind: meta.kind,
            content_type: meta.content_type,
            body,
            fetched_at: meta.fetched_at,
        }))
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        match tokio::fs::remove_dir_all(self.bucket_dir(bucket)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Inverse of [`encode_component`], for listing bucket names.
fn decode_component(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(byte) = u8::from_str_radix(&encoded[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseKind;

    fn response(body: &str) -> CachedResponse {
        CachedResponse::new(
            200,
            ResponseKind::Basic,
            Some("text/html".to_string()),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_encode_component_round_trip() {
        for raw in ["/", "/part-a", "/read?x=1&y=2", "lyfr-shell-v2"] {
            assert_eq!(decode_component(&encode_component(raw)), raw);
        }
    }

    #[test]
    fn test_encode_component_is_filename_safe() {
        let encoded = encode_component("/read?x=1");
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('?'));
    }

    #[tokio::test]
    async fn test_memory_put_get_delete() {
        let storage = MemoryCacheStorage::new();
        storage.put("v1", "/", &response("root")).await.unwrap();
        let hit = storage.get("v1", "/").await.unwrap().unwrap();
        assert_eq!(hit.text(), "root");
        assert!(storage.get("v1", "/missing").await.unwrap().is_none());

        storage.delete_bucket("v1").await.unwrap();
        assert!(storage.get("v1", "/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dir_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DirCacheStorage::new(dir.path());

        storage.put("v1", "/part-a", &response("alpha")).await.unwrap();
        let hit = storage.get("v1", "/part-a").await.unwrap().unwrap();
        assert_eq!(hit.status, 200);
        assert_eq!(hit.text(), "alpha");
        assert_eq!(hit.content_type.as_deref(), Some("text/html"));

        assert_eq!(storage.list_buckets().await.unwrap(), vec!["v1".to_string()]);
        storage.delete_bucket("v1").await.unwrap();
        assert!(storage.list_buckets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dir_storage_corrupt_meta_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DirCacheStorage::new(dir.path());
        storage.put("v1", "/", &response("root")).await.unwrap();

        let (meta_path, _) = storage.entry_paths("v1", "/");
        std::fs::write(&meta_path, "{broken").unwrap();
        assert!(storage.get("v1", "/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dir_storage_missing_bucket_delete_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DirCacheStorage::new(dir.path());
        storage.delete_bucket("never-existed").await.unwrap();
    }
}
