// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::repositories::url_store_repository::{StoreError, UrlStore};

/// 域名到 URL 列表的完整映射
pub type UrlMap = BTreeMap<String, Vec<String>>;

/// JSON 文件存储实现
///
/// 整个映射保存在一个格式化的 JSON 文件中。每次修改都会读取整个文件、
/// 修改后写入临时文件再重命名覆盖。所有读写在进程内通过同一把锁串行执行，
/// 多个进程共享同一文件时仍然不安全。
pub struct JsonFileUrlStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileUrlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// 打开存储，文件不存在时写入空映射
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析整个存储文件，文件不存在时创建空映射
    pub async fn load(&self) -> Result<UrlMap, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = UrlMap::new();
                self.save(&empty).await?;
                Ok(empty)
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// 序列化并原子替换整个存储文件
    pub async fn save(&self, map: &UrlMap) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(map)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, &self.path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result?;

        debug!(path = %self.path.display(), domains = map.len(), "Store saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// 在锁内完成一次读取-修改-写入
    async fn update<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut UrlMap) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        mutate(&mut map);
        self.save(&map).await
    }
}

#[async_trait]
impl UrlStore for JsonFileUrlStore {
    async fn get(&self, domain: &str) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let map = self.load().await?;
        Ok(map.get(domain).cloned().unwrap_or_default())
    }

    async fn append_url(&self, domain: &str, url: &str) -> Result<(), StoreError> {
        self.update(|map| {
            map.entry(domain.to_string())
                .or_default()
                .push(url.to_string());
        })
        .await
    }

    async fn reset(&self, domain: &str) -> Result<(), StoreError> {
        self.update(|map| {
            map.insert(domain.to_string(), Vec::new());
        })
        .await
    }
}

/// 测试用的内存存储实现（用于单元测试）
#[derive(Default)]
pub struct InMemoryUrlStore {
    data: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 域名是否已有条目（包括空列表）
    pub async fn contains(&self, domain: &str) -> bool {
        self.data.read().await.contains_key(domain)
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn get(&self, domain: &str) -> Result<Vec<String>, StoreError> {
        let map = self.data.read().await;
        Ok(map.get(domain).cloned().unwrap_or_default())
    }

    async fn append_url(&self, domain: &str, url: &str) -> Result<(), StoreError> {
        let mut map = self.data.write().await;
        map.entry(domain.to_string())
            .or_default()
            .push(url.to_string());
        Ok(())
    }

    async fn reset(&self, domain: &str) -> Result<(), StoreError> {
        let mut map = self.data.write().await;
        map.insert(domain.to_string(), Vec::new());
        Ok(())
    }
}
