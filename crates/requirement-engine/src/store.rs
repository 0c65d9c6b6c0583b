//! 目录存储管理
//!
//! 使用 DashMap 按版本缓存编译后的目录，目录以 Arc 共享给并发的查询方。
//! 同一版本重新加载会整体替换，正在使用旧目录的查询不受影响。

use crate::compiler::{Catalog, CatalogCompiler};
use crate::error::{EngineError, Result};
use crate::models::CatalogDefinition;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 目录存储
#[derive(Clone)]
pub struct CatalogStore {
    /// 版本 -> 编译后的目录
    catalogs: Arc<DashMap<String, Arc<Catalog>>>,
    compiler: Arc<parking_lot::Mutex<CatalogCompiler>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            catalogs: Arc::new(DashMap::new()),
            compiler: Arc::new(parking_lot::Mutex::new(CatalogCompiler::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// 加载目录定义，返回编译后的目录
    #[instrument(skip(self, definition), fields(version = %definition.version))]
    pub fn load(&self, definition: CatalogDefinition) -> Arc<Catalog> {
        let catalog = {
            let mut compiler = self.compiler.lock();
            Arc::new(compiler.compile(definition))
        };

        let version = catalog.version().to_string();
        if self
            .catalogs
            .insert(version.clone(), Arc::clone(&catalog))
            .is_some()
        {
            info!("目录已替换: {}", version);
        } else {
            info!("目录已加载: {} ({} 门课程)", version, catalog.len());
        }
        catalog
    }

    /// 从 JSON 字符串加载目录，返回版本号
    #[instrument(skip(self, json))]
    pub fn load_from_json(&self, json: &str) -> Result<String> {
        let definition: CatalogDefinition = serde_json::from_str(json)?;
        let catalog = self.load(definition);
        Ok(catalog.version().to_string())
    }

    pub fn get(&self, version: &str) -> Option<Arc<Catalog>> {
        self.catalogs.get(version).map(|c| Arc::clone(c.value()))
    }

    /// 获取目录，不存在时返回错误
    pub fn require(&self, version: &str) -> Result<Arc<Catalog>> {
        self.get(version)
            .ok_or_else(|| EngineError::CatalogNotFound(version.to_string()))
    }

    pub fn contains(&self, version: &str) -> bool {
        self.catalogs.contains_key(version)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, version: &str) -> Result<()> {
        if self.catalogs.remove(version).is_some() {
            info!("目录已删除: {}", version);
            Ok(())
        } else {
            warn!("删除不存在的目录: {}", version);
            Err(EngineError::CatalogNotFound(version.to_string()))
        }
    }

    /// 所有已加载的版本（按字典序）
    pub fn list_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self.catalogs.iter().map(|c| c.key().clone()).collect();
        versions.sort();
        versions
    }

    #[instrument(skip(self))]
    pub fn clear(&self) {
        let count = self.catalogs.len();
        self.catalogs.clear();
        info!("已清空 {} 个目录", count);
    }

    pub fn stats(&self) -> CatalogStoreStats {
        let catalogs_count = self.catalogs.len();
        let (total_courses, total_badges) = self
            .catalogs
            .iter()
            .fold((0, 0), |(courses, badges), c| {
                (courses + c.len(), badges + c.badges().len())
            });

        CatalogStoreStats {
            catalogs_count,
            total_courses,
            total_badges,
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 目录存储统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStoreStats {
    pub catalogs_count: usize,
    /// 所有版本的课程总数
    pub total_courses: usize,
    pub total_badges: usize,
}
