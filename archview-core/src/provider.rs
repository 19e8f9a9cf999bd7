//! Tree data providers
//!
//! The viewer asks a provider for the tree behind a hierarchy. The shipped
//! providers read a JSON project dump produced by the analysis backend:
//!
//! ```json
//! { "name": "demo", "config": { ... }, "trees": { "injector": { "name": "...", "root": { ... } } } }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{ArchTree, ArchTreeType, ProjectConfig};
use crate::{Error, Result};

/// Asynchronous source of architecture trees.
///
/// `Ok(None)` means the project has no tree of that type, which the viewer
/// renders as an empty board.
#[async_trait]
pub trait TreeDataProvider: Send + Sync {
    async fn get_arch_tree_by_type(&self, tree_type: ArchTreeType) -> Result<Option<ArchTree>>;
}

/// Analysis output for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDump {
    pub name: String,
    #[serde(default)]
    pub config: Option<ProjectConfig>,
    #[serde(default)]
    pub trees: BTreeMap<ArchTreeType, ArchTree>,
}

impl ProjectDump {
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| Error::InvalidProject {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Serves trees from a project dump held in memory.
#[derive(Debug, Clone)]
pub struct StaticTreeProvider {
    dump: Arc<ProjectDump>,
}

impl StaticTreeProvider {
    pub fn new(dump: ProjectDump) -> Self {
        Self {
            dump: Arc::new(dump),
        }
    }

    pub fn dump(&self) -> &ProjectDump {
        &self.dump
    }
}

#[async_trait]
impl TreeDataProvider for StaticTreeProvider {
    async fn get_arch_tree_by_type(&self, tree_type: ArchTreeType) -> Result<Option<ArchTree>> {
        Ok(self.dump.trees.get(&tree_type).cloned())
    }
}

/// Reads a project dump from disk on first use and caches it until `reload`.
#[derive(Debug)]
pub struct JsonTreeProvider {
    path: PathBuf,
    cache: RwLock<Option<Arc<ProjectDump>>>,
}

impl JsonTreeProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached dump, loading it if needed.
    pub async fn project(&self) -> Result<Arc<ProjectDump>> {
        if let Some(dump) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(dump));
        }

        let mut cache = self.cache.write().await;
        if let Some(dump) = cache.as_ref() {
            return Ok(Arc::clone(dump));
        }
        let dump = Arc::new(ProjectDump::from_file(&self.path).await?);
        tracing::debug!(
            path = %self.path.display(),
            trees = dump.trees.len(),
            "loaded project dump"
        );
        *cache = Some(Arc::clone(&dump));
        Ok(dump)
    }

    /// Drop the cache and read the file again.
    pub async fn reload(&self) -> Result<Arc<ProjectDump>> {
        self.cache.write().await.take();
        self.project().await
    }
}

#[async_trait]
impl TreeDataProvider for JsonTreeProvider {
    async fn get_arch_tree_by_type(&self, tree_type: ArchTreeType) -> Result<Option<ArchTree>> {
        let dump = self.project().await?;
        Ok(dump.trees.get(&tree_type).cloned())
    }
}
