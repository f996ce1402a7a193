// ABOUTME: Catalog providers supplying the selectable subscriptions, VNets and storage accounts
// Ships the built-in sample catalog and a TOML file catalog

use crate::config::CatalogConfig;
use crate::models::{Catalog, CatalogItem, CatalogKind};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate id '{id}' in {kind}")]
    DuplicateId { kind: CatalogKind, id: String },
}

/// Source of the items a wizard can select from
#[cfg_attr(test, mockall::automock)]
pub trait CatalogProvider {
    /// List the items of one kind
    fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// Provider selected by configuration: the catalog file if set, else the sample data
pub fn provider_for(config: &CatalogConfig) -> Result<Box<dyn CatalogProvider>, CatalogError> {
    match &config.path {
        Some(path) => Ok(Box::new(FileCatalog::load(path)?)),
        None => Ok(Box::new(StaticCatalog::sample())),
    }
}

/// Collect all three lists from a provider into a [`Catalog`]
pub fn load_catalog(provider: &dyn CatalogProvider) -> Result<Catalog, CatalogError> {
    let catalog = Catalog {
        subscriptions: provider.list(CatalogKind::Subscriptions)?,
        virtual_networks: provider.list(CatalogKind::VirtualNetworks)?,
        storage_accounts: provider.list(CatalogKind::StorageAccounts)?,
    };
    check_unique_ids(&catalog)?;

    debug!(
        subscriptions = catalog.subscriptions.len(),
        virtual_networks = catalog.virtual_networks.len(),
        storage_accounts = catalog.storage_accounts.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

fn check_unique_ids(catalog: &Catalog) -> Result<(), CatalogError> {
    for &kind in CatalogKind::all() {
        let mut seen = HashSet::new();
        for item in catalog.items(kind) {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: item.id.clone(),
                });
            }
        }
    }
    Ok(())
}

/// In-memory catalog, used for the sample data and for tests
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Sample inventory shown when no catalog file is configured
    pub fn sample() -> Self {
        Self::new(Catalog {
            subscriptions: vec![
                CatalogItem::new("sub-1", "Development Subscription"),
                CatalogItem::new("sub-2", "Production Subscription"),
            ],
            virtual_networks: vec![
                CatalogItem::new("vnet-1", "vnet-eastus"),
                CatalogItem::new("vnet-2", "vnet-westus"),
                CatalogItem::new("vnet-3", "vnet-central"),
            ],
            storage_accounts: vec![
                CatalogItem::new("sa-1", "flowlogsstorage01"),
                CatalogItem::new("sa-2", "diagstorage02"),
            ],
        })
    }
}

impl CatalogProvider for StaticCatalog {
    fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.catalog.items(kind).to_vec())
    }
}

/// Catalog read from a TOML file with `[[subscriptions]]`, `[[virtual_networks]]`
/// and `[[storage_accounts]]` tables
#[derive(Debug, Clone)]
pub struct FileCatalog {
    catalog: Catalog,
}

impl FileCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog: Catalog = toml::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded catalog from {}", path.display());
        Ok(Self { catalog })
    }
}

impl CatalogProvider for FileCatalog {
    fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.catalog.items(kind).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_catalog() {
        let catalog = load_catalog(&StaticCatalog::sample()).unwrap();
        assert_eq!(catalog.subscriptions.len(), 2);
        assert_eq!(catalog.virtual_networks.len(), 3);
        assert_eq!(catalog.storage_accounts.len(), 2);
        assert_eq!(
            catalog.name_of(CatalogKind::Subscriptions, "sub-2"),
            Some("Production Subscription")
        );
        assert!(!catalog.contains(CatalogKind::VirtualNetworks, "vnet-9"));
    }

    #[test]
    fn test_file_catalog_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
[[subscriptions]]
id = "prod"
name = "Production"

[[virtual_networks]]
id = "hub"
name = "vnet-hub"
"#,
        )
        .unwrap();

        let provider = FileCatalog::load(&path).unwrap();
        let catalog = load_catalog(&provider).unwrap();
        assert_eq!(catalog.subscriptions, vec![CatalogItem::new("prod", "Production")]);
        assert_eq!(catalog.virtual_networks.len(), 1);
        assert!(catalog.storage_accounts.is_empty());
    }

    #[test]
    fn test_file_catalog_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileCatalog::load(&temp_dir.path().join("nope.toml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_file_catalog_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        fs::write(&path, "subscriptions = 3").unwrap();
        assert!(matches!(FileCatalog::load(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_provider_for_defaults_to_sample() {
        let provider = provider_for(&CatalogConfig::default()).unwrap();
        let catalog = load_catalog(provider.as_ref()).unwrap();
        assert_eq!(catalog, load_catalog(&StaticCatalog::sample()).unwrap());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_list().returning(|kind| match kind {
            CatalogKind::StorageAccounts => Ok(vec![
                CatalogItem::new("sa-1", "first"),
                CatalogItem::new("sa-1", "second"),
            ]),
            _ => Ok(Vec::new()),
        });

        let err = load_catalog(&provider).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateId { kind: CatalogKind::StorageAccounts, ref id } if id == "sa-1"
        ));
    }
}
