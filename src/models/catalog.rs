// ABOUTME: Catalog data model for selectable subscriptions, VNets and storage accounts

use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable entry: opaque id plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Subscriptions,
    VirtualNetworks,
    StorageAccounts,
}

impl CatalogKind {
    pub fn all() -> &'static [CatalogKind] {
        &[Self::Subscriptions, Self::VirtualNetworks, Self::StorageAccounts]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Subscriptions => "Subscriptions",
            Self::VirtualNetworks => "Virtual Networks",
            Self::StorageAccounts => "Storage Accounts",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscriptions => write!(f, "subscriptions"),
            Self::VirtualNetworks => write!(f, "virtual_networks"),
            Self::StorageAccounts => write!(f, "storage_accounts"),
        }
    }
}

/// The three read-only lists the wizard selects from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub subscriptions: Vec<CatalogItem>,
    #[serde(default)]
    pub virtual_networks: Vec<CatalogItem>,
    #[serde(default)]
    pub storage_accounts: Vec<CatalogItem>,
}

impl Catalog {
    pub fn items(&self, kind: CatalogKind) -> &[CatalogItem] {
        match kind {
            CatalogKind::Subscriptions => &self.subscriptions,
            CatalogKind::VirtualNetworks => &self.virtual_networks,
            CatalogKind::StorageAccounts => &self.storage_accounts,
        }
    }

    pub fn contains(&self, kind: CatalogKind, id: &str) -> bool {
        self.items(kind).iter().any(|item| item.id == id)
    }

    /// Display name for an id, if the id is in the list
    pub fn name_of(&self, kind: CatalogKind, id: &str) -> Option<&str> {
        self.items(kind)
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.name.as_str())
    }
}
