//! Read-only view over the Balancer address book.
//!
//! The book is loaded once per process and only replaced through [`AddressBook::refresh`].
//! Lookups come in two flavours: `resolve*` keeps the historical contract of returning an
//! empty string on any miss, `lookup*` returns an [`Option`] so callers cannot forget to check.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use std::{collections::BTreeMap, path::Path, str::FromStr};

use crate::utils::{load_from_json_file, write_to_json_file};

pub mod consts;

/// `network -> category -> entry`
pub type NetworkBook = BTreeMap<String, BTreeMap<String, AddressEntry>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    pub active: NetworkBook,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub old: NetworkBook,
}

/// A leaf address or a nested group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressEntry {
    Address(String),
    Nested(BTreeMap<String, AddressEntry>),
    /// Anything else the upstream file grows. Never resolves.
    Other(serde_json::Value),
}

#[derive(Debug, thiserror::Error)]
pub enum AddressBookError {
    #[error("Unable to load address book: {0}")]
    Load(String),
    #[error("Unable to save address book: {0}")]
    Save(String),
    #[error("Unable to download address book: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Unable to parse address book: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AddressEntry {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            AddressEntry::Address(address) => Some(address.as_str()),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<&AddressEntry> {
        match self {
            AddressEntry::Nested(entries) => entries.get(key),
            _ => None,
        }
    }

    /// All leaf addresses below this entry as `(dotted.path, address)`, sorted by path.
    pub fn flatten(&self, prefix: &str) -> Vec<(String, String)> {
        match self {
            AddressEntry::Address(address) => vec![(prefix.to_string(), address.clone())],
            AddressEntry::Nested(entries) => entries
                .iter()
                .flat_map(|(key, entry)| {
                    let path =
                        if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                    entry.flatten(&path)
                })
                .collect(),
            AddressEntry::Other(_) => vec![],
        }
    }
}

impl AddressBook {
    pub fn from_json_str(json: &str) -> Result<Self, AddressBookError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AddressBookError> {
        let book: Self = load_from_json_file(&path).map_err(AddressBookError::Load)?;
        debug!(path = ?path.as_ref(), networks = book.active.len(), "loaded address book");
        Ok(book)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AddressBookError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AddressBookError::Save(format!("{:?}: {:?}", parent, e)))?;
        }
        write_to_json_file(path, self, false).map_err(AddressBookError::Save)
    }

    pub async fn fetch(url: &Url) -> Result<Self, AddressBookError> {
        info!(%url, "downloading address book");
        let book = reqwest::get(url.clone()).await?.error_for_status()?.json::<Self>().await?;
        Ok(book)
    }

    /// Downloads the book and replaces the copy at `path`.
    pub async fn refresh<P: AsRef<Path>>(url: &Url, path: P) -> Result<Self, AddressBookError> {
        let book = Self::fetch(url).await?;
        book.save(&path)?;
        info!(path = ?path.as_ref(), networks = book.active.len(), "address book refreshed");
        Ok(book)
    }

    pub fn networks(&self) -> Vec<&str> {
        self.active.keys().map(String::as_str).collect()
    }

    /// Raw data of one category.
    pub fn category(&self, network: &str, category: &str) -> Option<&AddressEntry> {
        self.active.get(network)?.get(category)
    }

    fn entry(&self, network: &str, category: &str, path: &[&str]) -> Option<&AddressEntry> {
        path.iter().try_fold(self.category(network, category)?, |entry, key| entry.get(key))
    }

    /// Address at `network/category[/subcategory]`, or an empty string when the path does
    /// not exist or does not end in an address.
    pub fn resolve(&self, network: &str, category: &str, subcategory: Option<&str>) -> String {
        let path: Vec<&str> = subcategory.into_iter().collect();
        self.resolve_path(network, category, &path)
    }

    /// Like [`AddressBook::resolve`], one level deeper.
    pub fn resolve_nested(
        &self,
        network: &str,
        category: &str,
        subcategory: &str,
        key: &str,
    ) -> String {
        self.resolve_path(network, category, &[subcategory, key])
    }

    fn resolve_path(&self, network: &str, category: &str, path: &[&str]) -> String {
        self.entry(network, category, path)
            .and_then(AddressEntry::as_address)
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn lookup(
        &self,
        network: &str,
        category: &str,
        subcategory: Option<&str>,
    ) -> Option<Address> {
        Address::from_str(&self.resolve(network, category, subcategory)).ok()
    }

    pub fn lookup_nested(
        &self,
        network: &str,
        category: &str,
        subcategory: &str,
        key: &str,
    ) -> Option<Address> {
        Address::from_str(&self.resolve_nested(network, category, subcategory, key)).ok()
    }

    /// Dotted path of the first active entry on `network` holding `address`.
    pub fn reverse_lookup(&self, network: &str, address: Address) -> Option<String> {
        self.flatten(network)
            .into_iter()
            .find(|(_, value)| Address::from_str(value).is_ok_and(|value| value == address))
            .map(|(path, _)| path)
    }

    /// Every active address on `network` as `(category.path, address)`.
    pub fn flatten(&self, network: &str) -> Vec<(String, String)> {
        self.active
            .get(network)
            .map(|categories| {
                categories.iter().flat_map(|(category, entry)| entry.flatten(category)).collect()
            })
            .unwrap_or_default()
    }
}
