//! NFT Collection
//!
//! Items the player has interacted with, one entry per name, in the order
//! they were collected. Persisted as JSON, one file per owner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::game::interaction::CollectedItem;

/// Name used when an item arrives without one.
pub const DEFAULT_NFT_NAME: &str = "Unknown NFT";

/// Image used when an item arrives without one.
pub const DEFAULT_NFT_IMAGE: &str = "assets/wildlife-images/cow.jpeg";

/// Rarity used when an item arrives without one.
pub const DEFAULT_NFT_RARITY: &str = "Common";

/// Collection persistence errors.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Owner string cannot be used in a file name.
    #[error("Invalid collection owner: {0:?}")]
    InvalidOwner(String),

    /// File could not be read or written.
    #[error("Collection storage error: {0}")]
    Io(#[from] io::Error),

    /// Stored file was not valid collection JSON.
    #[error("Corrupt collection file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A collected NFT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedNft {
    /// Slot id of the source item
    pub id: u32,
    /// Display name (unique within a collection)
    pub name: String,
    /// Image reference
    pub image: String,
    /// Rarity label
    pub rarity: String,
    /// When it was collected
    pub collected_at: DateTime<Utc>,
}

impl CollectedNft {
    /// Build from an interacted item, filling blank fields with defaults.
    pub fn from_item(item: &CollectedItem, collected_at: DateTime<Utc>) -> Self {
        fn or_default(value: &str, default: &str) -> String {
            if value.trim().is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        }

        Self {
            id: item.id,
            name: or_default(&item.name, DEFAULT_NFT_NAME),
            image: or_default(&item.image, DEFAULT_NFT_IMAGE),
            rarity: or_default(&item.rarity, DEFAULT_NFT_RARITY),
            collected_at,
        }
    }
}

/// Receiver for collected items.
pub trait CollectionSink {
    /// Add an item. Returns false if it was already collected.
    fn collect(&mut self, item: &CollectedItem) -> bool;
}

/// Per-owner NFT collection.
#[derive(Clone, Debug)]
pub struct NftCollection {
    owner: String,
    nfts: Vec<CollectedNft>,
    /// Directory saved to after every new NFT
    storage_dir: Option<PathBuf>,
}

impl NftCollection {
    /// Create an empty in-memory collection.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            nfts: Vec::new(),
            storage_dir: None,
        }
    }

    /// Load `owner`'s collection from `dir` and keep saving there.
    ///
    /// A missing file yields an empty collection.
    pub fn open(dir: impl AsRef<Path>, owner: impl Into<String>) -> Result<Self, CollectionError> {
        let dir = dir.as_ref();
        let mut collection = Self::load(dir, owner)?;
        collection.storage_dir = Some(dir.to_path_buf());
        Ok(collection)
    }

    /// File name used for an owner.
    pub fn file_name(owner: &str) -> Result<String, CollectionError> {
        if owner.is_empty() || owner.contains(|c: char| c == '/' || c == '\\') || owner.contains("..") {
            return Err(CollectionError::InvalidOwner(owner.to_string()));
        }
        Ok(format!("ecoquest-nfts-{}.json", owner))
    }

    /// Owner key.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// NFTs in collection order.
    pub fn nfts(&self) -> &[CollectedNft] {
        &self.nfts
    }

    /// Number of NFTs.
    pub fn len(&self) -> usize {
        self.nfts.len()
    }

    /// Is the collection empty?
    pub fn is_empty(&self) -> bool {
        self.nfts.is_empty()
    }

    /// Has an NFT with this name been collected?
    pub fn contains(&self, name: &str) -> bool {
        self.nfts.iter().any(|nft| nft.name == name)
    }

    /// Add an item with an explicit timestamp. Returns false for duplicates.
    pub fn collect_at(&mut self, item: &CollectedItem, at: DateTime<Utc>) -> bool {
        let nft = CollectedNft::from_item(item, at);
        if self.contains(&nft.name) {
            debug!("NFT {} already collected by {}", nft.name, self.owner);
            return false;
        }

        info!("{} collected NFT {} ({})", self.owner, nft.name, nft.rarity);
        self.nfts.push(nft);
        true
    }

    /// Write the collection to `dir`. Returns the file path.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, CollectionError> {
        let path = dir.as_ref().join(Self::file_name(&self.owner)?);
        let json = serde_json::to_string_pretty(&self.nfts)?;
        fs::write(&path, json)?;
        debug!("Saved {} NFTs to {}", self.nfts.len(), path.display());
        Ok(path)
    }

    /// Read `owner`'s collection from `dir`.
    ///
    /// A missing file yields an empty collection.
    pub fn load(dir: impl AsRef<Path>, owner: impl Into<String>) -> Result<Self, CollectionError> {
        let owner = owner.into();
        let path = dir.as_ref().join(Self::file_name(&owner)?);

        let nfts = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            owner,
            nfts,
            storage_dir: None,
        })
    }
}

impl CollectionSink for NftCollection {
    fn collect(&mut self, item: &CollectedItem) -> bool {
        if !self.collect_at(item, Utc::now()) {
            return false;
        }

        if let Some(dir) = &self.storage_dir {
            if let Err(e) = self.save(dir) {
                warn!("Failed to save collection for {}: {}", self.owner, e);
            }
        }
        true
    }
}
