//! Catalog index helpers: identifier derivation and the name filter.

use serde::{Deserialize, Serialize};

use crate::state::CatalogEntry;

pub const DEFAULT_LIMIT: u32 = 151;

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// A single page of the upstream index (`?limit=N&offset=M`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub limit: u32,
    pub offset: u32,
}

impl Default for CatalogPage {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl CatalogEntry {
    pub fn from_resource(name: String, resource_url: String) -> Self {
        Self {
            id: id_from_url(&resource_url),
            name,
            resource_url,
        }
    }

    pub fn sprite_url(&self) -> String {
        format!("{SPRITE_BASE}/{}.png", self.id)
    }
}

/// Last non-empty path segment parsed as an integer; anything else is `0`.
pub fn id_from_url(url: &str) -> u32 {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .and_then(|segment| segment.parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn matches_name(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_indices(entries: &[CatalogEntry], query: &str) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_name(&entry.name, query))
        .map(|(idx, _)| idx)
        .collect()
}
