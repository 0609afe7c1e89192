use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::catalog::CatalogPage;
use crate::state::CatalogEntry;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Request(Arc<reqwest::Error>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(Arc::new(error))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StatSlot {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AbilityRecord {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// Read-only view of the upstream catalog.
#[async_trait]
pub trait PokeSource: Send + Sync {
    async fn catalog(&self, page: CatalogPage) -> Result<Vec<NamedResource>, Error>;
    async fn pokemon(&self, id: u32) -> Result<PokemonRecord, Error>;
    async fn species(&self, id: u32) -> Result<SpeciesRecord, Error>;
    async fn ability(&self, url: &str) -> Result<AbilityRecord, Error>;
}

pub async fn fetch_catalog(
    source: &dyn PokeSource,
    page: CatalogPage,
) -> Result<Vec<CatalogEntry>, Error> {
    let results = source.catalog(page).await?;
    Ok(results
        .into_iter()
        .map(|entry| CatalogEntry::from_resource(entry.name, entry.url))
        .collect())
}

/// PokeAPI over HTTP. Detail lookups go through an on-disk response cache
/// when `cache_dir` is set; the catalog index always hits the network.
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
    cache_dir: Option<PathBuf>,
}

impl HttpSource {
    pub fn new(base: impl Into<String>, cache_dir: Option<PathBuf>) -> Self {
        let base: String = base.into();
        Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
            cache_dir,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let bytes = self.fetch_bytes(url).await?;
        decode(url, &bytes)
    }

    async fn fetch_json_cached<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let Some(cache_path) = self.cache_path(url) else {
            return self.fetch_json(url).await;
        };
        if let Some(bytes) = read_cache(&cache_path).await {
            match decode(url, &bytes) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::warn!("evicting cached response: {err}");
                    let _ = fs::remove_file(&cache_path).await;
                }
            }
        }

        let bytes = self.fetch_bytes(url).await?;
        let value = decode(url, &bytes)?;
        write_cache(&cache_path, &bytes).await;
        Ok(value)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }
        let response = response.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        let root = self.cache_dir.as_ref()?;
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = hex::encode(hasher.finalize());
        Some(root.join("http").join(digest))
    }
}

#[async_trait]
impl PokeSource for HttpSource {
    async fn catalog(&self, page: CatalogPage) -> Result<Vec<NamedResource>, Error> {
        let url = format!(
            "{}/pokemon?limit={}&offset={}",
            self.base, page.limit, page.offset
        );
        let response: CatalogResponse = self.fetch_json(&url).await?;
        Ok(response.results)
    }

    async fn pokemon(&self, id: u32) -> Result<PokemonRecord, Error> {
        let url = format!("{}/pokemon/{id}", self.base);
        self.fetch_json_cached(&url).await
    }

    async fn species(&self, id: u32) -> Result<SpeciesRecord, Error> {
        let url = format!("{}/pokemon-species/{id}", self.base);
        self.fetch_json_cached(&url).await
    }

    async fn ability(&self, url: &str) -> Result<AbilityRecord, Error> {
        self.fetch_json_cached(url).await
    }
}

fn decode<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|err| Error::Decode {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    if let Err(err) = fs::write(path, bytes).await {
        log::debug!("response cache write failed for {}: {err}", path.display());
    }
}
