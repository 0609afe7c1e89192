use std::path::PathBuf;

use crate::api::API_BASE;
use crate::catalog::CatalogPage;
use crate::persist::CatalogSlot;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub page: CatalogPage,
    /// Language code used to pick localized names and descriptions.
    pub language: String,
    pub persist: bool,
    pub http_cache: bool,
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            page: CatalogPage::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            persist: true,
            http_cache: true,
            cache_dir: default_cache_dir(),
        }
    }
}

impl Config {
    pub fn catalog_slot(&self) -> CatalogSlot {
        CatalogSlot::in_dir(&self.cache_dir)
    }

    pub fn http_cache_dir(&self) -> Option<PathBuf> {
        self.http_cache.then(|| self.cache_dir.clone())
    }

    pub fn log_path(&self) -> PathBuf {
        self.cache_dir.join("pokedex.log")
    }
}

pub fn default_cache_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("pokedex")
}
