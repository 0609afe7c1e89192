use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::{self, CatalogPage};
use crate::route::Route;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// One row of the catalog index. `id` is derived from `resource_url`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub resource_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u16,
}

/// Display model for the detail page, composed from up to three lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub display_name: String,
    pub height_dm: u32,
    pub weight_hg: u32,
    pub types: Vec<String>,
    pub ability_name: String,
    pub description: Option<String>,
    pub stats: Vec<BaseStat>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteFacing {
    #[default]
    Front,
    Back,
}

impl SpriteFacing {
    pub fn toggle(self) -> Self {
        match self {
            SpriteFacing::Front => SpriteFacing::Back,
            SpriteFacing::Back => SpriteFacing::Front,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpriteFacing::Front => "Front",
            SpriteFacing::Back => "Back",
        }
    }
}

/// Detail page state. `generation` increases on every navigation so that
/// late results for a previous identifier can be recognised and dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailState {
    pub generation: u64,
    pub id: Option<u32>,
    pub loading: bool,
    pub detail: Option<PokemonDetail>,
    pub facing: SpriteFacing,
}

impl DetailState {
    pub fn not_found(&self) -> bool {
        !self.loading && self.detail.is_none()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub route: Route,
    pub page: CatalogPage,
    pub persist: bool,

    pub catalog: Vec<CatalogEntry>,
    /// Foreground load: the list view shows only the loading indicator.
    pub loading: bool,
    /// Background refresh of a hydrated catalog; the list stays visible.
    pub refreshing: bool,

    pub search: SearchState,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,

    pub detail: DetailState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CatalogPage::default(), false)
    }
}

impl AppState {
    pub fn new(page: CatalogPage, persist: bool) -> Self {
        Self {
            route: Route::List,
            page,
            persist,
            catalog: Vec::new(),
            loading: true,
            refreshing: false,
            search: SearchState::default(),
            filtered_indices: Vec::new(),
            selected_index: 0,
            detail: DetailState::default(),
        }
    }

    /// Seed the collection from the durable slot before any network work.
    pub fn hydrate(&mut self, entries: Vec<CatalogEntry>) {
        self.catalog = entries;
        self.loading = false;
        self.rebuild_filtered();
    }

    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = catalog::filter_indices(&self.catalog, &self.search.query);
        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.filtered_indices
            .iter()
            .filter_map(|idx| self.catalog.get(*idx))
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.catalog.get(*idx))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.catalog.len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("limit", ron_string(&self.page.limit))
                .entry("offset", ron_string(&self.page.offset))
                .entry("loading", ron_string(&self.loading))
                .entry("refreshing", ron_string(&self.refreshing)),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query)),
            DebugSection::new("Detail")
                .entry("route", ron_string(&self.route.path()))
                .entry("generation", ron_string(&self.detail.generation))
                .entry("id", ron_string(&self.detail.id))
                .entry("loading", ron_string(&self.detail.loading))
                .entry("facing", ron_string(&self.detail.facing)),
        ]
    }
}
