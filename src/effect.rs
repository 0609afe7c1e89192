use crate::catalog::CatalogPage;
use crate::state::CatalogEntry;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchCatalog { page: CatalogPage },
    PersistCatalog { entries: Vec<CatalogEntry> },
    LoadDetail { id: u32, generation: u64 },
}
