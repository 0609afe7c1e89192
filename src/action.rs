use serde::{Deserialize, Serialize};

use crate::route::Route;
use crate::state::{CatalogEntry, PokemonDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    /// Manual reload of the catalog page.
    CatalogFetch,
    CatalogDidLoad(Vec<CatalogEntry>),
    CatalogDidError(String),
    CatalogDidPersist(usize),
    CatalogPersistDidError(String),

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,

    SelectionMove(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    DexSelect(usize),
    DexOpen,

    Navigate(Route),

    DetailDidLoad { generation: u64, detail: PokemonDetail },
    DetailDidError { generation: u64, error: String },
    DetailFlipSprite,
    DetailStep(i32),
    DetailBack,

    Quit,
}
