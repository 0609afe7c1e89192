//! Rendered output of the list and detail views.

use pokedex::{
    components::{Component, DetailView, DetailViewProps, DexList, DexListProps},
    route::Route,
    state::{AppState, BaseStat, CatalogEntry, DetailState, PokemonDetail, SpriteFacing},
};
use tui_dispatch::testing::*;

fn catalog_state() -> AppState {
    let mut state = AppState::default();
    state.hydrate(
        ["bulbasaur", "ivysaur", "venusaur"]
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                CatalogEntry::from_resource(
                    name.to_string(),
                    format!("https://pokeapi.co/api/v2/pokemon/{}/", idx + 1),
                )
            })
            .collect(),
    );
    state
}

fn render_list(state: &AppState) -> String {
    let mut render = RenderHarness::new(80, 20);
    let mut component = DexList::new();
    render.render_to_string_plain(|frame| {
        let props = DexListProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn render_detail(state: &AppState) -> String {
    let mut render = RenderHarness::new(140, 30);
    let mut component = DetailView::new();
    render.render_to_string_plain(|frame| {
        let props = DetailViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn pikachu_state(facing: SpriteFacing) -> AppState {
    AppState {
        route: Route::detail(25),
        detail: DetailState {
            generation: 1,
            id: Some(25),
            loading: false,
            facing,
            detail: Some(PokemonDetail {
                id: 25,
                display_name: "Pikachu".into(),
                height_dm: 4,
                weight_hg: 60,
                types: vec!["electric".into()],
                ability_name: "Static".into(),
                description: Some("It stores electricity in its cheeks.".into()),
                stats: vec![BaseStat {
                    name: "speed".into(),
                    value: 90,
                }],
            }),
        },
        ..catalog_state()
    }
}

#[test]
fn test_loading_hides_entries_even_with_query() {
    let mut state = catalog_state();
    state.search.query = "zzz".into();
    state.rebuild_filtered();
    state.loading = true;

    let output = render_list(&state);
    assert!(output.contains("Loading..."));
    assert!(!output.contains("No results found"));
    assert!(!output.contains("bulbasaur"));
}

#[test]
fn test_no_results_state() {
    let mut state = catalog_state();
    state.search.query = "mew".into();
    state.rebuild_filtered();

    let output = render_list(&state);
    assert!(output.contains("No results found"));
    assert!(!output.contains("#001"));
}

#[test]
fn test_list_shows_search_prompt_and_matches() {
    let mut state = catalog_state();
    state.search.active = true;
    state.search.query = "SAUR".into();
    state.rebuild_filtered();

    let output = render_list(&state);
    assert!(output.contains("POKEDEX"));
    assert!(output.contains("/SAUR_"));
    assert!(output.contains("#003 venusaur"));
}

#[test]
fn test_detail_formats_measurements() {
    let output = render_detail(&pikachu_state(SpriteFacing::Front));
    assert!(output.contains("POKEMON INFO"));
    assert!(output.contains("025"));
    assert!(output.contains("PIKACHU"));
    assert!(output.contains("0.4 M"));
    assert!(output.contains("6 KG"));
    assert!(output.contains("ElectricIC_Masters.png"));
    assert!(output.contains("Static"));
    assert!(output.contains("showdown/25.gif"));
}

#[test]
fn test_detail_back_sprite() {
    let output = render_detail(&pikachu_state(SpriteFacing::Back));
    assert!(output.contains("showdown/back/25.gif"));
}

#[test]
fn test_detail_loading_and_not_found() {
    let mut state = AppState {
        route: Route::detail(4),
        ..AppState::default()
    };
    state.detail.loading = true;
    assert!(render_detail(&state).contains("Loading..."));

    let state = AppState {
        route: Route::Detail("notanumber".into()),
        ..AppState::default()
    };
    let output = render_detail(&state);
    assert!(output.contains("Pokemon not found"));
}
