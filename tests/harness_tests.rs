//! Store flows driven through EffectStoreTestHarness.

use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;
use pokedex::{
    action::Action,
    catalog::CatalogPage,
    components::{Component, DexList, DexListProps},
    effect::Effect,
    reducer::reducer,
    route::Route,
    state::{AppState, CatalogEntry, PokemonDetail},
};

fn entry(id: u32, name: &str) -> CatalogEntry {
    CatalogEntry::from_resource(
        name.to_string(),
        format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    )
}

fn pikachu() -> PokemonDetail {
    PokemonDetail {
        id: 25,
        display_name: "Pikachu".into(),
        height_dm: 4,
        weight_hg: 60,
        types: vec!["electric".into()],
        ability_name: "Static".into(),
        description: None,
        stats: Vec::new(),
    }
}

#[test]
fn test_catalog_load_then_search() {
    let page = CatalogPage {
        limit: 2,
        offset: 0,
    };
    let mut harness = EffectStoreTestHarness::new(AppState::new(page, false), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.loading);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchCatalog { page } if page.limit == 2 && page.offset == 0)
    });

    harness.complete_action(Action::CatalogDidLoad(vec![
        entry(1, "bulbasaur"),
        entry(2, "ivysaur"),
    ]));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));
    harness.assert_state(|s| !s.loading && s.catalog.len() == 2);
    harness.assert_state(|s| s.catalog[1].id == 2);

    for action in [
        Action::SearchStart,
        Action::SearchInput('i'),
        Action::SearchInput('v'),
        Action::SearchInput('y'),
    ] {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| {
        s.visible_entries().map(|e| e.name.as_str()).collect::<Vec<_>>() == vec!["ivysaur"]
    });
}

#[test]
fn test_persist_effect_follows_load() {
    let mut harness = EffectStoreTestHarness::new(
        AppState::new(CatalogPage::default(), true),
        reducer,
    );

    harness.dispatch_collect(Action::CatalogDidLoad(vec![entry(1, "bulbasaur")]));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::PersistCatalog { entries } if entries.len() == 1)
    });
}

#[test]
fn test_fetch_error_keeps_previous_catalog() {
    let mut state = AppState::default();
    state.hydrate(vec![entry(1, "bulbasaur")]);
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::CatalogFetch);
    harness.assert_state(|s| s.loading);
    harness.complete_action(Action::CatalogDidError("offline".into()));
    harness.process_emitted();

    harness.assert_state(|s| !s.loading && s.catalog.len() == 1);
}

#[test]
fn test_open_detail_ignores_superseded_result() {
    let mut state = AppState::default();
    state.hydrate(vec![entry(1, "bulbasaur"), entry(25, "pikachu")]);
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::DexOpen);
    let first = 1;
    harness.assert_state(|s| s.detail.generation == first);
    harness.drain_effects().effects_first_matches(|e| {
        matches!(e, Effect::LoadDetail { id: 1, generation: 1 })
    });

    harness.dispatch_collect(Action::Navigate(Route::detail(25)));
    let current = 2;
    harness.assert_state(|s| s.detail.generation == current && s.detail.loading);

    harness.complete_action(Action::DetailDidLoad {
        generation: first,
        detail: PokemonDetail {
            id: 1,
            display_name: "Bulbasaur".into(),
            ..pikachu()
        },
    });
    harness.complete_action(Action::DetailDidLoad {
        generation: current,
        detail: pikachu(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 2));
    harness.assert_state(|s| s.detail.detail.as_ref().map(|d| d.id) == Some(25));
}

#[test]
fn test_keys_drive_reload() {
    let mut state = AppState::default();
    state.hydrate(vec![entry(1, "bulbasaur")]);
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    let mut component = DexList::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = DexListProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_count(1);
    actions.assert_first(Action::CatalogFetch);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.loading);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchCatalog { .. }));

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = DexListProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert!(output.contains("Loading..."), "{output}");
    assert!(!output.contains("bulbasaur"), "{output}");
}
