use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::route::{self, Route};
use crate::state::{AppState, DetailState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if state.catalog.is_empty() {
                state.loading = true;
            } else {
                state.refreshing = true;
            }
            let mut effects = vec![Effect::FetchCatalog { page: state.page }];
            let route = state.route.clone();
            effects.extend(enter_route(state, route));
            DispatchResult::changed_with_many(effects)
        }

        Action::CatalogFetch => {
            state.loading = true;
            state.refreshing = false;
            DispatchResult::changed_with(Effect::FetchCatalog { page: state.page })
        }

        Action::CatalogDidLoad(entries) => {
            state.catalog = entries;
            state.loading = false;
            state.refreshing = false;
            state.rebuild_filtered();
            if state.persist {
                DispatchResult::changed_with(Effect::PersistCatalog {
                    entries: state.catalog.clone(),
                })
            } else {
                DispatchResult::changed()
            }
        }

        Action::CatalogDidError(_) => {
            state.loading = false;
            state.refreshing = false;
            DispatchResult::changed()
        }

        Action::CatalogDidPersist(_) | Action::CatalogPersistDidError(_) => {
            DispatchResult::unchanged()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            if state.filtered_indices.is_empty() {
                return DispatchResult::unchanged();
            }
            let max = state.filtered_indices.len() as i64 - 1;
            let next = (state.selected_index as i64 + i64::from(delta)).clamp(0, max);
            selection_result(state.set_selected_index(next as usize))
        }

        Action::SelectionJumpTop => selection_result(state.set_selected_index(0)),

        Action::SelectionJumpBottom => {
            let last = state.filtered_indices.len().saturating_sub(1);
            selection_result(state.set_selected_index(last))
        }

        Action::DexSelect(index) => selection_result(state.set_selected_index(index)),

        Action::DexOpen => {
            if state.loading {
                return DispatchResult::unchanged();
            }
            let Some(id) = state.selected_entry().map(|entry| entry.id) else {
                return DispatchResult::unchanged();
            };
            let effects = enter_route(state, Route::detail(id));
            DispatchResult::changed_with_many(effects)
        }

        Action::Navigate(route) => {
            let effects = enter_route(state, route);
            DispatchResult::changed_with_many(effects)
        }

        Action::DetailDidLoad { generation, detail } => {
            if generation != state.detail.generation {
                log::debug!(
                    "discarding detail #{} from generation {generation} (current {})",
                    detail.id,
                    state.detail.generation
                );
                return DispatchResult::unchanged();
            }
            state.detail.loading = false;
            state.detail.detail = Some(detail);
            DispatchResult::changed()
        }

        Action::DetailDidError { generation, .. } => {
            if generation != state.detail.generation {
                return DispatchResult::unchanged();
            }
            state.detail.loading = false;
            state.detail.detail = None;
            DispatchResult::changed()
        }

        Action::DetailFlipSprite => {
            if !matches!(state.route, Route::Detail(_)) {
                return DispatchResult::unchanged();
            }
            state.detail.facing = state.detail.facing.toggle();
            DispatchResult::changed()
        }

        Action::DetailStep(delta) => {
            let Some(id) = state.detail.id else {
                return DispatchResult::unchanged();
            };
            let next = i64::from(id) + i64::from(delta);
            let Ok(next) = u32::try_from(next) else {
                return DispatchResult::unchanged();
            };
            if next == 0 || next == id {
                return DispatchResult::unchanged();
            }
            let effects = enter_route(state, Route::detail(next));
            DispatchResult::changed_with_many(effects)
        }

        Action::DetailBack => {
            if state.route == Route::List {
                return DispatchResult::unchanged();
            }
            let effects = enter_route(state, Route::List);
            DispatchResult::changed_with_many(effects)
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Switch route. Every switch bumps the detail generation, so a load still in
/// flight for the previous page can no longer write into state.
fn enter_route(state: &mut AppState, route: Route) -> Vec<Effect> {
    let generation = state.detail.generation.wrapping_add(1);
    state.detail = DetailState {
        generation,
        ..DetailState::default()
    };

    let effects = match &route {
        Route::List => Vec::new(),
        Route::Detail(segment) => match route::parse_id(segment) {
            Some(id) => {
                state.detail.id = Some(id);
                state.detail.loading = true;
                vec![Effect::LoadDetail { id, generation }]
            }
            None => {
                log::info!("no pokemon for route segment {segment:?}");
                Vec::new()
            }
        },
    };
    state.route = route;
    effects
}

fn selection_result(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
