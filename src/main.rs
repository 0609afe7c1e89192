//! Pokedex TUI - browse the PokeAPI catalog from the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{self, HttpSource, PokeSource, API_BASE};
use pokedex::catalog::{CatalogPage, DEFAULT_LIMIT};
use pokedex::components::{Component, DetailView, DetailViewProps, DexList, DexListProps};
use pokedex::config::{default_cache_dir, Config, DEFAULT_LANGUAGE};
use pokedex::detail::load_detail;
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::persist::CatalogSlot;
use pokedex::reducer::reducer;
use pokedex::route::Route;
use pokedex::state::AppState;

/// Pokedex TUI backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI pokedex in the terminal")]
struct Args {
    /// Number of catalog entries to fetch
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=2000))]
    limit: u32,

    /// Catalog offset
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Language code for localized names and descriptions
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// PokeAPI base URL
    #[arg(long, default_value = API_BASE)]
    api_base: String,

    /// Do not read or write the stored catalog
    #[arg(long)]
    no_persist: bool,

    /// Do not cache detail responses on disk
    #[arg(long)]
    no_http_cache: bool,

    /// Directory for the stored catalog, response cache and log file
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Start on this route, e.g. `/details/25`
    #[arg(long, default_value = "/")]
    route: Route,

    /// Log file (defaults to `pokedex.log` in the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `pokedex=debug`
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_base: self.api_base.clone(),
            page: CatalogPage {
                limit: self.limit,
                offset: self.offset,
            },
            language: self.lang.clone(),
            persist: !self.no_persist,
            http_cache: !self.no_http_cache,
            cache_dir: self.cache_dir.clone().unwrap_or_else(default_cache_dir),
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    List,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    List,
    Detail,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        match self.route {
            Route::List => Some(DexComponentId::List),
            Route::Detail(_) => Some(DexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        None
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::List => DexContext::List,
            DexComponentId::Detail => DexContext::Detail,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}

/// Long-lived handles the effect handler needs.
#[derive(Clone)]
struct Services {
    source: Arc<dyn PokeSource>,
    slot: Option<CatalogSlot>,
    language: String,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config();

    let log_path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    if let Err(err) = logging::init(&log_path, &args.log_level) {
        eprintln!("Warning: logging disabled ({}): {err}", log_path.display());
    }

    let debug = DebugSession::new(args.debug);

    let slot = config.persist.then(|| config.catalog_slot());
    let hydrate_slot = slot.clone();
    let page = config.page;
    let persist = config.persist;
    let route = args.route;
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(page, persist);
            state.route = route;
            if let Some(slot) = hydrate_slot {
                match slot.load().await {
                    Ok(Some(entries)) => {
                        log::info!(
                            "hydrated {} entries from {}",
                            entries.len(),
                            slot.path().display()
                        );
                        state.hydrate(entries);
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("ignoring stored catalog: {err}"),
                }
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let services = Services {
        source: Arc::new(HttpSource::new(
            config.api_base.clone(),
            config.http_cache_dir(),
        )),
        slot,
        language: config.language.clone(),
    };

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, services, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

struct DexUi {
    list: DexList,
    detail: DetailView,
}

impl DexUi {
    fn new() -> Self {
        Self {
            list: DexList::new(),
            detail: DetailView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        match state.route {
            Route::List => {
                event_ctx.set_component_area(DexComponentId::List, area);
                event_ctx.component_areas.remove(&DexComponentId::Detail);
                let props = DexListProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                self.list.render(frame, area, props);
            }
            Route::Detail(_) => {
                event_ctx.set_component_area(DexComponentId::Detail, area);
                event_ctx.component_areas.remove(&DexComponentId::List);
                let props = DetailViewProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                self.detail.render(frame, area, props);
            }
        }
    }

    fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DexListProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        respond(actions)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        respond(actions)
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Services,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect: Effect, ctx: &mut EffectContext<Action>| {
                handle_effect(effect, ctx, &services)
            },
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::FetchCatalog { page } => {
            let source = Arc::clone(&services.source);
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog(source.as_ref(), page).await {
                    Ok(entries) => Action::CatalogDidLoad(entries),
                    Err(err) => {
                        log::error!("catalog fetch failed: {err}");
                        Action::CatalogDidError(err.to_string())
                    }
                }
            });
        }
        Effect::PersistCatalog { entries } => {
            let Some(slot) = services.slot.clone() else {
                return;
            };
            ctx.tasks().spawn(TaskKey::new("persist"), async move {
                match slot.store(&entries).await {
                    Ok(()) => Action::CatalogDidPersist(entries.len()),
                    Err(err) => {
                        log::warn!("catalog persist failed: {err}");
                        Action::CatalogPersistDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadDetail { id, generation } => {
            let source = Arc::clone(&services.source);
            let language = services.language.clone();
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match load_detail(source.as_ref(), id, &language).await {
                    Ok(detail) => Action::DetailDidLoad { generation, detail },
                    Err(err) => {
                        log::warn!("detail #{id} failed: {err}");
                        Action::DetailDidError {
                            generation,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
