use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
};

use super::{
    status_bar_style, Component, ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM,
    TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;

const PAGE_STEP: i16 = 10;

pub struct DexListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search box plus the filtered catalog.
pub struct DexList {
    list: SelectList,
    status_bar: StatusBar,
}

impl Default for DexList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl DexList {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_event(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Up => Some(Action::SelectionMove(-1)),
            KeyCode::Down => Some(Action::SelectionMove(1)),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn browse_event(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char('/') => Some(Action::SearchStart),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::CatalogFetch),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Enter => Some(Action::DexOpen),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(1)),
            KeyCode::PageUp => Some(Action::SelectionMove(-PAGE_STEP)),
            KeyCode::PageDown => Some(Action::SelectionMove(PAGE_STEP)),
            KeyCode::Home => Some(Action::SelectionJumpTop),
            KeyCode::End => Some(Action::SelectionJumpBottom),
            _ => None,
        }
    }
}

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) if props.state.search.active => Self::search_event(key.code),
            EventKind::Key(key) => Self::browse_event(key.code),
            EventKind::Scroll { delta, .. } => Some(Action::SelectionMove((*delta * 3) as i16)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DexListProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("DEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(if props.is_focused {
                Style::default().fg(ACCENT_TEAL)
            } else {
                Style::default().fg(TEXT_DIM)
            });
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if state.loading {
            frame.render_widget(
                Paragraph::new("Loading...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                inner,
            );
        } else if state.filtered_indices.is_empty() {
            frame.render_widget(
                Paragraph::new("No results found")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                inner,
            );
        } else {
            let items = dex_items(state);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: state.selected_index.min(items.len().saturating_sub(1)),
                is_focused: props.is_focused,
                style: dex_list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: true,
                    wrap_navigation: false,
                },
                on_select: Action::DexSelect,
                render_item: &|item| item.clone(),
            };
            self.list.render(frame, inner, list_props);
        }

        let sprite = match state.selected_entry() {
            Some(entry) if !state.loading => Line::from(vec![
                Span::styled(" sprite ", Style::default().fg(TEXT_DIM)),
                Span::styled(entry.sprite_url(), Style::default().fg(ACCENT_TEAL)),
            ]),
            _ => Line::default(),
        };
        frame.render_widget(Paragraph::new(sprite), chunks[2]);

        let status = if state.loading {
            "Loading catalog..."
        } else if state.refreshing {
            "Refreshing..."
        } else {
            ""
        };
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(ACCENT_GOLD),
        ))];
        let hints = list_hints(state);
        let status_props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items),
            style: status_bar_style(),
            is_focused: false,
        };
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[3],
            status_props,
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title_style = Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/ to search".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let text = Text::from(vec![
        Line::from(vec![
            Span::styled("Search your favourite Pokemon", title_style),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{}/{}",
                    state.filtered_indices.len(),
                    state.catalog.len()
                ),
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(search, Style::default().fg(ACCENT_TEAL)),
        ]),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("POKEDEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .visible_entries()
        .map(|entry| Line::from(format!("#{:03} {}", entry.id, entry.name)))
        .collect()
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn list_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        vec![
            StatusBarHint::new("Enter", "apply"),
            StatusBarHint::new("Esc", "clear"),
        ]
    } else {
        vec![
            StatusBarHint::new("Enter", "open"),
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("r", "reload"),
            StatusBarHint::new("q", "quit"),
        ]
    }
}
