use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
};

use super::{
    status_bar_style, Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::detail::{artwork_url, TypeIcon};
use crate::state::{AppState, BaseStat, PokemonDetail, SpriteFacing};

pub struct DetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Info panel for the pokemon under `/details/{id}`.
pub struct DetailView {
    status_bar: StatusBar,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::DetailBack),
                KeyCode::Char('f') | KeyCode::Char(' ') => Some(Action::DetailFlipSprite),
                KeyCode::Char('[') | KeyCode::Left => Some(Action::DetailStep(-1)),
                KeyCode::Char(']') | KeyCode::Right => Some(Action::DetailStep(1)),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailViewProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEMON INFO")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        match &state.detail.detail {
            _ if state.detail.loading => render_notice(frame, inner, "Loading..."),
            Some(detail) => render_info(frame, inner, detail, state.detail.facing),
            None => render_notice(frame, inner, "Pokemon not found"),
        }

        let route = state.route.path();
        let status_items = [StatusBarItem::span(Span::styled(
            route,
            Style::default().fg(ACCENT_GOLD),
        ))];
        let hints = [
            StatusBarHint::new("Esc", "back"),
            StatusBarHint::new("f", "flip"),
            StatusBarHint::new("[ ]", "prev/next"),
            StatusBarHint::new("q", "quit"),
        ];
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
            chunks[1],
            status_props,
        );
    }
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM)),
        area,
    );
}

fn render_info(frame: &mut Frame, area: Rect, detail: &PokemonDetail, facing: SpriteFacing) {
    let rows = Layout::vertical([Constraint::Min(8), Constraint::Length(2)]).split(area);
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0]);

    frame.render_widget(Paragraph::new(profile_text(detail)), columns[0]);

    let right = Layout::vertical([Constraint::Length(8), Constraint::Min(2)]).split(columns[1]);
    let stats_block = Block::default().borders(Borders::ALL).title("STATS");
    frame.render_widget(
        Paragraph::new(stats_text(&detail.stats)).block(stats_block),
        right[0],
    );
    let about_block = Block::default().borders(Borders::ALL).title("ABOUT");
    frame.render_widget(
        Paragraph::new(detail.description_text().to_string())
            .block(about_block)
            .wrap(Wrap { trim: true }),
        right[1],
    );

    frame.render_widget(Paragraph::new(sprite_text(detail.id, facing)), rows[1]);
}

fn profile_text(detail: &PokemonDetail) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD);
    let field = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<8}"), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        field("No.", detail.dex_number()),
        field("NAME", detail.display_name.to_uppercase()),
        field("HEIGHT", detail.height_label()),
        field("WEIGHT", detail.weight_label()),
        Line::from(Span::styled("TYPES", label)),
    ];
    for (name, icon) in detail.type_icons() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {} ", name.to_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(type_color(icon))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(icon.asset_path(), label),
        ]));
    }
    lines.push(field("ABILITY", detail.ability_name.clone()));
    Text::from(lines)
}

/// Sprite and artwork URLs, one per line at full width.
fn sprite_text(id: u32, facing: SpriteFacing) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let link = Style::default().fg(ACCENT_TEAL);
    Text::from(vec![
        Line::from(vec![
            Span::styled(format!("{:<8}", facing.label().to_uppercase()), label),
            Span::styled(facing.sprite_url(id), link),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<8}", "ART"), label),
            Span::styled(artwork_url(id), link),
        ]),
    ])
}

fn stats_text(stats: &[BaseStat]) -> Text<'static> {
    if stats.is_empty() {
        return Text::from("No stats loaded.");
    }
    Text::from(
        stats
            .iter()
            .map(|stat| Line::from(render_stat(stat)))
            .collect::<Vec<_>>(),
    )
}

fn render_stat(stat: &BaseStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar = "#".repeat((stat.value as usize / 10).clamp(1, 20));
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

pub(crate) fn type_color(icon: TypeIcon) -> Color {
    match icon {
        TypeIcon::Normal => Color::Rgb(168, 168, 120),
        TypeIcon::Fire => Color::Rgb(240, 128, 48),
        TypeIcon::Water => Color::Rgb(104, 144, 240),
        TypeIcon::Grass => Color::Rgb(120, 200, 80),
        TypeIcon::Electric => Color::Rgb(248, 208, 48),
        TypeIcon::Ice => Color::Rgb(152, 216, 216),
        TypeIcon::Fighting => Color::Rgb(192, 48, 40),
        TypeIcon::Poison => Color::Rgb(160, 64, 160),
        TypeIcon::Ground => Color::Rgb(224, 192, 104),
        TypeIcon::Flying => Color::Rgb(168, 144, 240),
        TypeIcon::Psychic => Color::Rgb(248, 88, 136),
        TypeIcon::Bug => Color::Rgb(168, 184, 32),
        TypeIcon::Rock => Color::Rgb(184, 160, 56),
        TypeIcon::Ghost => Color::Rgb(112, 88, 152),
        TypeIcon::Dragon => Color::Rgb(112, 56, 248),
        TypeIcon::Dark => Color::Rgb(112, 88, 72),
        TypeIcon::Steel => Color::Rgb(184, 184, 208),
        TypeIcon::Default => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use tui_dispatch::testing::*;

    fn actions_for(code: &str) -> Vec<Action> {
        let mut component = DetailView::new();
        let state = AppState::default();
        let props = DetailViewProps {
            state: &state,
            is_focused: true,
        };
        component
            .handle_event(&EventKind::Key(key(code)), props)
            .into_iter()
            .collect()
    }

    fn render(state: &AppState) -> String {
        let mut render = RenderHarness::new(120, 24);
        let mut component = DetailView::new();
        render.render_to_string_plain(|frame| {
            let props = DetailViewProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_detail_keys() {
        actions_for("b").assert_first(Action::DetailBack);
        actions_for("f").assert_first(Action::DetailFlipSprite);
        actions_for("]").assert_first(Action::DetailStep(1));
        actions_for("[").assert_first(Action::DetailStep(-1));
        actions_for("x").assert_empty();
    }

    #[test]
    fn test_render_not_found() {
        let mut state = AppState::default();
        state.route = Route::Detail("notanumber".into());
        let output = render(&state);
        assert!(output.contains("Pokemon not found"));
    }

    #[test]
    fn test_render_stat_bar() {
        let stat = BaseStat {
            name: "speed".into(),
            value: 90,
        };
        assert_eq!(render_stat(&stat), " SPD  90 #########");
        let weak = BaseStat {
            name: "hp".into(),
            value: 1,
        };
        assert_eq!(render_stat(&weak), "  HP   1 #");
    }

    #[test]
    fn test_unknown_type_uses_neutral_color() {
        assert_eq!(type_color(TypeIcon::for_type("fairy")), Color::Gray);
        assert_ne!(
            type_color(TypeIcon::Electric),
            type_color(TypeIcon::Default)
        );
    }
}
