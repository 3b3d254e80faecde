use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Difficulty;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new(Line::from(Span::styled(
        "This will determine the set of questions.",
        Style::default().fg(Color::Gray),
    )));
    f.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = Difficulty::ALL
        .iter()
        .map(|difficulty| {
            let selected = app.state.difficulty == Some(*difficulty);
            let marker = if selected { "✓ " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(difficulty.label(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Pick a difficulty ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.difficulty_cursor));

    f.render_stateful_widget(list, chunks[1], &mut state);
}
