use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Subject;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new(Line::from(Span::styled(
        "Your selection will be highlighted. Then continue.",
        Style::default().fg(Color::Gray),
    )));
    f.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = Subject::ALL
        .iter()
        .map(|subject| {
            let selected = app.state.subject == Some(*subject);
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
                Span::styled(subject.label(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Choose a subject ")
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
    state.select(Some(app.subject_cursor));

    f.render_stateful_widget(list, chunks[1], &mut state);
}
