use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(area, 56, 7);

    let name = if app.state.learner_name.is_empty() {
        "there"
    } else {
        app.state.learner_name.as_str()
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Hii {}! 🎉", name),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Happy to have you learn with us",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("<CR>", Style::default().fg(Color::Cyan)),
            Span::raw(" Choose a subject"),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), card);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
