use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(area, 56, 8);

    let name_line = if app.name_input.is_empty() {
        Line::from(vec![
            Span::styled("Your name: ", Style::default().fg(Color::DarkGray)),
            Span::styled("e.g., Jordan", Style::default().fg(Color::DarkGray)),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Your name: ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.name_input.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Enter your name to begin a learning session.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        name_line,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Welcome! ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

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
