use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::today_eastern;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(area, 60, 12);

    let name = if app.state.learner_name.is_empty() {
        "friend"
    } else {
        app.state.learner_name.as_str()
    };

    let subject = app
        .state
        .subject
        .map(|s| s.label())
        .unwrap_or("-");
    let difficulty = app
        .state
        .difficulty
        .map(|d| d.label())
        .unwrap_or("-");

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Here's your learning summary for {}.", today_eastern()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Subject:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(subject, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::DarkGray)),
            Span::styled(difficulty, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Correct:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", app.state.correct_count),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Incorrect:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", app.state.incorrect_count),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    if app.state.saving {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(Color::Yellow),
        )));
    }

    if let Some(error) = &app.state.save_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Save failed: {}", error),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Great work, {}! 🎉 ", name))
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
