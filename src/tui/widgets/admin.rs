use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Intro + errors
            Constraint::Min(0),    // Session table
            Constraint::Length(1), // Store notice
        ])
        .split(area);

    draw_intro(f, app, chunks[0]);
    draw_sessions(f, app, chunks[1]);
    draw_notice(f, app, chunks[2]);
}

fn draw_intro(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Most recent sessions first.",
        Style::default().fg(Color::Gray),
    ))];

    if let Some(error) = &app.state.list_error {
        lines.push(Line::from(Span::styled(
            format!("Failed to load: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_sessions(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Saved Learning Data ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

    let items: Vec<ListItem> = if app.state.all_results.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No results yet. Complete a learning session to see data here.",
            Style::default().fg(Color::Gray),
        )))]
    } else {
        app.state
            .all_results
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<20}", truncate(&row.name, 18)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:<12}", row.date),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<14}", row.subject.label()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        format!("{:>7}", row.correct),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!("{:>10}", row.incorrect),
                        Style::default().fg(Color::Red),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    // Header
    let header = Line::from(vec![Span::styled(
        format!(
            "{:<20}{:<12}{:<14}{:>7}{:>10}",
            "Name", "Date", "Subject", "Correct", "Incorrect"
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )]);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    let mut state = ListState::default();
    if !app.state.all_results.is_empty() {
        state.select(app.admin_selected);
    }

    f.render_widget(Paragraph::new(header), header_area);
    f.render_stateful_widget(list, list_area, &mut state);
}

fn draw_notice(f: &mut Frame, app: &App, area: Rect) {
    if app.store_configured() {
        return;
    }
    let notice = Paragraph::new(Line::from(Span::styled(
        "Result store not configured. Set LETSLEARN_STORE_URL and LETSLEARN_STORE_KEY to enable saving.",
        Style::default().fg(Color::Red),
    )));
    f.render_widget(notice, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
