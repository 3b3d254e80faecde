use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::{App, LoginField};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(area, 64, 12);

    let focused = Style::default().fg(Color::Yellow);
    let blurred = Style::default().fg(Color::White);

    let username_style = if app.login_focus == LoginField::Username {
        focused
    } else {
        blurred
    };
    let password_style = if app.login_focus == LoginField::Password {
        focused
    } else {
        blurred
    };

    let mut username = app.login_user.clone();
    let mut password = "•".repeat(app.login_pass.chars().count());
    match app.login_focus {
        LoginField::Username => username.push('█'),
        LoginField::Password => password.push('█'),
    }

    let mut lines = vec![
        Line::from(Span::styled(
            "“Tell me and I forget. Teach me and I may remember.",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            " Involve me and I learn” — Confucius",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Username: ", Style::default().fg(Color::DarkGray)),
            Span::styled(username, username_style),
        ]),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::DarkGray)),
            Span::styled(password, password_style),
        ]),
    ];

    if let Some(error) = &app.state.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Login ")
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
