use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets::{admin, difficulty, login, quiz, results, subject, transition, welcome};
use super::App;
use crate::state::Route;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_help_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Learning together 🤝",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Coding & Math", Style::default().fg(Color::DarkGray)),
    ];

    // Session context once past the login screen
    if app.state.route != Route::Login {
        if !app.state.learner_name.is_empty() {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                app.state.learner_name.clone(),
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(subject) = app.state.subject {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                subject.label(),
                Style::default().fg(Color::Yellow),
            ));
            if let Some(difficulty) = app.state.difficulty {
                spans.push(Span::raw(" / "));
                spans.push(Span::styled(
                    difficulty.label(),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default());

    f.render_widget(header, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.state.route {
        Route::Login => login::draw(f, app, area),
        Route::Welcome => welcome::draw(f, app, area),
        Route::Transition => transition::draw(f, app, area),
        Route::SubjectSelect => subject::draw(f, app, area),
        Route::DifficultySelect => difficulty::draw(f, app, area),
        Route::Quiz => quiz::draw(f, app, area),
        Route::Results => results::draw(f, app, area),
        Route::Admin => admin::draw(f, app, area),
    }
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let key = |label: &'static str| Span::styled(label, Style::default().fg(Color::Cyan));

    let mut spans: Vec<Span> = Vec::new();
    match app.state.route {
        Route::Login => {
            spans.extend(vec![
                key("Tab"),
                Span::raw(" Switch field  "),
                key("<CR>"),
                Span::raw(" Login  "),
                key("<Esc>"),
                Span::raw(" Quit"),
            ]);
        }
        Route::Welcome => {
            spans.extend(vec![
                key("<CR>"),
                Span::raw(" Continue  "),
                key("<Esc>"),
                Span::raw(" Logout"),
            ]);
        }
        Route::Transition => {
            spans.extend(vec![key("<CR>"), Span::raw(" Choose a subject  ")]);
        }
        Route::SubjectSelect => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Nav  "),
                key("<CR>"),
                Span::raw(" Select  "),
                key("c"),
                Span::raw(" Continue  "),
            ]);
        }
        Route::DifficultySelect => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Nav  "),
                key("<CR>"),
                Span::raw(" Select  "),
                key("s"),
                Span::raw(" Start  "),
                key("h"),
                Span::raw(" Back  "),
            ]);
        }
        Route::Quiz => {
            if app.confirm_end {
                spans.extend(vec![
                    key("y"),
                    Span::raw(" Save & show results  "),
                    key("n"),
                    Span::raw(" Keep going"),
                ]);
            } else {
                spans.extend(vec![
                    key("j/k"),
                    Span::raw(" Nav  "),
                    key("<CR>"),
                    Span::raw(" Answer  "),
                    key("n"),
                    Span::raw(" Next  "),
                    key("e"),
                    Span::raw(" End session  "),
                ]);
            }
        }
        Route::Results => {
            spans.extend(vec![
                key("c"),
                Span::raw(" Continue learning  "),
                key("t"),
                Span::raw(" Try another set  "),
            ]);
        }
        Route::Admin => {
            spans.extend(vec![
                key("r"),
                Span::raw(" Refresh  "),
                key("j/k"),
                Span::raw(" Nav  "),
                key("c"),
                Span::raw(" Continue learning  "),
            ]);
        }
    }

    // Global keys on every screen past the text-entry ones
    if !matches!(app.state.route, Route::Login | Route::Welcome) && !app.confirm_end {
        spans.extend(vec![
            key("a"),
            Span::raw(" Results table  "),
            key("L"),
            Span::raw(" Logout  "),
            key("q"),
            Span::raw(" Quit"),
        ]);
    }

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
