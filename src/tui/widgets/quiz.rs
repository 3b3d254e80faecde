use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::today_eastern;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Question + choices
            Constraint::Length(1), // Score line
        ])
        .split(area);

    draw_progress(f, app, chunks[0]);
    draw_question(f, app, chunks[1]);
    draw_score(f, app, chunks[2]);

    if app.confirm_end {
        draw_confirm_dialog(f, app, area);
    }
}

fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let total = app.state.questions.len();
    let ratio = if total == 0 {
        0.0
    } else {
        app.state.question_index as f64 / total as f64
    };

    let label = if total == 0 {
        "—".to_string()
    } else {
        format!("Question {} of {}", app.state.question_index + 1, total)
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(label);

    f.render_widget(gauge, area);
}

fn draw_question(f: &mut Frame, app: &App, area: Rect) {
    let title = match (app.state.subject, app.state.difficulty) {
        (Some(subject), Some(difficulty)) => {
            format!(" {} • {} ", subject.label(), difficulty.label())
        }
        _ => " Quiz ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.loading_questions {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Loading questions…",
                Style::default().fg(Color::Gray),
            )),
            inner,
        );
        return;
    }

    if let Some(error) = &app.state.question_error {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("Failed to load questions: {}", error),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let Some(question) = app.state.current_question() else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No questions available for this set.",
                Style::default().fg(Color::Gray),
            )),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let prompt = Paragraph::new(Span::styled(
        question.prompt.clone(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[0]);

    let items: Vec<ListItem> = question
        .choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let selected = app.state.selected_choice == Some(idx);
            let (suffix, style) = match (selected, app.state.is_answer_correct) {
                (true, Some(true)) => (" ✓", Style::default().fg(Color::Green)),
                (true, Some(false)) => (" ✗", Style::default().fg(Color::Red)),
                _ => ("", Style::default().fg(Color::White)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}", choice, suffix), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    let cursor = app.choice_cursor.min(question.choices.len().saturating_sub(1));
    state.select(Some(cursor));

    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_score(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("Correct: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", app.state.correct_count),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" • "),
        Span::styled("Incorrect: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", app.state.incorrect_count),
            Style::default().fg(Color::Red),
        ),
    ];
    if app.state.saving {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Saving…", Style::default().fg(Color::Yellow)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_confirm_dialog(f: &mut Frame, app: &App, area: Rect) {
    let dialog = centered_rect(area, 56, 7);
    f.render_widget(Clear, dialog);

    let name = if app.state.learner_name.is_empty() {
        "no name"
    } else {
        app.state.learner_name.as_str()
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(
                "We'll save your progress for today ({}) under {}",
                today_eastern(),
                name
            ),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::raw("and then open the results page.")),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Cyan)),
            Span::raw(" Show results  "),
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(" Cancel"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Show results and save? ")
        .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), dialog);
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
