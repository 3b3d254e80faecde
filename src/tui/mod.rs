mod ui;
mod widgets;

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::models::{today_eastern, Difficulty, ResultRow, Subject};
use crate::questions::QuestionSource;
use crate::snapshot::SnapshotStore;
use crate::state::{Effect, Event, Route, SessionState};
use crate::store::ResultStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct App {
    pub state: SessionState,
    store: ResultStore,
    source: QuestionSource,
    snapshots: SnapshotStore,
    store_configured: bool,
    tx: Sender<Event>,
    rx: Receiver<Event>,

    pub login_user: String,
    pub login_pass: String,
    pub login_focus: LoginField,
    pub name_input: String,
    pub subject_cursor: usize,
    pub difficulty_cursor: usize,
    pub choice_cursor: usize,
    pub admin_selected: Option<usize>,
    pub confirm_end: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: ResultStore, source: QuestionSource, snapshots: SnapshotStore) -> Self {
        let (tx, rx) = mpsc::channel();
        let store_configured = store.is_configured();

        // Resume a previous session if a snapshot survives
        let (state, effects) = match snapshots.load() {
            Some(snapshot) => SessionState::restore(snapshot),
            None => (SessionState::new(), Vec::new()),
        };

        let name_input = state.learner_name.clone();
        let app = Self {
            state,
            store,
            source,
            snapshots,
            store_configured,
            tx,
            rx,
            login_user: String::new(),
            login_pass: String::new(),
            login_focus: LoginField::Username,
            name_input,
            subject_cursor: 0,
            difficulty_cursor: 0,
            choice_cursor: 0,
            admin_selected: None,
            confirm_end: false,
            should_quit: false,
        };
        for effect in effects {
            app.run_effect(effect);
        }
        app
    }

    pub fn store_configured(&self) -> bool {
        self.store_configured
    }

    // Route an intent through the state machine, execute whatever side
    // effects it asks for, then persist the snapshot (or drop it on logout).
    fn dispatch(&mut self, event: Event) {
        let effects = self.state.handle(event);
        let mut snapshot_cleared = false;
        for effect in effects {
            if effect == Effect::ClearSnapshot {
                snapshot_cleared = true;
            } else {
                self.run_effect(effect);
            }
        }
        if snapshot_cleared {
            self.snapshots.clear().ok();
        } else {
            self.snapshots.save(&self.state.snapshot()).ok();
        }
    }

    // I/O runs on worker threads; completions come back through the channel
    // and are folded in between frames.
    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadQuestions {
                subject,
                difficulty,
                generation,
            } => {
                let source = self.source.clone();
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let result = source.load(subject, difficulty).map_err(|e| e.to_string());
                    tx.send(Event::QuestionsLoaded { generation, result }).ok();
                });
            }
            Effect::SaveResult {
                name,
                subject,
                correct,
                incorrect,
            } => {
                let store = self.store.clone();
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let row = ResultRow {
                        id: None,
                        name,
                        date: today_eastern(),
                        subject,
                        correct: correct as i64,
                        incorrect: incorrect as i64,
                        created_at: None,
                    };
                    let result = store.upsert(&row).map_err(|e| e.to_string());
                    tx.send(Event::SaveFinished { result }).ok();
                });
            }
            Effect::FetchResults => {
                let store = self.store.clone();
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let result = store.list().map_err(|e| e.to_string());
                    tx.send(Event::ResultsFetched { result }).ok();
                });
            }
            Effect::ClearSnapshot => {
                self.snapshots.clear().ok();
            }
        }
    }

    fn drain_io(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Text-entry screens consume printable keys
        match self.state.route {
            Route::Login => return self.handle_login_key(key),
            Route::Welcome => return self.handle_welcome_key(key),
            _ => {}
        }

        if self.confirm_end {
            return self.handle_confirm_key(key);
        }

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('a') => {
                self.dispatch(Event::ShowAdmin);
                return;
            }
            KeyCode::Char('L') => {
                self.logout();
                return;
            }
            _ => {}
        }

        match self.state.route {
            Route::Transition => self.handle_transition_key(key),
            Route::SubjectSelect => self.handle_subject_key(key),
            Route::DifficultySelect => self.handle_difficulty_key(key),
            Route::Quiz => self.handle_quiz_key(key),
            Route::Results => self.handle_results_key(key),
            Route::Admin => self.handle_admin_key(key),
            Route::Login | Route::Welcome => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_focus = match self.login_focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Enter => {
                self.dispatch(Event::SubmitLogin {
                    username: self.login_user.clone(),
                    password: self.login_pass.clone(),
                });
            }
            KeyCode::Backspace => {
                match self.login_focus {
                    LoginField::Username => self.login_user.pop(),
                    LoginField::Password => self.login_pass.pop(),
                };
            }
            KeyCode::Char(c) => match self.login_focus {
                LoginField::Username => self.login_user.push(c),
                LoginField::Password => self.login_pass.push(c),
            },
            _ => {}
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.logout(),
            KeyCode::Enter => {
                self.dispatch(Event::SubmitName {
                    name: self.name_input.clone(),
                });
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => self.name_input.push(c),
            _ => {}
        }
    }

    fn handle_transition_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Char('c')) {
            self.dispatch(Event::ChooseSubjects);
        }
    }

    fn handle_subject_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.subject_cursor = next_index(self.subject_cursor, Subject::ALL.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.subject_cursor = prev_index(self.subject_cursor, Subject::ALL.len());
            }
            KeyCode::Enter => {
                self.dispatch(Event::SelectSubject(Subject::ALL[self.subject_cursor]));
            }
            KeyCode::Char('c') | KeyCode::Char('l') | KeyCode::Right => {
                self.dispatch(Event::ConfirmSubject);
            }
            _ => {}
        }
    }

    fn handle_difficulty_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.difficulty_cursor = next_index(self.difficulty_cursor, Difficulty::ALL.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.difficulty_cursor = prev_index(self.difficulty_cursor, Difficulty::ALL.len());
            }
            KeyCode::Enter => {
                self.dispatch(Event::SelectDifficulty(
                    Difficulty::ALL[self.difficulty_cursor],
                ));
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc => {
                self.dispatch(Event::BackToSubjects);
            }
            KeyCode::Char('s') => {
                self.choice_cursor = 0;
                self.dispatch(Event::StartQuiz);
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyCode) {
        let choices = self
            .state
            .current_question()
            .map_or(0, |q| q.choices.len());

        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.choice_cursor = next_index(self.choice_cursor.min(choices.saturating_sub(1)), choices);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.choice_cursor = prev_index(self.choice_cursor.min(choices.saturating_sub(1)), choices);
            }
            KeyCode::Enter => {
                self.dispatch(Event::ChooseAnswer(self.choice_cursor));
            }
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => {
                let before = self.state.question_index;
                self.dispatch(Event::Advance);
                if self.state.question_index != before || self.state.route != Route::Quiz {
                    self.choice_cursor = 0;
                }
            }
            KeyCode::Char('e') => self.confirm_end = true,
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.confirm_end = false;
                self.dispatch(Event::EndSession);
            }
            KeyCode::Char('n') | KeyCode::Esc => self.confirm_end = false,
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('c') => self.dispatch(Event::ContinueLearning),
            KeyCode::Char('t') => self.dispatch(Event::TryAnotherSet),
            _ => {}
        }
    }

    fn handle_admin_key(&mut self, key: KeyCode) {
        let rows = self.state.all_results.len();
        match key {
            // Plain r or ^r, either way a refresh
            KeyCode::Char('r') => self.dispatch(Event::RefreshAdmin),
            KeyCode::Char('c') => self.dispatch(Event::ContinueLearning),
            KeyCode::Char('j') | KeyCode::Down if rows > 0 => {
                self.admin_selected = Some(match self.admin_selected {
                    Some(i) => next_index(i, rows),
                    None => 0,
                });
            }
            KeyCode::Char('k') | KeyCode::Up if rows > 0 => {
                self.admin_selected = Some(match self.admin_selected {
                    Some(i) => prev_index(i, rows),
                    None => 0,
                });
            }
            KeyCode::Char('g') if rows > 0 => self.admin_selected = Some(0),
            KeyCode::Char('G') if rows > 0 => self.admin_selected = Some(rows - 1),
            _ => {}
        }
    }

    fn logout(&mut self) {
        self.dispatch(Event::Logout);
        self.login_user.clear();
        self.login_pass.clear();
        self.login_focus = LoginField::Username;
        self.name_input.clear();
        self.subject_cursor = 0;
        self.difficulty_cursor = 0;
        self.choice_cursor = 0;
        self.admin_selected = None;
        self.confirm_end = false;
    }
}

fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn run(
    store: ResultStore,
    source: QuestionSource,
    snapshots: SnapshotStore,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, source, snapshots);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_io();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
