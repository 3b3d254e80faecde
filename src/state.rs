use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Question, ResultRow, Subject};

// Fixed credential pair. Not a security boundary.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "letlearn";

const INVALID_CREDENTIALS: &str = "Invalid credentials. Hint: admin / letlearn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Login,
    Welcome,
    Transition,
    SubjectSelect,
    DifficultySelect,
    Quiz,
    Results,
    Admin,
}

// User intents and I/O completions. The presentation layer only ever feeds
// these in; it never writes session fields directly.
#[derive(Debug, Clone)]
pub enum Event {
    SubmitLogin { username: String, password: String },
    SubmitName { name: String },
    ChooseSubjects,
    SelectSubject(Subject),
    ConfirmSubject,
    SelectDifficulty(Difficulty),
    BackToSubjects,
    StartQuiz,
    ChooseAnswer(usize),
    Advance,
    EndSession,
    ContinueLearning,
    TryAnotherSet,
    ShowAdmin,
    RefreshAdmin,
    Logout,
    QuestionsLoaded {
        generation: u64,
        result: Result<Vec<Question>, String>,
    },
    SaveFinished {
        result: Result<(), String>,
    },
    ResultsFetched {
        result: Result<Vec<ResultRow>, String>,
    },
}

// Side effects requested by a transition; the driver executes them off the
// UI thread and reports back with completion events.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadQuestions {
        subject: Subject,
        difficulty: Difficulty,
        generation: u64,
    },
    SaveResult {
        name: String,
        subject: Subject,
        correct: u32,
        incorrect: u32,
    },
    FetchResults,
    ClearSnapshot,
}

// The persisted subset of the session, written after every handled event.
// Every field is individually defaulted so older or partial snapshots still
// deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub route: Route,
    #[serde(default)]
    pub learner_name: String,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub question_index: usize,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub incorrect_count: u32,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub route: Route,
    pub learner_name: String,
    pub subject: Option<Subject>,
    pub difficulty: Option<Difficulty>,

    pub question_index: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub selected_choice: Option<usize>,
    pub is_answer_correct: Option<bool>,
    // At most one count increment per question
    answer_scored: bool,

    pub questions: Vec<Question>,
    pub loading_questions: bool,
    pub question_error: Option<String>,
    // Completions carrying an older generation are superseded
    load_generation: u64,

    pub saving: bool,
    pub save_error: Option<String>,
    pub login_error: Option<String>,

    pub all_results: Vec<ResultRow>,
    pub list_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // Rebuild from a persisted snapshot, re-deriving the question list (and
    // the admin rows when restored into the admin view) before rendering.
    pub fn restore(snapshot: SessionSnapshot) -> (Self, Vec<Effect>) {
        let mut state = Self {
            route: snapshot.route,
            learner_name: snapshot.learner_name,
            subject: snapshot.subject,
            difficulty: snapshot.difficulty,
            question_index: snapshot.question_index,
            correct_count: snapshot.correct_count,
            incorrect_count: snapshot.incorrect_count,
            ..Self::default()
        };

        let mut effects = Vec::new();
        if state.subject.is_some() && state.difficulty.is_some() {
            effects.extend(state.request_load());
        }
        if state.route == Route::Admin {
            effects.push(Effect::FetchResults);
        }
        (state, effects)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            route: self.route,
            learner_name: self.learner_name.clone(),
            subject: self.subject,
            difficulty: self.difficulty,
            question_index: self.question_index,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SubmitLogin { username, password } => self.submit_login(&username, &password),
            Event::SubmitName { name } => self.submit_name(&name),
            Event::ChooseSubjects => self.choose_subjects(),
            Event::SelectSubject(subject) => self.select_subject(subject),
            Event::ConfirmSubject => self.confirm_subject(),
            Event::SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            Event::BackToSubjects => self.back_to_subjects(),
            Event::StartQuiz => self.start_quiz(),
            Event::ChooseAnswer(idx) => self.choose_answer(idx),
            Event::Advance => self.advance(),
            Event::EndSession => self.end_session(),
            Event::ContinueLearning => self.continue_learning(),
            Event::TryAnotherSet => self.try_another_set(),
            Event::ShowAdmin => self.show_admin(),
            Event::RefreshAdmin => self.refresh_admin(),
            Event::Logout => self.logout(),
            Event::QuestionsLoaded { generation, result } => {
                self.questions_loaded(generation, result)
            }
            Event::SaveFinished { result } => self.save_finished(result),
            Event::ResultsFetched { result } => self.results_fetched(result),
        }
    }

    fn submit_login(&mut self, username: &str, password: &str) -> Vec<Effect> {
        if self.route != Route::Login {
            return Vec::new();
        }
        if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
            self.login_error = None;
            self.route = Route::Welcome;
        } else {
            self.login_error = Some(INVALID_CREDENTIALS.to_string());
        }
        Vec::new()
    }

    fn submit_name(&mut self, name: &str) -> Vec<Effect> {
        if self.route != Route::Welcome {
            return Vec::new();
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        self.learner_name = trimmed.to_string();
        self.route = Route::Transition;
        Vec::new()
    }

    fn choose_subjects(&mut self) -> Vec<Effect> {
        if self.route != Route::Transition {
            return Vec::new();
        }
        self.route = Route::SubjectSelect;
        Vec::new()
    }

    fn select_subject(&mut self, subject: Subject) -> Vec<Effect> {
        if self.route != Route::SubjectSelect || self.subject == Some(subject) {
            return Vec::new();
        }
        self.subject = Some(subject);
        self.reset_progress();
        if self.difficulty.is_some() {
            self.request_load().into_iter().collect()
        } else {
            self.questions.clear();
            Vec::new()
        }
    }

    fn confirm_subject(&mut self) -> Vec<Effect> {
        if self.route != Route::SubjectSelect || self.subject.is_none() {
            return Vec::new();
        }
        self.route = Route::DifficultySelect;
        Vec::new()
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) -> Vec<Effect> {
        if self.route != Route::DifficultySelect || self.difficulty == Some(difficulty) {
            return Vec::new();
        }
        self.difficulty = Some(difficulty);
        self.reset_progress();
        self.request_load().into_iter().collect()
    }

    fn back_to_subjects(&mut self) -> Vec<Effect> {
        if self.route != Route::DifficultySelect {
            return Vec::new();
        }
        self.route = Route::SubjectSelect;
        Vec::new()
    }

    fn start_quiz(&mut self) -> Vec<Effect> {
        if self.route != Route::DifficultySelect || self.difficulty.is_none() {
            return Vec::new();
        }
        self.route = Route::Quiz;
        self.reset_progress();
        self.request_load().into_iter().collect()
    }

    // First selection per question scores exactly one counter. A correct
    // selection locks the question; after a wrong one the learner may keep
    // choosing (correctness is recomputed) but no further counts accrue.
    fn choose_answer(&mut self, idx: usize) -> Vec<Effect> {
        if self.route != Route::Quiz {
            return Vec::new();
        }
        let Some(question) = self.questions.get(self.question_index) else {
            return Vec::new();
        };
        if idx >= question.choices.len() || self.is_answer_correct == Some(true) {
            return Vec::new();
        }

        let correct = idx == question.answer_index;
        self.selected_choice = Some(idx);
        self.is_answer_correct = Some(correct);
        if !self.answer_scored {
            self.answer_scored = true;
            if correct {
                self.correct_count += 1;
            } else {
                self.incorrect_count += 1;
            }
        }
        Vec::new()
    }

    fn advance(&mut self) -> Vec<Effect> {
        if self.route != Route::Quiz || self.is_answer_correct != Some(true) {
            return Vec::new();
        }
        if self.question_index + 1 >= self.questions.len() {
            self.save_and_finish()
        } else {
            self.question_index += 1;
            self.clear_selection();
            Vec::new()
        }
    }

    fn end_session(&mut self) -> Vec<Effect> {
        if self.route != Route::Quiz {
            return Vec::new();
        }
        self.save_and_finish()
    }

    fn save_and_finish(&mut self) -> Vec<Effect> {
        let Some(subject) = self.subject else {
            return Vec::new();
        };
        if self.learner_name.is_empty() {
            return Vec::new();
        }
        self.saving = true;
        vec![Effect::SaveResult {
            name: self.learner_name.clone(),
            subject,
            correct: self.correct_count,
            incorrect: self.incorrect_count,
        }]
    }

    // The save failure is non-fatal to navigation: the results screen is
    // shown either way, with the error surfaced on it.
    fn save_finished(&mut self, result: Result<(), String>) -> Vec<Effect> {
        self.saving = false;
        self.route = Route::Results;
        match result {
            Ok(()) => {
                self.save_error = None;
                vec![Effect::FetchResults]
            }
            Err(message) => {
                self.save_error = Some(message);
                Vec::new()
            }
        }
    }

    fn continue_learning(&mut self) -> Vec<Effect> {
        if !matches!(self.route, Route::Results | Route::Admin) {
            return Vec::new();
        }
        self.route = Route::SubjectSelect;
        Vec::new()
    }

    fn try_another_set(&mut self) -> Vec<Effect> {
        if self.route != Route::Results {
            return Vec::new();
        }
        self.route = Route::DifficultySelect;
        Vec::new()
    }

    fn show_admin(&mut self) -> Vec<Effect> {
        if self.route == Route::Login {
            return Vec::new();
        }
        self.route = Route::Admin;
        vec![Effect::FetchResults]
    }

    fn refresh_admin(&mut self) -> Vec<Effect> {
        if self.route != Route::Admin {
            return Vec::new();
        }
        vec![Effect::FetchResults]
    }

    fn logout(&mut self) -> Vec<Effect> {
        if self.route == Route::Login {
            return Vec::new();
        }
        *self = Self::default();
        vec![Effect::ClearSnapshot]
    }

    fn questions_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Question>, String>,
    ) -> Vec<Effect> {
        if generation != self.load_generation {
            // Superseded by a newer (subject, difficulty) pairing
            return Vec::new();
        }
        self.loading_questions = false;
        match result {
            Ok(questions) => {
                self.questions = questions;
                self.question_error = None;
                if !self.questions.is_empty() && self.question_index >= self.questions.len() {
                    // Restored cursor beyond a shorter document
                    self.question_index = self.questions.len() - 1;
                    self.clear_selection();
                }
            }
            Err(message) => {
                self.question_error = Some(message);
                self.questions.clear();
            }
        }
        Vec::new()
    }

    fn results_fetched(&mut self, result: Result<Vec<ResultRow>, String>) -> Vec<Effect> {
        match result {
            Ok(rows) => {
                self.all_results = rows;
                self.list_error = None;
            }
            Err(message) => self.list_error = Some(message),
        }
        Vec::new()
    }

    fn request_load(&mut self) -> Option<Effect> {
        let (Some(subject), Some(difficulty)) = (self.subject, self.difficulty) else {
            return None;
        };
        self.load_generation += 1;
        self.loading_questions = true;
        self.question_error = None;
        Some(Effect::LoadQuestions {
            subject,
            difficulty,
            generation: self.load_generation,
        })
    }

    fn reset_progress(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected_choice = None;
        self.is_answer_correct = None;
        self.answer_scored = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer_index: usize) -> Question {
        Question {
            prompt: "prompt".into(),
            choices: vec!["a".into(), "b".into(), "c".into()],
            answer_index,
        }
    }

    fn logged_in() -> SessionState {
        let mut state = SessionState::new();
        state.handle(Event::SubmitLogin {
            username: ADMIN_USERNAME.into(),
            password: ADMIN_PASSWORD.into(),
        });
        state.handle(Event::SubmitName {
            name: "Jordan".into(),
        });
        state
    }

    // Logged in, subject and difficulty chosen, quiz started with n loaded
    // questions whose correct answer is always choice 1.
    fn in_quiz(n: usize) -> SessionState {
        let mut state = logged_in();
        state.handle(Event::ChooseSubjects);
        state.handle(Event::SelectSubject(Subject::MathTrack));
        state.handle(Event::ConfirmSubject);
        state.handle(Event::SelectDifficulty(Difficulty::Basics));
        let effects = state.handle(Event::StartQuiz);
        let generation = match effects.as_slice() {
            [Effect::LoadQuestions { generation, .. }] => *generation,
            other => panic!("expected a load effect, got {:?}", other),
        };
        state.handle(Event::QuestionsLoaded {
            generation,
            result: Ok(vec![question(1); n]),
        });
        state
    }

    mod login_tests {
        use super::*;

        #[test]
        fn wrong_password_sets_inline_error() {
            let mut state = SessionState::new();
            state.handle(Event::SubmitLogin {
                username: "admin".into(),
                password: "nope".into(),
            });
            assert_eq!(state.route, Route::Login);
            assert_eq!(
                state.login_error.as_deref(),
                Some("Invalid credentials. Hint: admin / letlearn")
            );
        }

        #[test]
        fn fixed_pair_reaches_welcome_and_clears_error() {
            let mut state = SessionState::new();
            state.handle(Event::SubmitLogin {
                username: "admin".into(),
                password: "nope".into(),
            });
            state.handle(Event::SubmitLogin {
                username: "admin".into(),
                password: "letlearn".into(),
            });
            assert_eq!(state.route, Route::Welcome);
            assert!(state.login_error.is_none());
        }

        #[test]
        fn credentials_must_match_exactly() {
            let mut state = SessionState::new();
            state.handle(Event::SubmitLogin {
                username: "Admin".into(),
                password: "letlearn".into(),
            });
            assert_eq!(state.route, Route::Login);
        }
    }

    mod welcome_tests {
        use super::*;

        fn at_welcome() -> SessionState {
            let mut state = SessionState::new();
            state.handle(Event::SubmitLogin {
                username: ADMIN_USERNAME.into(),
                password: ADMIN_PASSWORD.into(),
            });
            state
        }

        #[test]
        fn blank_name_is_rejected() {
            let mut state = at_welcome();
            state.handle(Event::SubmitName { name: "   ".into() });
            assert_eq!(state.route, Route::Welcome);
            assert!(state.learner_name.is_empty());
        }

        #[test]
        fn name_is_trimmed_and_stored() {
            let mut state = at_welcome();
            state.handle(Event::SubmitName {
                name: "  Jordan  ".into(),
            });
            assert_eq!(state.learner_name, "Jordan");
            assert_eq!(state.route, Route::Transition);
        }
    }

    mod selection_tests {
        use super::*;

        fn at_subjects() -> SessionState {
            let mut state = logged_in();
            state.handle(Event::ChooseSubjects);
            state
        }

        #[test]
        fn transition_leads_to_subject_select() {
            let state = at_subjects();
            assert_eq!(state.route, Route::SubjectSelect);
        }

        #[test]
        fn continue_requires_a_subject() {
            let mut state = at_subjects();
            state.handle(Event::ConfirmSubject);
            assert_eq!(state.route, Route::SubjectSelect);

            state.handle(Event::SelectSubject(Subject::CodingTrack));
            state.handle(Event::ConfirmSubject);
            assert_eq!(state.route, Route::DifficultySelect);
        }

        #[test]
        fn selecting_subject_without_difficulty_does_not_load() {
            let mut state = at_subjects();
            let effects = state.handle(Event::SelectSubject(Subject::CodingTrack));
            assert!(effects.is_empty());
            assert_eq!(state.subject, Some(Subject::CodingTrack));
        }

        #[test]
        fn changing_subject_resets_progress_and_reloads() {
            let mut state = in_quiz(3);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);
            assert_eq!(state.correct_count, 1);

            // Back around the loop to pick the other subject
            state.handle(Event::EndSession);
            state.handle(Event::SaveFinished { result: Ok(()) });
            state.handle(Event::ContinueLearning);
            let effects = state.handle(Event::SelectSubject(Subject::CodingTrack));

            assert_eq!(state.correct_count, 0);
            assert_eq!(state.incorrect_count, 0);
            assert_eq!(state.question_index, 0);
            assert!(matches!(
                effects.as_slice(),
                [Effect::LoadQuestions {
                    subject: Subject::CodingTrack,
                    difficulty: Difficulty::Basics,
                    ..
                }]
            ));
        }

        #[test]
        fn reselecting_same_subject_is_inert() {
            let mut state = at_subjects();
            state.handle(Event::SelectSubject(Subject::MathTrack));
            let effects = state.handle(Event::SelectSubject(Subject::MathTrack));
            assert!(effects.is_empty());
        }

        #[test]
        fn selecting_difficulty_loads_questions() {
            let mut state = at_subjects();
            state.handle(Event::SelectSubject(Subject::MathTrack));
            state.handle(Event::ConfirmSubject);
            let effects = state.handle(Event::SelectDifficulty(Difficulty::Moderate));
            assert!(matches!(
                effects.as_slice(),
                [Effect::LoadQuestions {
                    subject: Subject::MathTrack,
                    difficulty: Difficulty::Moderate,
                    ..
                }]
            ));
            assert!(state.loading_questions);
        }

        #[test]
        fn back_returns_to_subject_select() {
            let mut state = at_subjects();
            state.handle(Event::SelectSubject(Subject::MathTrack));
            state.handle(Event::ConfirmSubject);
            state.handle(Event::BackToSubjects);
            assert_eq!(state.route, Route::SubjectSelect);
        }

        #[test]
        fn start_requires_a_difficulty() {
            let mut state = at_subjects();
            state.handle(Event::SelectSubject(Subject::MathTrack));
            state.handle(Event::ConfirmSubject);
            let effects = state.handle(Event::StartQuiz);
            assert!(effects.is_empty());
            assert_eq!(state.route, Route::DifficultySelect);
        }

        #[test]
        fn start_loads_and_resets() {
            let state = in_quiz(4);
            assert_eq!(state.route, Route::Quiz);
            assert_eq!(state.question_index, 0);
            assert_eq!(state.correct_count, 0);
            assert_eq!(state.incorrect_count, 0);
            assert_eq!(state.questions.len(), 4);
        }
    }

    mod scoring_tests {
        use super::*;

        #[test]
        fn correct_choice_scores_correct_once() {
            let mut state = in_quiz(2);
            state.handle(Event::ChooseAnswer(1));
            assert_eq!(state.correct_count, 1);
            assert_eq!(state.incorrect_count, 0);
            assert_eq!(state.selected_choice, Some(1));
            assert_eq!(state.is_answer_correct, Some(true));
        }

        #[test]
        fn wrong_choice_scores_incorrect_once() {
            let mut state = in_quiz(2);
            state.handle(Event::ChooseAnswer(0));
            assert_eq!(state.correct_count, 0);
            assert_eq!(state.incorrect_count, 1);
            assert_eq!(state.is_answer_correct, Some(false));
        }

        #[test]
        fn rechoosing_after_correct_is_inert() {
            let mut state = in_quiz(2);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::ChooseAnswer(0));
            assert_eq!(state.selected_choice, Some(1));
            assert_eq!(state.correct_count, 1);
            assert_eq!(state.incorrect_count, 0);
        }

        #[test]
        fn wrong_then_right_scores_only_the_first_selection() {
            let mut state = in_quiz(2);
            state.handle(Event::ChooseAnswer(0));
            state.handle(Event::ChooseAnswer(2));
            state.handle(Event::ChooseAnswer(1));
            assert_eq!(state.incorrect_count, 1);
            assert_eq!(state.correct_count, 0);
            assert_eq!(state.is_answer_correct, Some(true));
        }

        #[test]
        fn out_of_bounds_choice_is_ignored() {
            let mut state = in_quiz(2);
            state.handle(Event::ChooseAnswer(7));
            assert!(state.selected_choice.is_none());
            assert_eq!(state.incorrect_count, 0);
        }

        #[test]
        fn choosing_with_no_questions_is_ignored() {
            let mut state = in_quiz(0);
            state.handle(Event::ChooseAnswer(0));
            assert!(state.selected_choice.is_none());
            assert_eq!(state.incorrect_count, 0);
        }

        #[test]
        fn counts_never_exceed_one_per_question() {
            let mut state = in_quiz(3);
            for _ in 0..5 {
                state.handle(Event::ChooseAnswer(0));
                state.handle(Event::ChooseAnswer(2));
            }
            state.handle(Event::ChooseAnswer(1));
            assert!(state.correct_count + state.incorrect_count <= state.question_index as u32 + 1);
        }
    }

    mod advance_tests {
        use super::*;

        #[test]
        fn advance_rejected_without_a_correct_selection() {
            let mut state = in_quiz(2);
            assert!(state.handle(Event::Advance).is_empty());
            assert_eq!(state.question_index, 0);

            state.handle(Event::ChooseAnswer(0));
            assert!(state.handle(Event::Advance).is_empty());
            assert_eq!(state.question_index, 0);
        }

        #[test]
        fn advance_moves_cursor_and_clears_selection() {
            let mut state = in_quiz(3);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);
            assert_eq!(state.question_index, 1);
            assert!(state.selected_choice.is_none());
            assert!(state.is_answer_correct.is_none());
        }

        #[test]
        fn advancing_past_last_question_saves() {
            let mut state = in_quiz(1);
            state.handle(Event::ChooseAnswer(1));
            let effects = state.handle(Event::Advance);
            assert_eq!(
                effects,
                vec![Effect::SaveResult {
                    name: "Jordan".into(),
                    subject: Subject::MathTrack,
                    correct: 1,
                    incorrect: 0,
                }]
            );
            assert!(state.saving);
        }

        #[test]
        fn perfect_run_scores_every_question() {
            let n = 4;
            let mut state = in_quiz(n);
            for _ in 0..n - 1 {
                state.handle(Event::ChooseAnswer(1));
                state.handle(Event::Advance);
            }
            state.handle(Event::ChooseAnswer(1));
            let effects = state.handle(Event::Advance);

            assert_eq!(state.correct_count, n as u32);
            assert_eq!(state.incorrect_count, 0);
            assert!(matches!(effects.as_slice(), [Effect::SaveResult { .. }]));

            state.handle(Event::SaveFinished { result: Ok(()) });
            assert_eq!(state.route, Route::Results);
        }
    }

    mod save_tests {
        use super::*;

        #[test]
        fn end_session_saves_current_progress() {
            let mut state = in_quiz(3);
            state.handle(Event::ChooseAnswer(0));
            let effects = state.handle(Event::EndSession);
            assert_eq!(
                effects,
                vec![Effect::SaveResult {
                    name: "Jordan".into(),
                    subject: Subject::MathTrack,
                    correct: 0,
                    incorrect: 1,
                }]
            );
        }

        #[test]
        fn successful_save_shows_results_and_refreshes() {
            let mut state = in_quiz(1);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);
            let effects = state.handle(Event::SaveFinished { result: Ok(()) });
            assert_eq!(state.route, Route::Results);
            assert!(state.save_error.is_none());
            assert!(!state.saving);
            assert_eq!(effects, vec![Effect::FetchResults]);
        }

        #[test]
        fn failed_save_still_shows_results() {
            let mut state = in_quiz(1);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);
            let effects = state.handle(Event::SaveFinished {
                result: Err("connection refused".into()),
            });
            assert_eq!(state.route, Route::Results);
            assert_eq!(state.save_error.as_deref(), Some("connection refused"));
            assert!(effects.is_empty());
        }

        #[test]
        fn results_screen_navigation() {
            let mut state = in_quiz(1);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);
            state.handle(Event::SaveFinished { result: Ok(()) });

            state.handle(Event::TryAnotherSet);
            assert_eq!(state.route, Route::DifficultySelect);

            state.handle(Event::StartQuiz);
            state.handle(Event::EndSession);
            state.handle(Event::SaveFinished { result: Ok(()) });
            state.handle(Event::ContinueLearning);
            assert_eq!(state.route, Route::SubjectSelect);
        }
    }

    mod loading_tests {
        use super::*;

        #[test]
        fn stale_generation_is_discarded() {
            let mut state = logged_in();
            state.handle(Event::ChooseSubjects);
            state.handle(Event::SelectSubject(Subject::MathTrack));
            state.handle(Event::ConfirmSubject);
            let first = state.handle(Event::SelectDifficulty(Difficulty::Basics));
            let stale_generation = match first.as_slice() {
                [Effect::LoadQuestions { generation, .. }] => *generation,
                other => panic!("expected load effect, got {:?}", other),
            };

            // A newer pairing supersedes the in-flight load
            let second = state.handle(Event::SelectDifficulty(Difficulty::Moderate));
            let fresh_generation = match second.as_slice() {
                [Effect::LoadQuestions { generation, .. }] => *generation,
                other => panic!("expected load effect, got {:?}", other),
            };

            state.handle(Event::QuestionsLoaded {
                generation: stale_generation,
                result: Ok(vec![question(0)]),
            });
            assert!(state.questions.is_empty());
            assert!(state.loading_questions);

            state.handle(Event::QuestionsLoaded {
                generation: fresh_generation,
                result: Ok(vec![question(1), question(1)]),
            });
            assert_eq!(state.questions.len(), 2);
            assert!(!state.loading_questions);
        }

        #[test]
        fn load_failure_leaves_empty_list_and_inline_error() {
            let mut state = logged_in();
            state.handle(Event::ChooseSubjects);
            state.handle(Event::SelectSubject(Subject::MathTrack));
            state.handle(Event::ConfirmSubject);
            let effects = state.handle(Event::SelectDifficulty(Difficulty::Basics));
            let generation = match effects.as_slice() {
                [Effect::LoadQuestions { generation, .. }] => *generation,
                other => panic!("expected load effect, got {:?}", other),
            };

            state.handle(Event::QuestionsLoaded {
                generation,
                result: Err("file not found".into()),
            });
            assert!(state.questions.is_empty());
            assert_eq!(state.question_error.as_deref(), Some("file not found"));
            assert!(!state.loading_questions);
        }
    }

    mod admin_tests {
        use super::*;

        fn mid_quiz() -> SessionState {
            in_quiz(2)
        }

        #[test]
        fn results_table_reachable_from_any_post_login_route() {
            let builds: [fn() -> SessionState; 2] = [logged_in, mid_quiz];
            for build in builds {
                let mut state = build();
                let effects = state.handle(Event::ShowAdmin);
                assert_eq!(state.route, Route::Admin);
                assert_eq!(effects, vec![Effect::FetchResults]);
            }
        }

        #[test]
        fn not_reachable_from_login() {
            let mut state = SessionState::new();
            let effects = state.handle(Event::ShowAdmin);
            assert_eq!(state.route, Route::Login);
            assert!(effects.is_empty());
        }

        #[test]
        fn refresh_refetches_only_in_admin() {
            let mut state = logged_in();
            assert!(state.handle(Event::RefreshAdmin).is_empty());
            state.handle(Event::ShowAdmin);
            assert_eq!(state.handle(Event::RefreshAdmin), vec![Effect::FetchResults]);
        }

        #[test]
        fn fetched_rows_replace_previous_and_clear_error() {
            let mut state = logged_in();
            state.handle(Event::ShowAdmin);
            state.handle(Event::ResultsFetched {
                result: Err("timeout".into()),
            });
            assert_eq!(state.list_error.as_deref(), Some("timeout"));

            state.handle(Event::ResultsFetched {
                result: Ok(vec![ResultRow {
                    id: Some("row-1".into()),
                    name: "Jordan".into(),
                    date: "2026-08-06".into(),
                    subject: Subject::MathTrack,
                    correct: 3,
                    incorrect: 1,
                    created_at: None,
                }]),
            });
            assert_eq!(state.all_results.len(), 1);
            assert!(state.list_error.is_none());
        }
    }

    mod logout_tests {
        use super::*;

        #[test]
        fn logout_resets_everything_and_clears_snapshot() {
            let mut state = in_quiz(3);
            state.handle(Event::ChooseAnswer(1));
            let effects = state.handle(Event::Logout);

            assert_eq!(effects, vec![Effect::ClearSnapshot]);
            assert_eq!(state.route, Route::Login);
            assert!(state.learner_name.is_empty());
            assert!(state.subject.is_none());
            assert!(state.difficulty.is_none());
            assert_eq!(state.question_index, 0);
            assert_eq!(state.correct_count, 0);
            assert_eq!(state.incorrect_count, 0);
            assert!(state.questions.is_empty());
        }

        #[test]
        fn logout_from_login_is_inert() {
            let mut state = SessionState::new();
            assert!(state.handle(Event::Logout).is_empty());
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn snapshot_captures_persisted_fields() {
            let mut state = in_quiz(3);
            state.handle(Event::ChooseAnswer(1));
            state.handle(Event::Advance);

            let snapshot = state.snapshot();
            assert_eq!(snapshot.route, Route::Quiz);
            assert_eq!(snapshot.learner_name, "Jordan");
            assert_eq!(snapshot.subject, Some(Subject::MathTrack));
            assert_eq!(snapshot.difficulty, Some(Difficulty::Basics));
            assert_eq!(snapshot.question_index, 1);
            assert_eq!(snapshot.correct_count, 1);
        }

        #[test]
        fn restore_resumes_and_rederives_questions() {
            let snapshot = SessionSnapshot {
                route: Route::Quiz,
                learner_name: "Jordan".into(),
                subject: Some(Subject::MathTrack),
                difficulty: Some(Difficulty::Basics),
                question_index: 2,
                correct_count: 2,
                incorrect_count: 1,
            };
            let (state, effects) = SessionState::restore(snapshot);

            assert_eq!(state.route, Route::Quiz);
            assert_eq!(state.question_index, 2);
            assert_eq!(state.correct_count, 2);
            assert_eq!(state.incorrect_count, 1);
            assert!(matches!(
                effects.as_slice(),
                [Effect::LoadQuestions {
                    subject: Subject::MathTrack,
                    difficulty: Difficulty::Basics,
                    ..
                }]
            ));
            assert!(state.loading_questions);
        }

        #[test]
        fn restore_without_selections_loads_nothing() {
            let (state, effects) = SessionState::restore(SessionSnapshot::default());
            assert_eq!(state.route, Route::Login);
            assert!(effects.is_empty());
        }

        #[test]
        fn restore_into_admin_refetches_rows() {
            let snapshot = SessionSnapshot {
                route: Route::Admin,
                learner_name: "Jordan".into(),
                ..SessionSnapshot::default()
            };
            let (_, effects) = SessionState::restore(snapshot);
            assert_eq!(effects, vec![Effect::FetchResults]);
        }

        #[test]
        fn restored_cursor_is_clamped_to_shorter_document() {
            let snapshot = SessionSnapshot {
                route: Route::Quiz,
                learner_name: "Jordan".into(),
                subject: Some(Subject::MathTrack),
                difficulty: Some(Difficulty::Basics),
                question_index: 9,
                correct_count: 9,
                incorrect_count: 0,
            };
            let (mut state, effects) = SessionState::restore(snapshot);
            let generation = match effects.as_slice() {
                [Effect::LoadQuestions { generation, .. }] => *generation,
                other => panic!("expected load effect, got {:?}", other),
            };
            state.handle(Event::QuestionsLoaded {
                generation,
                result: Ok(vec![question(1), question(1)]),
            });
            assert_eq!(state.question_index, 1);
        }
    }
}
