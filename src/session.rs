//! Session state and the view-transition table.
//!
//! `GameSession` is a plain value. Every transition consumes the current
//! session and returns the next one, so a transition is applied as a whole or
//! not at all. Each result passes through [`GameSession::guarded`], which sends
//! any view that lacks the selections it needs back to a safe screen.

use thiserror::Error;

use crate::catalog::{Character, Credential, Student, find_character};

/// Battery bars; one per level.
pub const ENERGY_MAX: u8 = 6;

/// Level number, always within 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct LevelIndex(u8);

impl LevelIndex {
    pub const FIRST: LevelIndex = LevelIndex(1);
    pub const LAST: LevelIndex = LevelIndex(6);
    pub const ALL: [LevelIndex; 6] = [
        LevelIndex(1),
        LevelIndex(2),
        LevelIndex(3),
        LevelIndex(4),
        LevelIndex(5),
        LevelIndex(6),
    ];

    pub fn new(n: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0).contains(&n).then_some(LevelIndex(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl TryFrom<u8> for LevelIndex {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        LevelIndex::new(n).ok_or_else(|| format!("level {n} out of range 1..=6"))
    }
}

impl From<LevelIndex> for u8 {
    fn from(l: LevelIndex) -> u8 {
        l.0
    }
}

/// The single active top-level screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "view", content = "level", rename_all = "camelCase")
)]
pub enum View {
    Login,
    Dashboard,
    EditStudent,
    SelectCharacter,
    IntroVideo,
    ExplanationVideo,
    Level(LevelIndex),
    LevelMap,
    GameComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Por favor, complete ambos campos.")]
    MissingFields,
    #[error("Credenciales incorrectas. Inténtalo de nuevo, Comandante.")]
    BadCredentials,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct GameSession {
    pub current_user: Option<String>,
    pub view: View,
    pub selected_student: Option<Student>,
    pub editing_student: Option<Student>,
    pub selected_character: Option<&'static Character>,
    pub score: u32,
    pub energy: u8,
    pub current_level: LevelIndex,
    pub error_count: u32,
    /// Whether the logged-in account may use the level skip control.
    pub can_skip: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            current_user: None,
            view: View::Login,
            selected_student: None,
            editing_student: None,
            selected_character: None,
            score: 0,
            energy: 0,
            current_level: LevelIndex::FIRST,
            error_count: 0,
            can_skip: false,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive match against the credential table.
    pub fn login(self, email: &str, password: &str, credentials: &[Credential]) -> Result<Self, LoginError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingFields);
        }
        let cred = credentials
            .iter()
            .find(|c| c.email == email && c.password == password)
            .ok_or(LoginError::BadCredentials)?;
        log::info!("session: {email} logged in");
        Ok(Self {
            current_user: Some(email.to_string()),
            can_skip: cred.can_skip,
            view: View::Dashboard,
            ..self
        }
        .guarded())
    }

    pub fn logout(self) -> Self {
        log::info!("session: logout");
        Self::default()
    }

    pub fn select_student(self, student: Student) -> Self {
        Self { selected_student: Some(student), view: View::SelectCharacter, ..self }.guarded()
    }

    pub fn edit_student(self, student: Student) -> Self {
        Self { editing_student: Some(student), view: View::EditStudent, ..self }.guarded()
    }

    /// Leave the edit screen (after a save or a cancel).
    pub fn close_editor(self) -> Self {
        Self { editing_student: None, view: View::Dashboard, ..self }.guarded()
    }

    /// Unknown ids leave the session untouched.
    pub fn start_game(self, character_id: &str, catalog: &'static [Character]) -> Self {
        let Some(character) = find_character(catalog, character_id) else {
            log::warn!("session: unknown character id {character_id:?}; staying on {:?}", self.view);
            return self;
        };
        Self {
            selected_character: Some(character),
            score: 0,
            energy: 0,
            current_level: LevelIndex::FIRST,
            error_count: 0,
            view: View::IntroVideo,
            ..self
        }
        .guarded()
    }

    pub fn intro_video_end(self) -> Self {
        Self { view: View::ExplanationVideo, ..self }.guarded()
    }

    pub fn explanation_video_end(self) -> Self {
        Self { view: View::Level(LevelIndex::FIRST), ..self }.guarded()
    }

    pub fn with_score(self, score: u32) -> Self {
        Self { score, ..self }
    }

    /// Levels 1–5 finished: one more bar of energy, then the map.
    pub fn level_win(self) -> Self {
        let energy = (self.energy + 1).min(ENERGY_MAX);
        Self { energy, view: View::LevelMap, ..self }.guarded()
    }

    /// Level 6 finished: battery forced full.
    pub fn final_win(self) -> Self {
        log::info!("session: game complete with score {}", self.score);
        Self { energy: ENERGY_MAX, view: View::GameComplete, ..self }.guarded()
    }

    pub fn next_level_from_map(self) -> Self {
        match self.current_level.next() {
            Some(next) => Self { current_level: next, view: View::Level(next), ..self }.guarded(),
            None => self.final_win(),
        }
    }

    /// Progress (score, energy, level) survives a quit.
    pub fn quit_to_character_select(self) -> Self {
        Self { view: View::SelectCharacter, ..self }.guarded()
    }

    pub fn back_to_dashboard(self) -> Self {
        Self {
            selected_student: None,
            selected_character: None,
            view: View::Dashboard,
            ..self
        }
        .guarded()
    }

    /// Fail-closed view check. Without a user only the login screen exists;
    /// a screen missing its student, character or edit target falls back to
    /// the dashboard.
    pub fn guarded(self) -> Self {
        if self.current_user.is_none() {
            return Self { view: View::Login, ..self };
        }
        let ok = match self.view {
            View::Login | View::Dashboard | View::ExplanationVideo | View::GameComplete => true,
            View::EditStudent => self.editing_student.is_some(),
            View::SelectCharacter => self.selected_student.is_some(),
            View::IntroVideo => self.selected_character.is_some(),
            View::Level(_) | View::LevelMap => {
                self.selected_student.is_some() && self.selected_character.is_some()
            }
        };
        if ok {
            self
        } else {
            log::debug!("session: {:?} missing its selection; back to dashboard", self.view);
            Self { view: View::Dashboard, ..self }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColorTag;

    static CHARS: [Character; 1] = [Character {
        id: "sparky",
        name: "Sparky",
        color: ColorTag::Yellow,
        portrait: "sparky",
    }];
    const CREDS: &[Credential] = &[Credential { email: "a@a", password: "pw", can_skip: false }];

    fn playing() -> GameSession {
        GameSession::new()
            .login("a@a", "pw", CREDS)
            .unwrap()
            .select_student(Student::new(1, "Luna"))
            .start_game("sparky", &CHARS)
    }

    #[test]
    fn level_index_bounds() {
        assert!(LevelIndex::new(0).is_none());
        assert!(LevelIndex::new(7).is_none());
        assert_eq!(LevelIndex::LAST.next(), None);
        assert_eq!(LevelIndex::FIRST.next().map(LevelIndex::get), Some(2));
    }

    #[test]
    fn login_is_exact_and_case_sensitive() {
        let s = GameSession::new();
        assert_eq!(s.clone().login("A@a", "pw", CREDS), Err(LoginError::BadCredentials));
        assert_eq!(s.clone().login("a@a", "PW", CREDS), Err(LoginError::BadCredentials));
        assert_eq!(s.clone().login(" ", "pw", CREDS), Err(LoginError::MissingFields));
        let ok = s.login("a@a", "pw", CREDS).unwrap();
        assert_eq!(ok.view, View::Dashboard);
        assert_eq!(ok.current_user.as_deref(), Some("a@a"));
    }

    #[test]
    fn start_game_resets_progress_and_unknown_id_is_noop() {
        let s = playing().with_score(90).level_win();
        let same = s.clone().start_game("nobody", &CHARS);
        assert_eq!(same, s);
        let fresh = s.quit_to_character_select().start_game("sparky", &CHARS);
        assert_eq!((fresh.score, fresh.energy, fresh.current_level), (0, 0, LevelIndex::FIRST));
        assert_eq!(fresh.view, View::IntroVideo);
    }

    #[test]
    fn quit_keeps_progress() {
        let s = playing().with_score(40).level_win().quit_to_character_select();
        assert_eq!(s.view, View::SelectCharacter);
        assert_eq!((s.score, s.energy), (40, 1));
    }

    #[test]
    fn map_walks_levels_then_sticks_at_completion() {
        let mut s = playing().intro_video_end().explanation_video_end();
        assert_eq!(s.view, View::Level(LevelIndex::FIRST));
        for n in 2..=6 {
            s = s.level_win().next_level_from_map();
            assert_eq!(s.view, View::Level(LevelIndex::new(n).unwrap()));
        }
        for _ in 0..3 {
            s = s.next_level_from_map();
            assert_eq!(s.view, View::GameComplete);
            assert_eq!(s.current_level, LevelIndex::LAST);
            assert_eq!(s.energy, ENERGY_MAX);
        }
    }

    #[test]
    fn energy_clamps_at_max() {
        let mut s = playing();
        for _ in 0..10 {
            s = s.level_win();
        }
        assert_eq!(s.energy, ENERGY_MAX);
    }

    #[test]
    fn guard_redirects_levels_without_selection() {
        let s = playing().back_to_dashboard();
        let forced = GameSession { view: View::Level(LevelIndex::new(3).unwrap()), ..s.clone() }.guarded();
        assert_eq!(forced.view, View::Dashboard);
        let map = GameSession { view: View::LevelMap, ..s.clone() }.guarded();
        assert_eq!(map.view, View::Dashboard);
        let pick = GameSession { view: View::SelectCharacter, ..s }.guarded();
        assert_eq!(pick.view, View::Dashboard);
    }

    #[test]
    fn logout_resets_everything() {
        let s = playing().with_score(300).level_win().logout();
        assert_eq!(s, GameSession::default());
    }
}
