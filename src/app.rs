//! Application controller.
//!
//! `App` owns everything with a lifetime longer than one screen: the session,
//! the roster, the mounted level, the speech backend and the RNG used for
//! per-visit shuffles. The host feeds it [`Command`]s and clock ticks; it
//! answers with a [`Snapshot`] to render.

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::assets;
use crate::catalog::{Character, Credential, SeedAccount, Student};
use crate::levels::map::{Battery, LevelMap};
use crate::levels::{ActiveLevel, LevelCtx, LevelEvent, LevelInput, level2, level3, level4};
use crate::roster::Roster;
use crate::session::{GameSession, LoginError, View};
use crate::speech::{LOCALE, Speech};
use crate::timer::Timers;
use crate::{CHARACTERS, CREDENTIALS, SEED_ROSTERS};

/// Wait after the intro video reports its end.
pub const INTRO_END_DELAY_MS: f64 = 500.0;
/// Wait after the explanation video reports its end.
pub const EXPLANATION_END_DELAY_MS: f64 = 1000.0;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub locale: String,
    pub credentials: &'static [Credential],
    pub characters: &'static [Character],
    pub rosters: &'static [SeedAccount],
    /// Fixed RNG seed; `None` draws one from the platform.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: LOCALE.to_string(),
            credentials: CREDENTIALS,
            characters: CHARACTERS,
            rosters: SEED_ROSTERS,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }
}

/// Everything the front end can ask for.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    Logout,
    AddStudent {
        name: String,
    },
    EditStudent {
        id: u64,
    },
    UpdateStudent {
        id: u64,
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        birth_date: Option<String>,
    },
    CancelEdit,
    SelectStudent {
        id: u64,
    },
    StartGame {
        character_id: String,
    },
    BackToDashboard,
    VideoEnded,
    SkipVideo,
    NextLevel,
    QuitToCharacterSelect,
    SkipLevel,
    Level {
        input: LevelInput,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Login(#[from] LoginError),
}

#[derive(Debug)]
enum VideoCue {
    IntroDone,
    ExplanationDone,
}

/// Media paths for the current screen.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Scene {
    pub video: Option<String>,
    pub portrait: Option<String>,
    pub ship: Option<String>,
    pub sprites: Vec<String>,
}

/// Read-only view of the app for rendering.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Snapshot<'a> {
    pub session: &'a GameSession,
    pub students: &'a [Student],
    pub level: Option<&'a ActiveLevel>,
    pub map: Option<LevelMap>,
    pub battery: Battery,
    pub scene: Scene,
}

pub struct App {
    config: AppConfig,
    session: GameSession,
    roster: Roster,
    level: Option<ActiveLevel>,
    timers: Timers<VideoCue>,
    speech: Box<dyn Speech>,
    rng: StdRng,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: AppConfig, speech: Box<dyn Speech>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            roster: Roster::seeded(config.rosters),
            session: GameSession::new(),
            level: None,
            timers: Timers::new(),
            speech,
            rng,
            config,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn view(&self) -> View {
        self.session.view
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn level(&self) -> Option<&ActiveLevel> {
        self.level.as_ref()
    }

    /// Students of the logged-in account, in insertion order.
    pub fn students(&self) -> &[Student] {
        match self.session.current_user.as_deref() {
            Some(account) => self.roster.students(account),
            None => &[],
        }
    }

    /// Apply one command at host time `now` (ms). Only a failed login is
    /// reported; every other rejected command leaves the state as it was.
    ///
    /// Screen commands only land on the screen that offers them: student
    /// add, edit and select on the dashboard, `StartGame` on character
    /// select, `BackToDashboard` from character select, the editor or the
    /// completion screen, `NextLevel` on the map, and quitting from a level
    /// or the map. `Login` and `Logout` are accepted anywhere.
    pub fn dispatch(&mut self, command: Command, now: f64) -> Result<(), AppError> {
        let before = self.session.view;
        let result = self.apply(command, now);
        self.settle(before);
        result
    }

    /// Advance every pending timer to `now`.
    pub fn tick(&mut self, now: f64) {
        let before = self.session.view;
        for cue in self.timers.due(now) {
            match (cue, self.session.view) {
                (VideoCue::IntroDone, View::IntroVideo) => self.transition(GameSession::intro_video_end),
                (VideoCue::ExplanationDone, View::ExplanationVideo) => {
                    self.transition(GameSession::explanation_video_end)
                }
                _ => {}
            }
        }
        self.settle(before);

        let before = self.session.view;
        if let Some(level) = self.level.as_mut() {
            let mut ctx = LevelCtx::with_locale(self.session.score, self.config.locale.as_str());
            level.tick(now, &mut ctx);
            self.apply_events(ctx.into_events());
        }
        self.settle(before);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let map = (self.session.view == View::LevelMap).then(|| LevelMap::for_session(&self.session));
        Snapshot {
            session: &self.session,
            students: self.students(),
            level: self.level.as_ref(),
            map,
            battery: Battery::new(self.session.energy),
            scene: self.scene(),
        }
    }

    fn apply(&mut self, command: Command, now: f64) -> Result<(), AppError> {
        match command {
            Command::Login { email, password } => {
                let next = self.session.clone().login(&email, &password, self.config.credentials)?;
                self.session = next;
            }
            Command::Logout => self.transition(GameSession::logout),
            Command::AddStudent { name } => {
                if self.session.view == View::Dashboard {
                    self.roster.add_student(self.session.current_user.as_deref(), &name, now);
                }
            }
            Command::EditStudent { id } => {
                if self.session.view != View::Dashboard {
                    log::debug!("app: edit refused outside the dashboard");
                    return Ok(());
                }
                if let Some(student) = self.find_student(id) {
                    self.transition(|s| s.edit_student(student));
                }
            }
            Command::UpdateStudent { id, name, birth_date } => self.update_student(id, name, birth_date),
            Command::CancelEdit => {
                if self.session.view == View::EditStudent {
                    self.transition(GameSession::close_editor);
                }
            }
            Command::SelectStudent { id } => {
                if self.session.view != View::Dashboard {
                    log::debug!("app: student pick refused outside the dashboard");
                    return Ok(());
                }
                if let Some(student) = self.find_student(id) {
                    self.transition(|s| s.select_student(student));
                }
            }
            Command::StartGame { character_id } => {
                if self.session.view == View::SelectCharacter {
                    let catalog = self.config.characters;
                    self.transition(|s| s.start_game(&character_id, catalog));
                }
            }
            Command::BackToDashboard => {
                if matches!(self.session.view, View::SelectCharacter | View::GameComplete | View::EditStudent) {
                    self.transition(GameSession::back_to_dashboard);
                }
            }
            Command::VideoEnded => self.video_ended(now),
            Command::SkipVideo => self.skip_video(),
            Command::NextLevel => {
                if self.session.view == View::LevelMap {
                    self.transition(LevelMap::advance);
                }
            }
            Command::QuitToCharacterSelect => {
                if matches!(self.session.view, View::Level(_) | View::LevelMap) {
                    self.transition(GameSession::quit_to_character_select);
                }
            }
            Command::SkipLevel => {
                if self.session.can_skip && self.level.is_some() {
                    log::info!("app: level skipped by tester");
                    self.finish_level();
                } else {
                    log::debug!("app: skip refused");
                }
            }
            Command::Level { input } => self.level_input(input, now),
        }
        Ok(())
    }

    fn find_student(&self, id: u64) -> Option<Student> {
        let account = self.session.current_user.as_deref()?;
        let found = self.roster.find(account, id).cloned();
        if found.is_none() {
            log::debug!("app: no student {id} for {account}");
        }
        found
    }

    fn update_student(&mut self, id: u64, name: String, birth_date: Option<String>) {
        if self.session.view != View::EditStudent {
            return;
        }
        if name.trim().is_empty() {
            log::debug!("app: update with empty name ignored");
            return;
        }
        let account = self.session.current_user.as_deref();
        if !self.roster.update_student(account, Student { id, name, birth_date }) {
            log::debug!("app: update for unknown student {id} ignored");
        }
        self.transition(GameSession::close_editor);
    }

    fn video_ended(&mut self, now: f64) {
        let (cue, delay) = match self.session.view {
            View::IntroVideo => (VideoCue::IntroDone, INTRO_END_DELAY_MS),
            View::ExplanationVideo => (VideoCue::ExplanationDone, EXPLANATION_END_DELAY_MS),
            _ => return,
        };
        self.timers.cancel_all();
        self.timers.schedule(now, delay, cue);
    }

    fn skip_video(&mut self) {
        match self.session.view {
            View::IntroVideo => self.transition(GameSession::intro_video_end),
            View::ExplanationVideo => self.transition(GameSession::explanation_video_end),
            _ => {}
        }
    }

    fn level_input(&mut self, input: LevelInput, now: f64) {
        let Some(level) = self.level.as_mut() else {
            log::debug!("app: level input with no level mounted");
            return;
        };
        let mut ctx = LevelCtx::with_locale(self.session.score, self.config.locale.as_str());
        if !level.handle(input, now, &mut ctx) {
            log::debug!("app: input addressed to another level");
            return;
        }
        self.apply_events(ctx.into_events());
    }

    fn apply_events(&mut self, events: Vec<LevelEvent>) {
        for event in events {
            match event {
                LevelEvent::Speak(u) => self.speech.speak(&u),
                LevelEvent::Score(total) => self.transition(|s| s.with_score(total)),
                LevelEvent::Complete => self.finish_level(),
            }
        }
    }

    fn finish_level(&mut self) {
        let Some(level) = self.level.take() else { return };
        let number = level.number();
        log::info!("app: level {} won, score {}", number.get(), self.session.score);
        if number.is_last() {
            self.transition(GameSession::final_win);
        } else {
            self.transition(GameSession::level_win);
        }
    }

    fn transition(&mut self, step: impl FnOnce(GameSession) -> GameSession) {
        let current = std::mem::take(&mut self.session);
        self.session = step(current);
    }

    /// After any change: drop stale video cues and keep the mounted level in
    /// step with the view.
    fn settle(&mut self, before: View) {
        let view = self.session.view;
        if view != before {
            log::info!("app: view {before:?} -> {view:?}");
            self.timers.cancel_all();
        }
        match view {
            View::Level(n) => {
                if self.level.as_ref().map(ActiveLevel::number) != Some(n) || view != before {
                    self.level = Some(ActiveLevel::mount(n, &mut self.rng));
                }
            }
            _ => self.level = None,
        }
    }

    fn scene(&self) -> Scene {
        let character = self.session.selected_character;
        let video = match self.session.view {
            View::IntroVideo => character.map(|c| assets::intro_video(c.color)),
            View::ExplanationVideo => Some(assets::explanation_video()),
            View::Level(_) => match self.level.as_ref() {
                Some(ActiveLevel::Three(l)) => match l.phase() {
                    level3::Phase::Demo { .. } => l.shape().map(|s| assets::letter_demo_video(s.letter)),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        };
        Scene {
            video,
            portrait: character.map(assets::character_image),
            ship: character.map(|c| assets::ship_image(c.color)),
            sprites: self.level.as_ref().map(level_sprites).unwrap_or_default(),
        }
    }
}

fn level_sprites(level: &ActiveLevel) -> Vec<String> {
    use crate::catalog::Vowel;
    match level {
        ActiveLevel::One(l) => Vowel::ALL
            .iter()
            .map(|v| assets::star_image((l.revealed() == Some(*v)).then_some(*v)))
            .collect(),
        ActiveLevel::Two(l) => match l.phase() {
            level2::Phase::Craters { .. } => vec![assets::crater_image(); Vowel::ALL.len()],
            level2::Phase::Signs(_) => Vowel::ALL.iter().map(|v| assets::creature_image(*v)).collect(),
            level2::Phase::Gifts(_) => l.gifts().iter().map(|g| assets::gift_image(g)).collect(),
            level2::Phase::Interlude(_) | level2::Phase::Done => Vec::new(),
        },
        ActiveLevel::Four(_) => {
            let blanks: usize = level4::WORDS.iter().map(|w| w.blank_count()).sum();
            (0..blanks).map(assets::meteorite_image).collect()
        }
        ActiveLevel::Three(_) | ActiveLevel::Five(_) | ActiveLevel::Six(_) => Vec::new(),
    }
}
