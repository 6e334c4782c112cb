//! The six mini-games and the contract they share with the controller.
//!
//! A level receives the running score through [`LevelCtx`] and answers with
//! [`LevelEvent`]s only: speech requests, a new score total, and a single
//! completion signal. It never touches the session or the view. Each level
//! owns its delayed work in a [`Timers`](crate::timer::Timers) field, so when
//! the controller drops the level every pending step goes with it.

use rand::Rng;

use crate::session::LevelIndex;
use crate::speech::{LOCALE, Rate, Utterance};

pub mod level1;
pub mod level2;
pub mod level3;
pub mod level4;
pub mod level5;
pub mod level6;
pub mod map;

pub use level1::StarDiscovery;
pub use level2::MartianOutpost;
pub use level3::Constellation;
pub use level4::MeteorShower;
pub use level5::SyllableCockpit;
pub use level6::SentenceRescue;

/// What a level reports back to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum LevelEvent {
    Speak(Utterance),
    /// New score total (not a delta).
    Score(u32),
    Complete,
}

/// Per-call context: read-only score on the way in, events on the way out.
#[derive(Debug)]
pub struct LevelCtx {
    score: u32,
    locale: String,
    events: Vec<LevelEvent>,
}

impl LevelCtx {
    pub fn new(score: u32) -> Self {
        Self::with_locale(score, LOCALE)
    }

    pub fn with_locale(score: u32, locale: impl Into<String>) -> Self {
        Self { score, locale: locale.into(), events: Vec::new() }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.say_at(text, Rate::Normal);
    }

    pub fn say_at(&mut self, text: impl Into<String>, rate: Rate) {
        let u = Utterance::new(text, self.locale.clone(), rate);
        self.events.push(LevelEvent::Speak(u));
    }

    /// Add `points` and report the new total. Several awards in one call stack.
    pub fn award(&mut self, points: u32) {
        self.score += points;
        self.events.push(LevelEvent::Score(self.score));
    }

    pub fn complete(&mut self) {
        self.events.push(LevelEvent::Complete);
    }

    pub fn events(&self) -> &[LevelEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<LevelEvent> {
        self.events
    }
}

/// Common shape of every level state machine.
pub trait Level {
    type Input;

    fn number(&self) -> LevelIndex;

    /// Apply one player action at host time `now` (ms).
    fn handle(&mut self, input: Self::Input, now: f64, ctx: &mut LevelCtx);

    /// Fire whatever delayed steps are due at `now`.
    fn tick(&mut self, now: f64, ctx: &mut LevelCtx);
}

/// Player input addressed to a specific level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LevelInput {
    One(level1::Input),
    Two(level2::Input),
    Three(level3::Input),
    Four(level4::Input),
    Five(level5::Input),
    Six(level6::Input),
}

/// The mounted level.
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "level", content = "state", rename_all = "snake_case")
)]
pub enum ActiveLevel {
    One(StarDiscovery),
    Two(MartianOutpost),
    Three(Constellation),
    Four(MeteorShower),
    Five(SyllableCockpit),
    Six(SentenceRescue),
}

impl ActiveLevel {
    /// Fresh state (and fresh shuffles) for level `index`.
    pub fn mount<R: Rng + ?Sized>(index: LevelIndex, rng: &mut R) -> Self {
        match index.get() {
            1 => ActiveLevel::One(StarDiscovery::new()),
            2 => ActiveLevel::Two(MartianOutpost::new(rng)),
            3 => ActiveLevel::Three(Constellation::new()),
            4 => ActiveLevel::Four(MeteorShower::new()),
            5 => ActiveLevel::Five(SyllableCockpit::new(rng)),
            _ => ActiveLevel::Six(SentenceRescue::new(rng)),
        }
    }

    pub fn number(&self) -> LevelIndex {
        match self {
            ActiveLevel::One(l) => l.number(),
            ActiveLevel::Two(l) => l.number(),
            ActiveLevel::Three(l) => l.number(),
            ActiveLevel::Four(l) => l.number(),
            ActiveLevel::Five(l) => l.number(),
            ActiveLevel::Six(l) => l.number(),
        }
    }

    /// Route `input` to the mounted level. Returns false, doing nothing, when
    /// the input belongs to a different level.
    pub fn handle(&mut self, input: LevelInput, now: f64, ctx: &mut LevelCtx) -> bool {
        match (self, input) {
            (ActiveLevel::One(l), LevelInput::One(i)) => l.handle(i, now, ctx),
            (ActiveLevel::Two(l), LevelInput::Two(i)) => l.handle(i, now, ctx),
            (ActiveLevel::Three(l), LevelInput::Three(i)) => l.handle(i, now, ctx),
            (ActiveLevel::Four(l), LevelInput::Four(i)) => l.handle(i, now, ctx),
            (ActiveLevel::Five(l), LevelInput::Five(i)) => l.handle(i, now, ctx),
            (ActiveLevel::Six(l), LevelInput::Six(i)) => l.handle(i, now, ctx),
            _ => return false,
        }
        true
    }

    pub fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        match self {
            ActiveLevel::One(l) => l.tick(now, ctx),
            ActiveLevel::Two(l) => l.tick(now, ctx),
            ActiveLevel::Three(l) => l.tick(now, ctx),
            ActiveLevel::Four(l) => l.tick(now, ctx),
            ActiveLevel::Five(l) => l.tick(now, ctx),
            ActiveLevel::Six(l) => l.tick(now, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn award_accumulates_within_one_call() {
        let mut ctx = LevelCtx::new(10);
        ctx.award(20);
        ctx.award(5);
        assert_eq!(ctx.events(), &[LevelEvent::Score(30), LevelEvent::Score(35)]);
    }

    #[test]
    fn mount_matches_index_and_rejects_foreign_input() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 1..=6 {
            let idx = LevelIndex::new(n).unwrap();
            assert_eq!(ActiveLevel::mount(idx, &mut rng).number(), idx);
        }
        let mut lvl = ActiveLevel::mount(LevelIndex::FIRST, &mut rng);
        let mut ctx = LevelCtx::new(0);
        assert!(!lvl.handle(LevelInput::Six(level6::Input::Finish), 0.0, &mut ctx));
        assert!(ctx.events().is_empty());
    }
}
