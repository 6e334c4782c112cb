//! Level 6: build the sentence "mi mama me mima" to fire the laser.
//!
//! Cards go into the first free slot; clicking a filled slot sends its card
//! back to the pool. A full, correctly ordered board locks in, and a short
//! cinematic plays out on timers. Only the explicit finish action at the end
//! of the cinematic completes the level.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Level, LevelCtx};
use crate::session::LevelIndex;
use crate::speech::Rate;
use crate::timer::Timers;

pub const POINTS_FOR_SENTENCE: u32 = 200;
pub const CINEMATIC_START_MS: f64 = 500.0;
/// Gaps between cinematic steps 0→1, 1→2, 2→3 and 3→4.
pub const STEP_GAPS_MS: [f64; 4] = [1000.0, 1000.0, 1500.0, 2000.0];

pub const BRIEFING: &str =
    "Ahora para activar el láser que destruirá el meteorito, tienes que formar la oración.";
pub const MISMATCH: &str = "Mmm, intenta ordenar mejor las palabras.";

pub const TARGET: [&str; 4] = ["mi", "mama", "me", "mima"];

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Card {
    pub word: &'static str,
    pub icon: &'static str,
}

pub static CARDS: [Card; 4] = [
    Card { word: "mi", icon: "🙋" },
    Card { word: "mama", icon: "👩‍👦" },
    Card { word: "me", icon: "👈" },
    Card { word: "mima", icon: "🤗" },
];

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    Begin,
    /// Move the pool card with this word into the first empty slot.
    Place(String),
    /// Return the card in slot `i` to the pool.
    Unplace(usize),
    Finish,
}

/// Beats of the victory cinematic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Step {
    Landed,
    LaserCharge,
    Fire,
    Explosion,
    Celebration,
}

impl Step {
    const ORDER: [Step; 5] = [Step::Landed, Step::LaserCharge, Step::Fire, Step::Explosion, Step::Celebration];

    /// Caption shown over the scene, if any.
    pub fn caption(self) -> Option<&'static str> {
        match self {
            Step::Fire => Some("¡PIU PIU!"),
            Step::Explosion => Some("¡BOOM!"),
            Step::Celebration => Some("¡VIVA! ¡LO LOGRAMOS!"),
            Step::Landed | Step::LaserCharge => None,
        }
    }

    fn announce(self, ctx: &mut LevelCtx) {
        match self {
            Step::Fire => ctx.say_at("Piu piu", Rate::Fast),
            Step::Explosion => ctx.say_at("Boom", Rate::Slow),
            Step::Celebration => ctx.say("¡Viva! Hemos salvado la tierra."),
            Step::Landed | Step::LaserCharge => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    Briefing,
    Playing,
    /// Sentence correct; cinematic about to start.
    Won,
    Cinematic(Step),
    Done,
}

#[derive(Debug)]
enum Task {
    Show(Step),
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SentenceRescue {
    phase: Phase,
    pool: Vec<&'static Card>,
    slots: [Option<&'static Card>; 4],
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl SentenceRescue {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool: Vec<&'static Card> = CARDS.iter().collect();
        pool.shuffle(rng);
        Self { phase: Phase::Briefing, pool, slots: [None; 4], timers: Timers::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pool(&self) -> &[&'static Card] {
        &self.pool
    }

    pub fn slots(&self) -> &[Option<&'static Card>; 4] {
        &self.slots
    }

    pub fn caption(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Cinematic(step) => step.caption(),
            _ => None,
        }
    }

    fn place(&mut self, word: &str, now: f64, ctx: &mut LevelCtx) {
        let Some(slot) = self.slots.iter().position(Option::is_none) else { return };
        let Some(at) = self.pool.iter().position(|c| c.word == word) else { return };
        let card = self.pool.remove(at);
        self.slots[slot] = Some(card);
        ctx.say(card.word);

        let Some(words) = self.slots.iter().map(|s| s.map(|c| c.word)).collect::<Option<Vec<_>>>() else {
            return;
        };
        if words == TARGET {
            self.phase = Phase::Won;
            ctx.award(POINTS_FOR_SENTENCE);
            let mut at = now + CINEMATIC_START_MS;
            self.timers.schedule(at, 0.0, Task::Show(Step::Landed));
            for (step, gap) in Step::ORDER[1..].iter().zip(STEP_GAPS_MS) {
                at += gap;
                self.timers.schedule(at, 0.0, Task::Show(*step));
            }
        } else {
            ctx.say(MISMATCH);
        }
    }

    fn unplace(&mut self, index: usize) {
        if let Some(card) = self.slots.get_mut(index).and_then(Option::take) {
            self.pool.push(card);
        }
    }
}

impl Level for SentenceRescue {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::LAST
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match (self.phase, input) {
            (Phase::Briefing, Input::Begin) => self.phase = Phase::Playing,
            (Phase::Playing, Input::Place(word)) => self.place(&word, now, ctx),
            (Phase::Playing, Input::Unplace(i)) => self.unplace(i),
            (Phase::Cinematic(Step::Celebration), Input::Finish) => {
                self.phase = Phase::Done;
                log::info!("level 6 complete");
                ctx.complete();
            }
            (_, other) => log::debug!("level 6: {other:?} ignored"),
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            let Task::Show(step) = task;
            if matches!(self.phase, Phase::Won | Phase::Cinematic(_)) {
                self.phase = Phase::Cinematic(step);
                step.announce(ctx);
            }
        }
    }
}
