//! Level 4: a meteor shower. Four words with missing vowels; every missing
//! vowel is a meteorite the player fills from an on-screen keypad.
//!
//! One focus cursor walks the blanks of all four words in reading order.
//! Typing fills the focused blank whether or not the vowel is right, and
//! only the whole set being correct at once saves the ship.

use super::{Level, LevelCtx};
use crate::catalog::Vowel;
use crate::session::LevelIndex;
use crate::timer::Timers;

pub const POINTS_FOR_SAVE: u32 = 100;
pub const COMPLETE_DELAY_MS: f64 = 2000.0;

pub const BRIEFING: &str =
    "Oh no, ¡mira! una lluvia de meteoritos. Completa todas las palabras para salvar la nave.";
pub const SUCCESS: &str = "¡Increíble! Has salvado la nave.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Segment {
    Fixed(&'static str),
    Blank(Vowel),
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Word {
    pub word: &'static str,
    pub segments: &'static [Segment],
}

impl Word {
    pub fn answers(&self) -> impl Iterator<Item = Vowel> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Blank(v) => Some(*v),
            Segment::Fixed(_) => None,
        })
    }

    pub fn blank_count(&self) -> usize {
        self.answers().count()
    }
}

use Segment::{Blank, Fixed};

pub static WORDS: [Word; 4] = [
    Word {
        word: "Estrella",
        segments: &[
            Fixed("E"),
            Fixed("S"),
            Fixed("T"),
            Fixed("R"),
            Blank(Vowel::E),
            Fixed("LL"),
            Blank(Vowel::A),
        ],
    },
    Word { word: "Nave", segments: &[Fixed("N"), Blank(Vowel::A), Fixed("V"), Blank(Vowel::E)] },
    Word {
        word: "Marciano",
        segments: &[
            Fixed("M"),
            Blank(Vowel::A),
            Fixed("R"),
            Fixed("C"),
            Blank(Vowel::I),
            Blank(Vowel::A),
            Fixed("N"),
            Blank(Vowel::O),
        ],
    },
    Word { word: "Luna", segments: &[Fixed("L"), Blank(Vowel::U), Fixed("N"), Blank(Vowel::A)] },
];

/// A blank addressed as (word index, blank index within the word).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub word: usize,
    pub blank: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    Begin,
    Key(Vowel),
    Focus(Slot),
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    Briefing,
    Typing,
    Saved,
    Done,
}

#[derive(Debug)]
enum Task {
    Complete,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MeteorShower {
    phase: Phase,
    answers: Vec<Vec<Option<Vowel>>>,
    focus: Option<Slot>,
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl Default for MeteorShower {
    fn default() -> Self {
        Self::new()
    }
}

impl MeteorShower {
    pub fn new() -> Self {
        Self {
            phase: Phase::Briefing,
            answers: WORDS.iter().map(|w| vec![None; w.blank_count()]).collect(),
            focus: Some(Slot { word: 0, blank: 0 }),
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus(&self) -> Option<Slot> {
        self.focus
    }

    pub fn answer(&self, slot: Slot) -> Option<Vowel> {
        self.answers.get(slot.word).and_then(|w| w.get(slot.blank)).copied().flatten()
    }

    /// True iff every blank in every word holds its expected vowel.
    pub fn is_solved(&self) -> bool {
        WORDS
            .iter()
            .zip(&self.answers)
            .all(|(word, filled)| word.answers().zip(filled).all(|(want, got)| *got == Some(want)))
    }

    fn slots(&self) -> impl DoubleEndedIterator<Item = Slot> + '_ {
        self.answers
            .iter()
            .enumerate()
            .flat_map(|(word, blanks)| (0..blanks.len()).map(move |blank| Slot { word, blank }))
    }

    fn set(&mut self, slot: Slot, value: Option<Vowel>) {
        if let Some(cell) = self.answers.get_mut(slot.word).and_then(|w| w.get_mut(slot.blank)) {
            *cell = value;
        }
    }

    fn key(&mut self, v: Vowel, now: f64, ctx: &mut LevelCtx) {
        let Some(slot) = self.focus else { return };
        self.set(slot, Some(v));
        ctx.say(v.upper());
        if self.is_solved() {
            self.phase = Phase::Saved;
            self.focus = None;
            ctx.award(POINTS_FOR_SAVE);
            ctx.say(SUCCESS);
            self.timers.schedule(now, COMPLETE_DELAY_MS, Task::Complete);
        } else {
            let next = self.slots().find(|s| self.answer(*s).is_none());
            self.focus = next;
        }
    }

    /// Backspace: clear the focused blank, or when it is already empty, the
    /// nearest filled blank before it. With no focus, the last filled blank.
    fn delete(&mut self) {
        let target = match self.focus {
            Some(slot) if self.answer(slot).is_some() => Some(slot),
            Some(slot) => self.slots().rev().find(|s| *s < slot && self.answer(*s).is_some()),
            None => self.slots().rev().find(|s| self.answer(*s).is_some()),
        };
        if let Some(slot) = target {
            self.set(slot, None);
            self.focus = Some(slot);
        }
    }

    fn is_slot(&self, slot: Slot) -> bool {
        self.answers.get(slot.word).is_some_and(|w| slot.blank < w.len())
    }
}

impl Level for MeteorShower {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::ALL[3]
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match (self.phase, input) {
            (Phase::Briefing, Input::Begin) => self.phase = Phase::Typing,
            (Phase::Typing, Input::Key(v)) => self.key(v, now, ctx),
            (Phase::Typing, Input::Focus(slot)) if self.is_slot(slot) => self.focus = Some(slot),
            (Phase::Typing, Input::Delete) => self.delete(),
            (_, other) => log::debug!("level 4: {other:?} ignored"),
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            let Task::Complete = task;
            if self.phase == Phase::Saved {
                self.phase = Phase::Done;
                log::info!("level 4 complete");
                ctx.complete();
            }
        }
    }
}
