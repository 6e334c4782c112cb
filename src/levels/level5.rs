// Level 5: the manual navigation console. Each word is shown without its
// first syllable and the player picks the missing one from MA..MU.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Level, LevelCtx};
use crate::session::LevelIndex;
use crate::timer::Timers;

pub const POINTS_PER_WORD: u32 = 50;
pub const SPEAK_WORD_DELAY_MS: f64 = 500.0;
pub const ADVANCE_DELAY_MS: f64 = 2000.0;

pub const BRIEFING: &str = "Para dirigir la nave, tienes que completar las palabras.";
pub const RETRY: &str = "Intenta otra vez";
pub const FINISHED: &str = "¡Rumbo fijado! Nivel completado.";

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Challenge {
    pub word: &'static str,
    /// What stays on screen.
    pub suffix: &'static str,
    pub syllable: &'static str,
    pub icon: &'static str,
}

pub static CHALLENGES: [Challenge; 5] = [
    Challenge { word: "MARTE", suffix: "RTE", syllable: "MA", icon: "🪐" },
    Challenge { word: "METEORITO", suffix: "TEORITO", syllable: "ME", icon: "☄️" },
    Challenge { word: "MISION", suffix: "SION", syllable: "MI", icon: "🚩" },
    Challenge { word: "MONSTRUO", suffix: "NSTRUO", syllable: "MO", icon: "👾" },
    Challenge { word: "MUNDO", suffix: "NDO", syllable: "MU", icon: "🌍" },
];

pub const SYLLABLES: [&str; 5] = ["MA", "ME", "MI", "MO", "MU"];

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    Begin,
    Pick(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    Briefing,
    Choosing { index: usize },
    /// Right syllable picked; input is locked until the next word.
    Correct { index: usize },
    Done,
}

#[derive(Debug)]
enum Task {
    SpeakWord(&'static str),
    Advance,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SyllableCockpit {
    phase: Phase,
    queue: Vec<&'static Challenge>,
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl SyllableCockpit {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut queue: Vec<&'static Challenge> = CHALLENGES.iter().collect();
        queue.shuffle(rng);
        Self { phase: Phase::Briefing, queue, timers: Timers::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn queue(&self) -> &[&'static Challenge] {
        &self.queue
    }

    pub fn current(&self) -> Option<&'static Challenge> {
        match self.phase {
            Phase::Choosing { index } | Phase::Correct { index } => self.queue.get(index).copied(),
            _ => None,
        }
    }

    fn pick(&mut self, syllable: &str, now: f64, ctx: &mut LevelCtx) {
        let Phase::Choosing { index } = self.phase else { return };
        let Some(challenge) = self.queue.get(index).copied() else { return };
        ctx.say(syllable.to_lowercase());
        if !syllable.eq_ignore_ascii_case(challenge.syllable) {
            ctx.say(RETRY);
            return;
        }
        self.phase = Phase::Correct { index };
        ctx.award(POINTS_PER_WORD);
        self.timers.schedule(now, SPEAK_WORD_DELAY_MS, Task::SpeakWord(challenge.word));
        self.timers.schedule(now, ADVANCE_DELAY_MS, Task::Advance);
    }
}

impl Level for SyllableCockpit {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::ALL[4]
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match input {
            Input::Begin if self.phase == Phase::Briefing => self.phase = Phase::Choosing { index: 0 },
            Input::Pick(s) => self.pick(&s, now, ctx),
            Input::Begin => {}
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            match task {
                Task::SpeakWord(word) => ctx.say(word.to_lowercase()),
                Task::Advance => {
                    let Phase::Correct { index } = self.phase else { continue };
                    if index + 1 < self.queue.len() {
                        self.phase = Phase::Choosing { index: index + 1 };
                    } else {
                        self.phase = Phase::Done;
                        ctx.say(FINISHED);
                        log::info!("level 5 complete");
                        ctx.complete();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelEvent;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started(seed: u64) -> SyllableCockpit {
        let mut l = SyllableCockpit::new(&mut StdRng::seed_from_u64(seed));
        l.handle(Input::Begin, 0.0, &mut LevelCtx::new(0));
        l
    }

    #[test]
    fn every_syllable_prefixes_its_word() {
        for c in &CHALLENGES {
            assert_eq!(format!("{}{}", c.syllable, c.suffix), c.word);
            assert!(SYLLABLES.contains(&c.syllable));
        }
    }

    #[test]
    fn queue_is_a_permutation() {
        let l = SyllableCockpit::new(&mut StdRng::seed_from_u64(42));
        let mut words: Vec<&str> = l.queue().iter().map(|c| c.word).collect();
        words.sort();
        let mut expected: Vec<&str> = CHALLENGES.iter().map(|c| c.word).collect();
        expected.sort();
        assert_eq!(words, expected);
    }

    #[test]
    fn wrong_pick_only_gives_feedback() {
        let mut l = started(1);
        let mut ctx = LevelCtx::new(0);
        let answer = l.current().map(|c| c.syllable).unwrap();
        let wrong = SYLLABLES.iter().find(|s| **s != answer).unwrap();
        l.handle(Input::Pick(wrong.to_string()), 0.0, &mut ctx);
        assert_eq!(l.phase(), Phase::Choosing { index: 0 });
        assert_eq!(ctx.score(), 0);
        assert!(matches!(ctx.events().last(), Some(LevelEvent::Speak(u)) if u.text == RETRY));
    }

    #[test]
    fn correct_pick_locks_then_speaks_word_and_advances() {
        let mut l = started(2);
        let mut ctx = LevelCtx::new(0);
        let c = l.current().unwrap();
        l.handle(Input::Pick(c.syllable.to_string()), 0.0, &mut ctx);
        l.handle(Input::Pick(c.syllable.to_string()), 10.0, &mut ctx);
        assert_eq!(ctx.score(), POINTS_PER_WORD);
        l.tick(SPEAK_WORD_DELAY_MS, &mut ctx);
        assert!(matches!(ctx.events().last(), Some(LevelEvent::Speak(u)) if u.text == c.word.to_lowercase()));
        l.tick(ADVANCE_DELAY_MS, &mut ctx);
        assert_eq!(l.phase(), Phase::Choosing { index: 1 });
    }

    #[test]
    fn last_word_completes_the_level() {
        let mut l = started(3);
        let mut ctx = LevelCtx::new(0);
        let mut now = 0.0;
        while let Some(c) = l.current() {
            l.handle(Input::Pick(c.syllable.to_string()), now, &mut ctx);
            now += ADVANCE_DELAY_MS;
            l.tick(now, &mut ctx);
        }
        assert_eq!(l.phase(), Phase::Done);
        assert_eq!(ctx.score(), 250);
        let completes = ctx.events().iter().filter(|e| **e == LevelEvent::Complete).count();
        assert_eq!(completes, 1);
    }
}
