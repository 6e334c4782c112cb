// Level 1: five stars, one per vowel. Clicking a star flips it to show its
// vowel and says it aloud; the first flip of each star charges the ship.

use super::{Level, LevelCtx};
use crate::catalog::Vowel;
use crate::session::LevelIndex;
use crate::timer::Timers;

pub const POINTS_PER_STAR: u32 = 20;
/// How long a flipped star stays face up.
pub const REVEAL_MS: f64 = 1500.0;
pub const COMPLETE_DELAY_MS: f64 = 1000.0;

pub const BRIEFING: &str = "Haz clic en las estrellas para cargar la batería de la nave.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    /// Dismiss the briefing ("¡DESPEGAR!").
    Begin,
    Click(Vowel),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    Briefing,
    Exploring,
    /// All five found; completion is on its way.
    Cleared,
    Done,
}

#[derive(Debug)]
enum Task {
    Conceal,
    Complete,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StarDiscovery {
    phase: Phase,
    discovered: [bool; 5],
    /// Star currently face up, if any.
    revealed: Option<Vowel>,
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl Default for StarDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl StarDiscovery {
    pub fn new() -> Self {
        Self { phase: Phase::Briefing, discovered: [false; 5], revealed: None, timers: Timers::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn revealed(&self) -> Option<Vowel> {
        self.revealed
    }

    pub fn is_discovered(&self, v: Vowel) -> bool {
        self.discovered[v.index()]
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().filter(|d| **d).count()
    }

    fn click(&mut self, v: Vowel, now: f64, ctx: &mut LevelCtx) {
        if !matches!(self.phase, Phase::Exploring | Phase::Cleared) || self.revealed.is_some() {
            return;
        }
        self.revealed = Some(v);
        self.timers.schedule(now, REVEAL_MS, Task::Conceal);
        ctx.say(v.lower());

        if self.discovered[v.index()] {
            return;
        }
        self.discovered[v.index()] = true;
        ctx.award(POINTS_PER_STAR);
        if self.phase == Phase::Exploring && self.discovered.iter().all(|d| *d) {
            self.phase = Phase::Cleared;
            self.timers.schedule(now, COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl Level for StarDiscovery {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::FIRST
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match input {
            Input::Begin if self.phase == Phase::Briefing => self.phase = Phase::Exploring,
            Input::Begin => {}
            Input::Click(v) => self.click(v, now, ctx),
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            match task {
                Task::Conceal => self.revealed = None,
                Task::Complete => {
                    if self.phase == Phase::Cleared {
                        self.phase = Phase::Done;
                        log::info!("level 1 complete");
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

    fn started() -> StarDiscovery {
        let mut l = StarDiscovery::new();
        l.handle(Input::Begin, 0.0, &mut LevelCtx::new(0));
        l
    }

    #[test]
    fn clicks_are_ignored_during_briefing() {
        let mut l = StarDiscovery::new();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::Click(Vowel::A), 0.0, &mut ctx);
        assert!(ctx.events().is_empty());
        assert_eq!(l.discovered_count(), 0);
    }

    #[test]
    fn reveal_blocks_clicks_until_it_reverts() {
        let mut l = started();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::Click(Vowel::A), 0.0, &mut ctx);
        l.handle(Input::Click(Vowel::E), 100.0, &mut ctx);
        assert_eq!(l.revealed(), Some(Vowel::A));
        assert!(!l.is_discovered(Vowel::E));
        l.tick(REVEAL_MS, &mut ctx);
        assert_eq!(l.revealed(), None);
    }

    #[test]
    fn repeat_click_speaks_but_does_not_score() {
        let mut l = started();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::Click(Vowel::O), 0.0, &mut ctx);
        l.tick(2_000.0, &mut ctx);
        l.handle(Input::Click(Vowel::O), 2_000.0, &mut ctx);
        let scores = ctx.events().iter().filter(|e| matches!(e, LevelEvent::Score(_))).count();
        let speaks = ctx.events().iter().filter(|e| matches!(e, LevelEvent::Speak(_))).count();
        assert_eq!((scores, speaks), (1, 2));
        assert_eq!(l.revealed(), Some(Vowel::O));
    }

    #[test]
    fn all_five_complete_exactly_once() {
        let mut l = started();
        let mut ctx = LevelCtx::new(0);
        let mut now = 0.0;
        for v in [Vowel::U, Vowel::I, Vowel::A, Vowel::A, Vowel::O, Vowel::E] {
            l.handle(Input::Click(v), now, &mut ctx);
            now += REVEAL_MS;
            l.tick(now, &mut ctx);
        }
        l.handle(Input::Click(Vowel::E), now, &mut ctx);
        l.tick(now + 10_000.0, &mut ctx);
        assert_eq!(ctx.score(), 100);
        let completes = ctx.events().iter().filter(|e| **e == LevelEvent::Complete).count();
        assert_eq!(completes, 1);
        assert_eq!(l.phase(), Phase::Done);
    }
}
