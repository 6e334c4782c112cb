// Level 3: shooting stars draw the five vowels, then the player traces each
// one as a constellation by dragging between numbered stars.

use super::{Level, LevelCtx};
use crate::session::LevelIndex;
use crate::timer::Timers;

pub const POINTS_PER_LETTER: u32 = 20;
pub const NEXT_LETTER_DELAY_MS: f64 = 1000.0;

pub const WATCH_BRIEFING: &str =
    "Mira estrellas fugaces, estan trazando las vocales que necesitamos aprender";
pub const TRACE_BRIEFING: &str = "Ahora nos toca trazar la letra para formar la constelación";
pub const PRAISE: &str = "¡Muy bien!";

/// A star on the 0..100 drawing board.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub id: u8,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge(pub u8, pub u8);

impl Edge {
    /// Direction does not matter.
    pub fn same_as(self, other: Edge) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LetterShape {
    pub letter: char,
    pub points: &'static [Point],
    pub edges: &'static [Edge],
}

const fn p(id: u8, x: f32, y: f32) -> Point {
    Point { id, x, y }
}

pub static LETTERS: [LetterShape; 5] = [
    LetterShape {
        letter: 'A',
        points: &[p(1, 50.0, 15.0), p(2, 20.0, 85.0), p(3, 80.0, 85.0), p(4, 35.0, 50.0), p(5, 65.0, 50.0)],
        edges: &[Edge(2, 1), Edge(1, 3), Edge(4, 5)],
    },
    LetterShape {
        letter: 'E',
        points: &[
            p(1, 70.0, 15.0),
            p(2, 30.0, 15.0),
            p(3, 30.0, 50.0),
            p(4, 60.0, 50.0),
            p(5, 30.0, 85.0),
            p(6, 70.0, 85.0),
        ],
        edges: &[Edge(1, 2), Edge(2, 5), Edge(5, 6), Edge(3, 4)],
    },
    LetterShape {
        letter: 'I',
        points: &[
            p(1, 30.0, 15.0),
            p(2, 70.0, 15.0),
            p(3, 50.0, 15.0),
            p(4, 50.0, 85.0),
            p(5, 30.0, 85.0),
            p(6, 70.0, 85.0),
        ],
        edges: &[Edge(1, 2), Edge(3, 4), Edge(5, 6)],
    },
    LetterShape {
        letter: 'O',
        points: &[p(1, 50.0, 15.0), p(2, 80.0, 50.0), p(3, 50.0, 85.0), p(4, 20.0, 50.0)],
        edges: &[Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 1)],
    },
    LetterShape {
        letter: 'U',
        points: &[p(1, 30.0, 15.0), p(2, 30.0, 70.0), p(3, 50.0, 85.0), p(4, 70.0, 70.0), p(5, 70.0, 15.0)],
        edges: &[Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 5)],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    /// Dismiss whichever briefing is showing.
    Begin,
    /// The demonstration video reached its end.
    DemoEnded,
    SkipDemo,
    /// Pointer went down on star `id`.
    PressPoint(u8),
    /// Pointer came up on star `id`.
    ReleasePoint(u8),
    /// Pointer came up anywhere else.
    CancelDrag,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    WatchBriefing,
    Demo { index: usize },
    TraceBriefing,
    Tracing { letter: usize, lines: Vec<Edge>, drag_from: Option<u8> },
    /// Letter finished; waiting to move on.
    Settling { letter: usize },
    Done,
}

#[derive(Debug)]
enum Task {
    NextLetter,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Constellation {
    phase: Phase,
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl Default for Constellation {
    fn default() -> Self {
        Self::new()
    }
}

impl Constellation {
    pub fn new() -> Self {
        Self { phase: Phase::WatchBriefing, timers: Timers::new() }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Shape currently on the board, demo or tracing.
    pub fn shape(&self) -> Option<&'static LetterShape> {
        match self.phase {
            Phase::Demo { index } => LETTERS.get(index),
            Phase::Tracing { letter, .. } | Phase::Settling { letter } => LETTERS.get(letter),
            Phase::TraceBriefing => LETTERS.first(),
            _ => None,
        }
    }

    fn start_demo(&mut self, index: usize, ctx: &mut LevelCtx) {
        match LETTERS.get(index) {
            Some(shape) => {
                self.phase = Phase::Demo { index };
                ctx.say(shape.letter.to_string());
            }
            None => self.phase = Phase::TraceBriefing,
        }
    }

    fn release(&mut self, to: u8, now: f64, ctx: &mut LevelCtx) {
        let Phase::Tracing { letter, lines, drag_from } = &mut self.phase else { return };
        let (Some(from), Some(shape)) = (drag_from.take(), LETTERS.get(*letter)) else {
            return;
        };
        if from == to {
            return;
        }
        let drawn = Edge(from, to);
        let required = shape.edges.iter().any(|e| e.same_as(drawn));
        let already = lines.iter().any(|e| e.same_as(drawn));
        if !required || already {
            log::debug!("level 3: ignoring line {from}-{to}");
            return;
        }
        lines.push(drawn);
        if shape.edges.iter().all(|req| lines.iter().any(|e| e.same_as(*req))) {
            let letter = *letter;
            ctx.award(POINTS_PER_LETTER);
            ctx.say(PRAISE);
            self.phase = Phase::Settling { letter };
            self.timers.schedule(now, NEXT_LETTER_DELAY_MS, Task::NextLetter);
        }
    }
}

impl Level for Constellation {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::ALL[2]
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match (&mut self.phase, input) {
            (Phase::WatchBriefing, Input::Begin) => self.start_demo(0, ctx),
            (Phase::Demo { index }, Input::DemoEnded | Input::SkipDemo) => {
                let next = *index + 1;
                self.start_demo(next, ctx);
            }
            (Phase::TraceBriefing, Input::Begin) => {
                self.phase = Phase::Tracing { letter: 0, lines: Vec::new(), drag_from: None };
            }
            (Phase::Tracing { drag_from, .. }, Input::PressPoint(id)) => *drag_from = Some(id),
            (Phase::Tracing { .. }, Input::ReleasePoint(id)) => self.release(id, now, ctx),
            (Phase::Tracing { drag_from, .. }, Input::CancelDrag) => *drag_from = None,
            (_, other) => log::debug!("level 3: {other:?} ignored"),
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            let Task::NextLetter = task;
            let Phase::Settling { letter } = self.phase else { continue };
            if letter + 1 < LETTERS.len() {
                self.phase = Phase::Tracing { letter: letter + 1, lines: Vec::new(), drag_from: None };
            } else {
                self.phase = Phase::Done;
                log::info!("level 3 complete");
                ctx.complete();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelEvent;

    fn tracing() -> Constellation {
        let mut l = Constellation::new();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::Begin, 0.0, &mut ctx);
        for _ in 0..LETTERS.len() {
            l.handle(Input::SkipDemo, 0.0, &mut ctx);
        }
        assert_eq!(l.phase(), &Phase::TraceBriefing);
        l.handle(Input::Begin, 0.0, &mut ctx);
        l
    }

    fn draw(l: &mut Constellation, e: Edge, now: f64, ctx: &mut LevelCtx) {
        l.handle(Input::PressPoint(e.0), now, ctx);
        l.handle(Input::ReleasePoint(e.1), now, ctx);
    }

    #[test]
    fn letters_reference_only_their_own_points() {
        for shape in &LETTERS {
            for e in shape.edges {
                assert!(shape.points.iter().any(|p| p.id == e.0), "{}", shape.letter);
                assert!(shape.points.iter().any(|p| p.id == e.1), "{}", shape.letter);
            }
        }
    }

    #[test]
    fn demos_speak_each_letter_in_order() {
        let mut l = Constellation::new();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::Begin, 0.0, &mut ctx);
        for _ in 0..5 {
            l.handle(Input::DemoEnded, 0.0, &mut ctx);
        }
        let spoken: Vec<String> = ctx
            .into_events()
            .into_iter()
            .filter_map(|e| match e {
                LevelEvent::Speak(u) => Some(u.text),
                _ => None,
            })
            .collect();
        assert_eq!(spoken, ["A", "E", "I", "O", "U"]);
    }

    #[test]
    fn wrong_and_duplicate_lines_are_ignored() {
        let mut l = tracing();
        let mut ctx = LevelCtx::new(0);
        draw(&mut l, Edge(2, 3), 0.0, &mut ctx);
        draw(&mut l, Edge(1, 2), 0.0, &mut ctx);
        draw(&mut l, Edge(2, 1), 0.0, &mut ctx);
        let Phase::Tracing { lines, .. } = l.phase() else { panic!("not tracing") };
        assert_eq!(lines, &vec![Edge(1, 2)]);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn release_without_press_draws_nothing() {
        let mut l = tracing();
        let mut ctx = LevelCtx::new(0);
        l.handle(Input::PressPoint(1), 0.0, &mut ctx);
        l.handle(Input::CancelDrag, 0.0, &mut ctx);
        l.handle(Input::ReleasePoint(3), 0.0, &mut ctx);
        let Phase::Tracing { lines, .. } = l.phase() else { panic!("not tracing") };
        assert!(lines.is_empty());
    }

    #[test]
    fn tracing_every_letter_scores_and_completes_once() {
        let mut l = tracing();
        let mut ctx = LevelCtx::new(0);
        let mut now = 0.0;
        for shape in &LETTERS {
            for e in shape.edges {
                // Reverse direction is accepted too.
                draw(&mut l, Edge(e.1, e.0), now, &mut ctx);
            }
            assert!(matches!(l.phase(), Phase::Settling { .. }));
            now += NEXT_LETTER_DELAY_MS;
            l.tick(now, &mut ctx);
        }
        l.tick(now + 5_000.0, &mut ctx);
        assert_eq!(ctx.score(), 100);
        assert_eq!(l.phase(), &Phase::Done);
        let completes = ctx.events().iter().filter(|e| **e == LevelEvent::Complete).count();
        assert_eq!(completes, 1);
    }
}
