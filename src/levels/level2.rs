//! Level 2: the martian outpost, played in three phases.
//!
//! 1. **Craters** – open five craters, each hiding one vowel.
//! 2. **Signs** – pick a martian, then the sign carrying its vowel. The signs
//!    are shuffled once per visit.
//! 3. **Gifts** – one gift per vowel is drawn from [`GIFT_ITEMS`] and shuffled;
//!    pick a gift, then the box labelled with its first vowel.
//!
//! Between phases an interlude dialog waits for the player to continue.
//! Wrong answers cost nothing and clear the current selection.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Level, LevelCtx};
use crate::GIFT_ITEMS;
use crate::catalog::{GiftItem, Vowel};
use crate::session::LevelIndex;
use crate::timer::Timers;

pub const POINTS_PER_SIGN: u32 = 10;
pub const POINTS_PER_GIFT: u32 = 20;
pub const CRATERS_INTERLUDE_DELAY_MS: f64 = 1000.0;
pub const SIGNS_INTERLUDE_DELAY_MS: f64 = 500.0;
pub const COMPLETE_DELAY_MS: f64 = 1500.0;

pub const WRONG_SIGN: &str = "Inténtalo de nuevo";
pub const WRONG_BOX: &str = "Ese no es su lugar";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Input {
    /// Crater index 0..5 (a, e, i, o, u).
    OpenCrater(usize),
    /// Dismiss the current interlude dialog.
    Continue,
    /// Martian index 0..5 (a, e, i, o, u).
    SelectCreature(usize),
    /// Sign position 0..5 in the shuffled row.
    PickSign(usize),
    /// Gift position 0..5 in the shuffled pool.
    SelectGift(usize),
    /// Drop the selected gift into the box for this vowel.
    PlaceGift(Vowel),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Interlude {
    VowelsFound,
    SignsConnected,
    GiftsArrived,
}

impl Interlude {
    pub fn text(self) -> &'static str {
        match self {
            Interlude::VowelsFound => "¡Descubriste las vocales, que bien! Continua...",
            Interlude::SignsConnected => "¡Excelente trabajo conectando!",
            Interlude::GiftsArrived => {
                "Los marcianos te han regalado objetos por ayudarles, ahora necesitas ordenar tus regalos"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignBoard {
    pub selected: Option<usize>,
    /// (martian index, sign position) pairs, in the order they were made.
    pub matches: Vec<(usize, usize)>,
}

impl SignBoard {
    fn creature_matched(&self, creature: usize) -> bool {
        self.matches.iter().any(|(c, _)| *c == creature)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GiftSort {
    pub selected: Option<usize>,
    /// Indexed by vowel; holds the gift position placed in that box.
    pub boxes: [Option<usize>; 5],
}

impl GiftSort {
    fn is_placed(&self, gift: usize) -> bool {
        self.boxes.iter().any(|b| *b == Some(gift))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    Craters { open: [bool; 5] },
    Interlude(Interlude),
    Signs(SignBoard),
    Gifts(GiftSort),
    Done,
}

#[derive(Debug)]
enum Task {
    Show(Interlude),
    Complete,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MartianOutpost {
    phase: Phase,
    /// Vowel on each sign, left to right.
    signs: [Vowel; 5],
    /// Gift pool, one per vowel, in display order.
    gifts: Vec<&'static GiftItem>,
    #[cfg_attr(feature = "serde", serde(skip))]
    timers: Timers<Task>,
}

impl MartianOutpost {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut signs = Vowel::ALL;
        signs.shuffle(rng);
        Self {
            phase: Phase::Craters { open: [false; 5] },
            signs,
            gifts: draw_gifts(GIFT_ITEMS, rng),
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn signs(&self) -> &[Vowel; 5] {
        &self.signs
    }

    pub fn gifts(&self) -> &[&'static GiftItem] {
        &self.gifts
    }

    fn open_crater(&mut self, idx: usize, now: f64, ctx: &mut LevelCtx) {
        let Phase::Craters { open } = &mut self.phase else { return };
        let Some(v) = Vowel::from_index(idx) else { return };
        if open[idx] {
            return;
        }
        open[idx] = true;
        ctx.say(v.lower());
        if open.iter().all(|o| *o) {
            self.timers.schedule(now, CRATERS_INTERLUDE_DELAY_MS, Task::Show(Interlude::VowelsFound));
        }
    }

    fn continue_dialog(&mut self) {
        let Phase::Interlude(which) = self.phase else { return };
        self.phase = match which {
            Interlude::VowelsFound => Phase::Signs(SignBoard { selected: None, matches: Vec::new() }),
            Interlude::SignsConnected => Phase::Interlude(Interlude::GiftsArrived),
            Interlude::GiftsArrived => Phase::Gifts(GiftSort { selected: None, boxes: [None; 5] }),
        };
    }

    fn select_creature(&mut self, idx: usize, ctx: &mut LevelCtx) {
        let Phase::Signs(board) = &mut self.phase else { return };
        let Some(v) = Vowel::from_index(idx) else { return };
        if board.creature_matched(idx) {
            return;
        }
        board.selected = Some(idx);
        ctx.say(v.lower());
    }

    fn pick_sign(&mut self, pos: usize, now: f64, ctx: &mut LevelCtx) {
        let Phase::Signs(board) = &mut self.phase else { return };
        let (Some(creature), Some(sign)) = (board.selected, self.signs.get(pos).copied()) else {
            return;
        };
        board.selected = None;
        if Vowel::ALL[creature] != sign {
            ctx.say(WRONG_SIGN);
            return;
        }
        board.matches.push((creature, pos));
        ctx.award(POINTS_PER_SIGN);
        if board.matches.len() == Vowel::ALL.len() {
            self.timers.schedule(now, SIGNS_INTERLUDE_DELAY_MS, Task::Show(Interlude::SignsConnected));
        }
    }

    fn select_gift(&mut self, pos: usize, ctx: &mut LevelCtx) {
        let Phase::Gifts(sort) = &mut self.phase else { return };
        let Some(item) = self.gifts.get(pos) else { return };
        if sort.is_placed(pos) {
            return;
        }
        sort.selected = Some(pos);
        ctx.say(item.name);
    }

    fn place_gift(&mut self, target: Vowel, now: f64, ctx: &mut LevelCtx) {
        let Phase::Gifts(sort) = &mut self.phase else { return };
        let Some(pos) = sort.selected.take() else { return };
        let Some(item) = self.gifts.get(pos) else { return };
        if item.vowel != target || sort.boxes[target.index()].is_some() {
            ctx.say(WRONG_BOX);
            return;
        }
        sort.boxes[target.index()] = Some(pos);
        ctx.award(POINTS_PER_GIFT);
        if sort.boxes.iter().all(Option::is_some) {
            self.timers.schedule(now, COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

/// One random gift per vowel, then the five shuffled together.
pub fn draw_gifts<R: Rng + ?Sized>(catalog: &'static [GiftItem], rng: &mut R) -> Vec<&'static GiftItem> {
    let mut picked: Vec<&'static GiftItem> = Vowel::ALL
        .iter()
        .filter_map(|v| {
            let options: Vec<&'static GiftItem> = catalog.iter().filter(|g| g.vowel == *v).collect();
            options.choose(rng).copied()
        })
        .collect();
    picked.shuffle(rng);
    picked
}

impl Level for MartianOutpost {
    type Input = Input;

    fn number(&self) -> LevelIndex {
        LevelIndex::ALL[1]
    }

    fn handle(&mut self, input: Input, now: f64, ctx: &mut LevelCtx) {
        match input {
            Input::OpenCrater(i) => self.open_crater(i, now, ctx),
            Input::Continue => self.continue_dialog(),
            Input::SelectCreature(i) => self.select_creature(i, ctx),
            Input::PickSign(i) => self.pick_sign(i, now, ctx),
            Input::SelectGift(i) => self.select_gift(i, ctx),
            Input::PlaceGift(v) => self.place_gift(v, now, ctx),
        }
    }

    fn tick(&mut self, now: f64, ctx: &mut LevelCtx) {
        for task in self.timers.due(now) {
            match task {
                Task::Show(which) => self.phase = Phase::Interlude(which),
                Task::Complete => {
                    if matches!(self.phase, Phase::Gifts(_)) {
                        self.phase = Phase::Done;
                        log::info!("level 2 complete");
                        ctx.complete();
                    }
                }
            }
        }
    }
}
