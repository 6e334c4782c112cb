//! Vowel Quest core crate.
//!
//! A space adventure for early readers: a teacher logs in, picks a student,
//! the student picks a pilot, and six missions teach the Spanish vowels, the
//! first syllables and a first sentence. Everything here is plain state that
//! runs natively under `cargo test`; `web` wires it to the browser.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod assets;
pub mod catalog;
pub mod levels;
pub mod roster;
pub mod session;
pub mod speech;
pub mod timer;
#[cfg(feature = "serde_json")]
pub mod web;

pub use app::{App, AppConfig, AppError, Command, Snapshot};
pub use catalog::{Character, ColorTag, Credential, GiftItem, SeedAccount, SeedStudent, Student, Vowel};
pub use levels::{ActiveLevel, Level, LevelCtx, LevelEvent, LevelInput};
pub use session::{ENERGY_MAX, GameSession, LevelIndex, LoginError, View};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Built-in data
// -----------------------------------------------------------------------------

pub static CHARACTERS: &[Character] = &[
    Character { id: "sparky", name: "Sparky", color: ColorTag::Yellow, portrait: "sparky" },
    Character { id: "rocky", name: "Rocky", color: ColorTag::Purple, portrait: "blobby" },
];

const fn gift(id: &'static str, name: &'static str, vowel: Vowel, icon: &'static str) -> GiftItem {
    GiftItem { id, name, vowel, icon }
}

/// Level 2 gift catalog; three per vowel, one of each is drawn per visit.
pub static GIFT_ITEMS: &[GiftItem] = &[
    gift("anillo", "Anillo", Vowel::A, "💍"),
    gift("avion", "Avión", Vowel::A, "✈️"),
    gift("astronauta", "Astronauta", Vowel::A, "🧑‍🚀"),
    gift("escalera", "Escalera", Vowel::E, "🪜"),
    gift("esponja", "Esponja", Vowel::E, "🧽"),
    gift("estrella", "Estrella", Vowel::E, "⭐"),
    gift("iglu", "Iglú", Vowel::I, "🧊"),
    gift("insecto", "Insecto", Vowel::I, "🐜"),
    gift("iman", "Imán", Vowel::I, "🧲"),
    gift("oso", "Oso", Vowel::O, "🐻"),
    gift("ojo", "Ojo", Vowel::O, "👁️"),
    gift("oveja", "Oveja", Vowel::O, "🐑"),
    gift("uva", "Uva", Vowel::U, "🍇"),
    gift("unicornio", "Unicornio", Vowel::U, "🦄"),
    gift("uno", "Uno", Vowel::U, "1️⃣"),
];

/// Teacher accounts. Passwords compare exactly; `can_skip` unlocks the
/// level skip control for testers.
pub static CREDENTIALS: &[Credential] = &[
    Credential { email: "admin@admin", password: "admin", can_skip: false },
    Credential { email: "mateo@mateo", password: "mateo", can_skip: true },
];

pub static SEED_ROSTERS: &[SeedAccount] = &[
    SeedAccount {
        email: "admin@admin",
        students: &[
            SeedStudent { id: 1, name: "Luna", birth_date: Some("2018-05-20") },
            SeedStudent { id: 2, name: "Leo", birth_date: Some("2018-08-15") },
        ],
    },
    SeedAccount {
        email: "mateo@mateo",
        students: &[
            SeedStudent { id: 3, name: "Mia", birth_date: Some("2019-01-10") },
            SeedStudent { id: 4, name: "Zoe", birth_date: Some("2019-03-22") },
            SeedStudent { id: 5, name: "Nova", birth_date: None },
        ],
    },
];
