//! Entity types shared by every screen: vowels, students, characters, gifts and
//! the account records used at login.
//!
//! The static tables themselves live in the crate root next to the other
//! datasets; this module only defines their shapes.

use std::fmt;

/// The five Spanish vowels, in the order every level lays them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Vowel {
    A,
    E,
    I,
    O,
    U,
}

impl Vowel {
    pub const ALL: [Vowel; 5] = [Vowel::A, Vowel::E, Vowel::I, Vowel::O, Vowel::U];

    /// Position in [`Vowel::ALL`] (a=0 … u=4).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Vowel> {
        Self::ALL.get(idx).copied()
    }

    pub fn lower(self) -> &'static str {
        match self {
            Vowel::A => "a",
            Vowel::E => "e",
            Vowel::I => "i",
            Vowel::O => "o",
            Vowel::U => "u",
        }
    }

    pub fn upper(self) -> &'static str {
        match self {
            Vowel::A => "A",
            Vowel::E => "E",
            Vowel::I => "I",
            Vowel::O => "O",
            Vowel::U => "U",
        }
    }

    /// Parse a single vowel letter, either case. Accented forms are not vowels here.
    pub fn parse(s: &str) -> Option<Vowel> {
        match s {
            "a" | "A" => Some(Vowel::A),
            "e" | "E" => Some(Vowel::E),
            "i" | "I" => Some(Vowel::I),
            "o" | "O" => Some(Vowel::O),
            "u" | "U" => Some(Vowel::U),
            _ => None,
        }
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lower())
    }
}

/// A child on a teacher's roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub birth_date: Option<String>,
}

impl Student {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), birth_date: None }
    }
}

/// Accent colour of a playable character; also selects ship and intro assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColorTag {
    Yellow,
    Cyan,
    Purple,
    Green,
}

impl ColorTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorTag::Yellow => "yellow",
            ColorTag::Cyan => "cyan",
            ColorTag::Purple => "purple",
            ColorTag::Green => "green",
        }
    }
}

/// Playable character. `portrait` is the image stem the asset resolver expands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub color: ColorTag,
    pub portrait: &'static str,
}

/// Gift handed out by the martians in level 2 (phase 3 sorting).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GiftItem {
    pub id: &'static str,
    pub name: &'static str,
    pub vowel: Vowel,
    pub icon: &'static str,
}

/// Compiled-in teacher login. `can_skip` unlocks the level skip control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Credential {
    pub email: &'static str,
    pub password: &'static str,
    pub can_skip: bool,
}

/// Seed student for a built-in roster.
#[derive(Clone, Copy, Debug)]
pub struct SeedStudent {
    pub id: u64,
    pub name: &'static str,
    pub birth_date: Option<&'static str>,
}

impl SeedStudent {
    pub fn to_student(self) -> Student {
        Student {
            id: self.id,
            name: self.name.to_string(),
            birth_date: self.birth_date.map(str::to_string),
        }
    }
}

/// Built-in roster for one teacher account.
#[derive(Clone, Copy, Debug)]
pub struct SeedAccount {
    pub email: &'static str,
    pub students: &'static [SeedStudent],
}

/// Find a character by id in a catalog.
pub fn find_character(catalog: &'static [Character], id: &str) -> Option<&'static Character> {
    catalog.iter().find(|c| c.id == id)
}
