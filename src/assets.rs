// Asset path resolution. Every path is built from a small enumeration
// (vowel, colour tag, level data) so the front end never hard-codes file names.

use crate::catalog::{Character, ColorTag, GiftItem, Vowel};

const IMG: &str = "/img";

pub fn character_image(character: &Character) -> String {
    format!("{IMG}/{}.png", character.portrait)
}

pub fn ship_image(color: ColorTag) -> String {
    match color {
        ColorTag::Yellow => format!("{IMG}/nave amarillo 1.png"),
        _ => format!("{IMG}/nave morado 1.png"),
    }
}

/// Intro cinematic per character colour. Only yellow and purple have their own cut.
pub fn intro_video(color: ColorTag) -> String {
    match color {
        ColorTag::Purple => format!("{IMG}/intro_morado.mp4"),
        _ => format!("{IMG}/intro_amarillo.mp4"),
    }
}

pub fn explanation_video() -> String {
    format!("{IMG}/explicacion.mp4")
}

pub fn star_image(vowel: Option<Vowel>) -> String {
    match vowel {
        Some(v) => format!("{IMG}/estrella{}.png", v.upper()),
        None => format!("{IMG}/estrella.png"),
    }
}

// The "i" martian file was exported lowercase.
pub fn creature_image(vowel: Vowel) -> String {
    match vowel {
        Vowel::I => format!("{IMG}/Marciano i.png"),
        v => format!("{IMG}/Marciano {}.png", v.upper()),
    }
}

pub fn crater_image() -> String {
    format!("{IMG}/Crater.png")
}

pub fn gift_image(item: &GiftItem) -> String {
    format!("{IMG}/2.3{}.png", item.id.to_uppercase())
}

/// Tracing demonstration for an uppercase vowel letter.
pub fn letter_demo_video(letter: char) -> String {
    format!("{IMG}/anima{}.mp4", letter.to_ascii_uppercase())
}

/// One of four meteor sprites; `variant` wraps into 1..=4.
pub fn meteorite_image(variant: usize) -> String {
    format!("{IMG}/met{}.png", variant % 4 + 1)
}
