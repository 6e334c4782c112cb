//! Speech output boundary.
//!
//! Game logic only ever *requests* an utterance; nothing waits for it to
//! finish and nothing breaks if the browser has no voices at all.

use std::cell::RefCell;
use std::rc::Rc;

/// Default locale for every utterance in the game.
pub const LOCALE: &str = "es-ES";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Rate {
    #[default]
    Normal,
    Fast,
    Slow,
}

impl Rate {
    /// Multiplier handed to the synthesizer.
    pub fn factor(self) -> f32 {
        match self {
            Rate::Normal => 1.0,
            Rate::Fast => 2.0,
            Rate::Slow => 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub rate: Rate,
}

impl Utterance {
    pub fn new(text: impl Into<String>, locale: impl Into<String>, rate: Rate) -> Self {
        Self { text: text.into(), locale: locale.into(), rate }
    }
}

/// Fire-and-forget speech sink.
pub trait Speech {
    fn speak(&mut self, utterance: &Utterance);
}

/// Discards every request. Used when no voice backend is wanted.
#[derive(Debug, Default)]
pub struct NullSpeech;

impl Speech for NullSpeech {
    fn speak(&mut self, _utterance: &Utterance) {}
}

/// Keeps every request in a shared log; clone the handle before boxing it.
#[derive(Clone, Debug, Default)]
pub struct RecordingSpeech {
    log: Rc<RefCell<Vec<Utterance>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.log.borrow().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.log.borrow().iter().map(|u| u.text.clone()).collect()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Speech for RecordingSpeech {
    fn speak(&mut self, utterance: &Utterance) {
        self.log.borrow_mut().push(utterance.clone());
    }
}

/// `window.speechSynthesis` backend. Only meaningful inside a browser.
#[derive(Debug, Default)]
pub struct BrowserSpeech;

impl Speech for BrowserSpeech {
    fn speak(&mut self, utterance: &Utterance) {
        let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
            log::debug!("speech synthesis unavailable; dropping {:?}", utterance.text);
            return;
        };
        let Ok(u) = web_sys::SpeechSynthesisUtterance::new_with_text(&utterance.text) else {
            return;
        };
        u.set_lang(&utterance.locale);
        u.set_rate(utterance.rate.factor());
        synth.speak(&u);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_handles_share_one_log() {
        let rec = RecordingSpeech::new();
        let mut boxed: Box<dyn Speech> = Box::new(rec.clone());
        boxed.speak(&Utterance::new("a", LOCALE, Rate::Normal));
        boxed.speak(&Utterance::new("Boom", LOCALE, Rate::Slow));
        assert_eq!(rec.texts(), vec!["a", "Boom"]);
        assert_eq!(rec.spoken()[1].rate.factor(), 0.5);
        rec.clear();
        assert!(rec.spoken().is_empty());
    }
}
