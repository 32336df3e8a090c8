/// Text readouts derived from the session: score, lives and final score.
///
/// A counter never touches game state.  It reads the session it is handed
/// and writes a prefixed string into whatever sink it is given.  Either of
/// those may be missing; the counter then logs once and skips the write.

use log::warn;

use crate::entities::Session;

/// Anything that can display a line of text.
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readout {
    Score,
    Lives,
    FinalScore,
}

impl Readout {
    fn default_prefix(self) -> &'static str {
        match self {
            Readout::Score => "Score: ",
            Readout::Lives => "Lives: ",
            Readout::FinalScore => "Game Over! Final Score: ",
        }
    }

    fn read(self, session: &Session) -> u32 {
        match self {
            Readout::Score | Readout::FinalScore => session.score(),
            Readout::Lives => session.lives(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Counter {
    pub readout: Readout,
    pub prefix: String,
    /// Write every refresh instead of only when the value changes.
    pub update_continuously: bool,
    /// Final score only: stay hidden while the game is still running.
    pub hide_during_gameplay: bool,
    last_known: Option<u32>,
    visible: bool,
    warned: bool,
}

impl Counter {
    pub fn new(readout: Readout) -> Self {
        Self {
            readout,
            prefix: readout.default_prefix().to_string(),
            update_continuously: true,
            hide_during_gameplay: readout == Readout::FinalScore,
            last_known: None,
            visible: readout != Readout::FinalScore,
            warned: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_update_continuously(mut self, on: bool) -> Self {
        self.update_continuously = on;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Force the next `refresh` to write even if nothing changed.
    pub fn refresh_now(&mut self) {
        self.last_known = None;
    }

    /// Pull the current value and write it to `sink`.  Returns whether the
    /// sink was written.
    pub fn refresh(&mut self, session: Option<&Session>, sink: Option<&mut dyn TextSink>) -> bool {
        let (Some(session), Some(sink)) = (session, sink) else {
            if !self.warned {
                warn!("{:?} counter has no session or text target, skipping", self.readout);
                self.warned = true;
            }
            return false;
        };

        if self.hide_during_gameplay && session.is_active() {
            self.visible = false;
            self.last_known = None;
            return false;
        }
        self.visible = true;

        let value = self.readout.read(session);
        if !self.update_continuously && self.last_known == Some(value) {
            return false;
        }
        self.last_known = Some(value);
        sink.set_text(&format!("{}{}", self.prefix, value));
        true
    }
}

// ── HUD bundle ────────────────────────────────────────────────────────────────

/// The three readouts the game shows, each with its own text buffer.
#[derive(Clone, Debug)]
pub struct Hud {
    pub score: Counter,
    pub lives: Counter,
    pub final_score: Counter,
    pub score_text: String,
    pub lives_text: String,
    pub final_text: String,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: Counter::new(Readout::Score),
            lives: Counter::new(Readout::Lives),
            final_score: Counter::new(Readout::FinalScore),
            score_text: String::new(),
            lives_text: String::new(),
            final_text: String::new(),
        }
    }
}

impl Hud {
    pub fn refresh(&mut self, session: Option<&Session>) {
        self.score.refresh(session, Some(&mut self.score_text));
        self.lives.refresh(session, Some(&mut self.lives_text));
        self.final_score.refresh(session, Some(&mut self.final_text));
    }

    /// The final-score line, if it should be on screen.
    pub fn final_line(&self) -> Option<&str> {
        self.final_score.is_visible().then_some(self.final_text.as_str())
    }
}
