//! Short-lived messages shown over the well (line clear names, level ups).

use crate::core::GameEvent;

/// How long a banner stays up
pub const BANNER_MS: u32 = 1200;

#[derive(Debug, Default)]
pub struct Banner {
    text: String,
    remaining_ms: u32,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from one engine event. Level ups win over clear names.
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LinesCleared { count, .. } => {
                let name = match count {
                    1 => "SINGLE",
                    2 => "DOUBLE",
                    3 => "TRIPLE",
                    _ => "TETRIS",
                };
                self.show(name);
            }
            GameEvent::LevelUp { level } => {
                self.text.clear();
                self.text.push_str("LEVEL ");
                self.text.push_str(&level.to_string());
                self.remaining_ms = BANNER_MS;
            }
            GameEvent::Reset => self.remaining_ms = 0,
            _ => {}
        }
    }

    fn show(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.remaining_ms = BANNER_MS;
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    pub fn text(&self) -> Option<&str> {
        (self.remaining_ms > 0).then_some(self.text.as_str())
    }
}
