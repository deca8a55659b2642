//! Headless line protocol: drive a session from text, print JSON lines.
//!
//! Input, one item per line:
//!
//! - `tick <ms>` advances the gravity clock
//! - a command name (`moveLeft`, `hardDrop`, `restart`, ...) applies it
//! - `snapshot` prints the full snapshot
//! - blank lines and `#` comments are skipped, anything else is ignored
//!
//! Every event a line produces is printed as its own JSON object.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;

use crate::core::{GameEvent, GameSnapshot, GameState};

#[derive(Serialize)]
#[serde(untagged)]
enum Record<'a> {
    Event(&'a GameEvent),
    Snapshot { snapshot: &'a GameSnapshot },
}

pub struct TraceDriver {
    game: GameState,
    snap: GameSnapshot,
}

impl TraceDriver {
    pub fn new(seed: u32) -> Self {
        let mut game = GameState::new(seed);
        // The opening reset/spawn is part of every trace.
        game.drain_events().for_each(drop);
        Self {
            game,
            snap: GameSnapshot::default(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Handle one input line, writing any output to `out`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("tick"), Some(ms)) => match ms.parse::<u32>() {
                Ok(ms) => {
                    self.game.tick(ms);
                }
                Err(_) => log::debug!("ignoring bad tick: {}", line),
            },
            (Some("snapshot"), None) => {
                self.game.snapshot_into(&mut self.snap);
                serde_json::to_writer(&mut *out, &Record::Snapshot { snapshot: &self.snap })?;
                out.write_all(b"\n")?;
            }
            (Some(name), None) => {
                if !self.game.apply_command(name) {
                    log::trace!("command had no effect: {}", name);
                }
            }
            _ => log::debug!("ignoring line: {}", line),
        }

        for event in self.game.drain_events() {
            serde_json::to_writer(&mut *out, &Record::Event(&event))?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Run until `input` is exhausted.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for line in input.lines() {
            self.handle_line(&line?, out)?;
        }
        out.flush()?;
        Ok(())
    }
}
