//! Terminal frontend for the falling-block game.
//!
//! Rendering is split in two: [`GameView`] lays a snapshot out on a
//! [`FrameBuffer`] without touching the terminal, and [`TerminalRenderer`]
//! pushes framebuffers to stdout, re-sending only what changed.

pub mod banner;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use banner::Banner;
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
