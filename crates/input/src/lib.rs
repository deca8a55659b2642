//! Terminal input: crossterm key events to game commands.
//!
//! The mapping is context sensitive only after game over, where the confirm
//! keys restart the session. Key repeat is left to the terminal; every press
//! and auto-repeat produces one command.

pub mod keymap;

pub use blockfall_types as types;

pub use keymap::{handle_key_event, should_quit, translate, InputCommand};
