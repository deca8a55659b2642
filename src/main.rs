//! Terminal runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. The engine is
//! ticked at a fixed frame length; key presses and auto-repeats apply commands
//! as they arrive.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::config::{parse_args, RunConfig};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{translate, InputCommand};
use blockfall::term::{Banner, FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: RunConfig) -> Result<()> {
    let mut game = GameState::new(config.resolve_seed());
    let view = GameView::default();
    let mut banner = Banner::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        for event in game.drain_events() {
            banner.observe(&event);
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, banner.text(), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match translate(key, game.phase()) {
                    Some(InputCommand::Quit) => return Ok(()),
                    Some(InputCommand::Action(action)) => {
                        game.apply_action(action);
                    }
                    None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            game.tick(ms);
            banner.tick(ms);
        }
    }
}
