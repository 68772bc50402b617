//! Terminal snake runner (default binary).
//!
//! The thin frame driver around the engine: poll keys, advance the engine
//! with a monotonic timestamp once per frame, render the snapshot, flush.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{terminal::SetTitle, QueueableCommand};

use tui_snake::core::{GameConfig, RenderSnapshot};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::term::{GameView, TerminalRenderer, Viewport};
use tui_snake::{Engine, ScoreSink};

/// Reflects the score into the terminal title.
struct TitleScoreSink;

impl ScoreSink for TitleScoreSink {
    fn publish(&mut self, score: u32) {
        let mut stdout = io::stdout();
        let _ = stdout.queue(SetTitle(format!("tui-snake | score {score}")));
        let _ = stdout.flush();
    }
}

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut engine = Engine::new(GameConfig::default(), seed, Some(Box::new(TitleScoreSink)))?;

    let view = GameView;
    let mut snapshot = RenderSnapshot::default();
    let epoch = Instant::now();
    let poll_timeout = Duration::from_millis(8);

    loop {
        // Input with a short timeout so the frame clock keeps moving.
        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        engine.destroy();
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.handle_input(action)?;
                    }
                }
            }
        }

        // Advance and render.
        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        let frame = engine.advance(now_ms)?;
        engine.snapshot_into(&mut snapshot);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&snapshot, frame.alpha, Viewport::new(w, h));
        term.draw(&fb)?;
    }
}
