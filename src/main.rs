//! Puzzle parlor runner (default binary).
//!
//! Opens the dashboard in the alternate screen and drives the shell with a
//! fixed tick. `--generate` prints boards as JSON instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_parlor::cli::{self, Args};
use tui_parlor::config::ShellConfig;
use tui_parlor::input::{handle_key_event, should_quit};
use tui_parlor::shell::Shell;
use tui_parlor::term::{FrameBuffer, TerminalRenderer, Viewport};
use tui_parlor::types::TICK_MS;

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(args.debug);

    let mut config = ShellConfig::from_env();
    args.apply(&mut config);

    if let Some(kind) = args.generate {
        return cli::generate(kind, &config, args.count, &mut io::stdout().lock());
    }

    let mut shell = Shell::new(config)?;
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut shell);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, shell: &mut Shell) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        shell.set_terminal_width(w);
        shell.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        shell.handle(action)?;
                    }
                }
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            shell.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
