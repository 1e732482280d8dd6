mod cli;
mod event;
mod keys;
mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use alien_invaders::session::Session;
use alien_invaders::sound::Sound;
use cli::Args;
use event::{Event, EventHandler};
use keys::Keyboard;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, tick_ms = args.tick_ms, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut session = Session::new(seed);
    session.set_muted(args.muted);
    let mut keyboard = Keyboard::new(enhanced);
    let event_handler = EventHandler::new(args.tick_ms);

    let result = run(&mut terminal, &mut session, &mut keyboard, &event_handler);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    keyboard: &mut Keyboard,
    events: &EventHandler,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::render(frame, &*session))?;

        match events.next()? {
            Event::Tick => {
                let now = Instant::now();
                let dt = now.duration_since(last_tick).as_secs_f32();
                last_tick = now;
                keyboard.expire(now);
                session
                    .tick(&*keyboard, dt)
                    .with_context(|| format!("tick rejected in state {:?}", session.state()))?;
                play_sounds(session.take_sounds())?;
            }
            Event::Key(key) => {
                let quit = key.kind == KeyEventKind::Press
                    && (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL)));
                if quit {
                    info!(score = session.wave().map_or(0, |wave| wave.score()), "quit");
                    return Ok(());
                }
                keyboard.record(key, Instant::now());
            }
        }
    }
}

/// The terminal has no mixer; a ship loss rings the bell and the rest are logged.
fn play_sounds(sounds: Vec<Sound>) -> io::Result<()> {
    for sound in sounds {
        match sound {
            Sound::ShipHit => {
                let mut stdout = io::stdout();
                stdout.write_all(b"\x07")?;
                stdout.flush()?;
            }
            other => trace!(sound = ?other, "sound_cue"),
        }
    }
    Ok(())
}
