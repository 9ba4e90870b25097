mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use paratrooper::compute::{init_state, tick};
use paratrooper::{GameConfig, GameState, GameStatus, TickInput};

use display::{Palette, Renderer};

#[derive(Parser)]
#[command(name = "paratrooper", about = "Shoot down the aircraft before the paratroopers reach your cannon")]
struct Cli {
    /// TOML file overriding the default game configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the aircraft spawn sequence (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Frames covered by `HOLD_WINDOW` at the given tick rate.
fn hold_window_frames(tick_rate: u32) -> u64 {
    (HOLD_WINDOW.as_millis() as u64 * tick_rate as u64 / 1000).max(1)
}

/// Returns true if any of `keys` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    })
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → start a new session.
///
/// Turn keys are level-triggered: a `key_frame` map records the frame of the
/// last press/repeat event of every key and each frame samples which keys
/// are still fresh.  Fire is edge-triggered on `Press`; `Repeat` events from
/// keyboard-enhanced terminals do not fire again.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    renderer: &Renderer,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let frame_time = Duration::from_secs(1) / state.config.world.tick_rate;
    let window = hold_window_frames(state.config.world.tick_rate);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut fire = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        KeyCode::Char(' ') => fire = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = TickInput {
            turn_left: is_held(&key_frame, &LEFT_KEYS, frame, window),
            turn_right: is_held(&key_frame, &RIGHT_KEYS, frame, window),
            fire,
        };

        *state = tick(state, &input, rng);

        renderer.render(out, state, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::warn!("input thread stopped: {}", err);
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let renderer = Renderer::new(&config, Palette::default());
    let mut session = 0u32;

    loop {
        session += 1;
        log::info!("starting session {}", session);
        let mut state = init_state(config, rng);
        let quit = game_loop(out, &mut state, &renderer, rx, rng)?;
        log::info!("session {} ended with score {}", session, state.score);
        if quit {
            break;
        }
    }
    Ok(())
}
