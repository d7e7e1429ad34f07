mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
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

use wizard_game::compute::{init_state, is_running, start, tick};
use wizard_game::config::Config;
use wizard_game::entities::EntireGameStateInfo;
use wizard_game::input::{HeldKeys, Key};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈130 ms) is
/// refreshed before expiry while the key is repeating.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(author, version, about = "Wizard vs bugs: a terminal arcade game", long_about = None)]
struct Cli {
    /// JSON file overriding the built-in tuning constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for spawn positions (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Log file (defaults to wizard_game.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Key mapping ───────────────────────────────────────────────────────────────

/// Arrows and WASD steer, Space fires; anything else is tracked but inert.
fn map_key(code: &KeyCode) -> Key {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::ArrowUp,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::ArrowDown,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::ArrowLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::ArrowRight,
        KeyCode::Char(' ') => Key::Space,
        other => Key::Other(format!("{:?}", other)),
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Block until a key is pressed (releases are ignored).
fn wait_for_key(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return Some(key),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

fn drain(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}

// ── Start control ─────────────────────────────────────────────────────────────

/// Show the idle screen until the start control is used.  Returns `false` on quit.
fn wait_for_start<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    display::render(out, state, terminal::size()?)?;
    while let Some(KeyEvent { code, modifiers, .. }) = wait_for_key(rx) {
        if is_quit(&code, modifiers) {
            return Ok(false);
        }
        if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
            return Ok(true);
        }
    }
    Ok(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → the session ended.
///
/// Input model: every press/repeat event records the physical key and the
/// frame it was seen in `held`.  A release event removes it.  On terminals
/// without release events, keys that have not been refreshed within
/// `HOLD_WINDOW` frames are released automatically.  Each frame the physical
/// keys are collapsed into the logical `InputState`, so `w` and `Up` held
/// together keep the wizard moving until both are up.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut EntireGameStateInfo,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let mut held: HeldKeys<KeyCode> = HeldKeys::default();
    let mut frame: u64 = 0;
    let session_start = Instant::now();

    while is_running(state) {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if kind == KeyEventKind::Press && is_quit(&code, modifiers) {
                        return Ok(true);
                    }
                    held.press(code, map_key(&code), frame);
                }
                KeyEventKind::Release => held.release(&code),
            }
        }

        held.expire(frame, HOLD_WINDOW);
        let input = held.input_state();

        let timestamp = session_start.elapsed().as_millis() as u64;
        *state = tick(state, &input, timestamp, rng);

        display::render(out, state, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
    Ok(false)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("wizard_game.log"));
    init_logging(&log_path)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("Wizard game starting (seed {:?})", cli.seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
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
            Err(_) => break,
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
    config: Config,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut state = init_state(config);
    if !wait_for_start(out, &state, rx)? {
        return Ok(());
    }

    loop {
        drain(rx);
        state = start(&state);
        if game_loop(out, &mut state, rx, rng)? {
            break;
        }

        // Blocking alert, then the game-over screen until restart or quit
        drain(rx);
        display::render_alert(out, "Game Over!", terminal::size()?)?;
        if wait_for_key(rx).is_none() {
            break;
        }
        display::render(out, &state, terminal::size()?)?;

        let mut restart = false;
        while let Some(KeyEvent { code, modifiers, .. }) = wait_for_key(rx) {
            if is_quit(&code, modifiers) {
                break;
            }
            if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                restart = true;
                break;
            }
        }
        if !restart {
            break;
        }
    }
    Ok(())
}
