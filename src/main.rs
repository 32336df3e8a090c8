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
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use apple_picker::compute::{init_state, tick};
use apple_picker::entities::{GameState, TickInput};
use apple_picker::hud::Hud;
use apple_picker::{logging, GameConfig};

use display::Viewport;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest step the simulation takes, so a stalled frame can't teleport apples.
const MAX_DT: f32 = 0.1;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "apple_picker", about = "Catch the falling apples before they hit the ground")]
struct Cli {
    /// TOML file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "●  APPLE  PICKER  ●";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;

    if best_score > 0 {
        let best = format!("Best Score: {}", best_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best.chars().count() as u16 / 2),
            cy.saturating_sub(4),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best))?;
    }

    let legend: &[(&str, Color, &str)] = &[
        ("●", Color::Red, " Apple         — points per catch"),
        ("◆", Color::Yellow, " Golden apple  — rare, worth far more"),
        ("\\_/", Color::White, " Your basket  — every miss costs a life"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(20), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(20), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("ENTER / SPACE : Start   Q : Quit"))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(20), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Mouse or ← → / A D moves the basket"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Input thread died; nothing can start a game any more.
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Keyboard movement uses a `key_frame` map recording the frame of the last
/// press/repeat per key, so held keys keep moving the basket on terminals
/// without release events.  Mouse motion is turned into a column delta and
/// scaled into world units by the viewport.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let (width, height) = terminal::size()?;
    let mut view = Viewport::new(width, height, &state.config.world);
    let mut hud = Hud::default();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut last_mouse_col: Option<u16> = None;
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32().min(MAX_DT);
        last_frame = frame_start;
        frame += 1;

        let mut input = TickInput::default();
        let mut mouse_cols: i32 = 0;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(false);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if !state.session.is_active() =>
                            {
                                input.restart = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind: MouseEventKind::Moved | MouseEventKind::Drag(_), column, .. }) => {
                    if let Some(prev) = last_mouse_col {
                        mouse_cols += column as i32 - prev as i32;
                    }
                    last_mouse_col = Some(column);
                }
                Event::Resize(w, h) => {
                    view = Viewport::new(w, h, &state.config.world);
                }
                _ => {}
            }
        }

        // ── Turn held keys and mouse motion into a pointer delta ──────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        let key_step = state.config.basket.key_speed * dt;
        input.pointer_dx = view.cols_to_world(mouse_cols);
        if left {
            input.pointer_dx -= key_step;
        }
        if right {
            input.pointer_dx += key_step;
        }

        *state = tick(state, &input, dt, rng);
        hud.refresh(Some(&state.session));

        display::render(out, state, &hud, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    logging::init(cli.log_file.as_deref()).context("opening log file")?;
    info!("starting with {:?}", config);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut best_score = 0;

    loop {
        match show_menu(out, rx, best_score)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state(config.clone(), best_score, rng);
                let quit = game_loop(out, &mut state, rx, rng)?;
                best_score = state.session.best_score;
                info!("run ended with score {}, best {}", state.session.score, best_score);

                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
