use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;

use tracing::warn;

use lifegrid::config::Config;
use lifegrid::events::Command;
use lifegrid::events::InputEvent;
use lifegrid::events::Key;
use lifegrid::game::Game;
use lifegrid::io::convert_event;
use lifegrid::pattern::Pattern;
use lifegrid::pattern::PatternKind;
use lifegrid::render;

/// Rows reserved for the stats bar at the bottom of the screen.
const STATUS_ROWS: u16 = 1;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the alternate screen stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let patterns = load_patterns(Path::new("patterns"));

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;

    // One terminal character is one screen pixel here, so start at the
    // closest zoom where a cell is a single glyph.
    let cfg = Config {
        cell_w: 1,
        cell_h: 1,
        screen_w: cols.max(1) as i64,
        screen_h: rows.saturating_sub(STATUS_ROWS).max(1) as i64,
        tick_rate: 10,
        ..Config::default()
    };

    let mut game = Game::new(&cfg).context("Failed to set up the game")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut game, &patterns, &mut stdout, cfg.tick_rate);

    execute!(
        stdout,
        cursor::Show,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(
    game: &mut Game,
    patterns: &[Pattern],
    out: &mut io::Stdout,
    tick_rate: u32,
) -> anyhow::Result<()> {
    let frame = Duration::from_millis(1000 / tick_rate.max(1) as u64);

    loop {
        let deadline = Instant::now() + frame;

        // Input phase: consume events until the frame budget runs out.
        // The poll timeout doubles as the fixed-rate clock.
        loop {
            let budget = deadline.saturating_duration_since(Instant::now());
            if budget.is_zero() || !event::poll(budget)? {
                break;
            }

            let Some(ev) = convert_event(event::read()?) else {
                continue;
            };

            match ev {
                // Digit keys arm a catalog pattern.
                InputEvent::Key(Key::Char(c)) if c.is_ascii_digit() => {
                    let Some(i) = c.to_digit(10).and_then(|n| (n as usize).checked_sub(1)) else {
                        continue;
                    };

                    if let Some(pattern) = patterns.get(i) {
                        game.push(Command::SelectPattern(pattern.clone()));
                    }
                }

                // Keep the stats bar out of the camera's screen.
                InputEvent::Resize { width, height } => game.handle_input(InputEvent::Resize {
                    width,
                    height: (height - STATUS_ROWS as i32).max(1),
                }),

                ev => game.handle_input(ev),
            }
        }

        game.frame();

        if game.should_exit() {
            return Ok(());
        }

        draw(game, out)?;
    }
}

fn draw(game: &Game, out: &mut io::Stdout) -> anyhow::Result<()> {
    let text = render::render_text(game.universe(), game.camera());

    execute!(out, terminal::Clear(terminal::ClearType::All))?;

    for (i, line) in text.lines().enumerate() {
        execute!(out, cursor::MoveTo(0, i as u16), style::Print(line))?;
    }

    let stats = game.engine().stats();
    let mut status = format!(
        "Generation: {}  Alive: {}  Births: {}  Deaths: {}  Zoom: {}px",
        game.engine().generation(),
        stats.alive,
        stats.births,
        stats.deaths,
        game.camera().cell_size().0,
    );

    if let Some(pattern) = game.pattern() {
        status.push_str(&format!("  Pattern: {}", pattern.name()));
    }

    let (_, rows) = terminal::size()?;
    execute!(
        out,
        cursor::MoveTo(0, rows.saturating_sub(STATUS_ROWS)),
        style::Print(status)
    )?;

    Ok(())
}

/// Load the pattern catalog from `<root>/<kind>/<name>`.
///
/// Unreadable or empty entries are skipped and logged, never fatal. The
/// catalog is sorted by name so the digit key bindings stay stable.
fn load_patterns(root: &Path) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    let Ok(kinds) = fs::read_dir(root) else {
        warn!(root = %root.display(), "no pattern catalog found");
        return patterns;
    };

    for entry in kinds.flatten() {
        let Some(kind) = entry.file_name().to_str().and_then(PatternKind::from_dir) else {
            continue;
        };

        let Ok(files) = fs::read_dir(entry.path()) else {
            continue;
        };

        for file in files.flatten() {
            let path = file.path();
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("pattern")
                .to_string();

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    warn!(%err, path = %path.display(), "failed to read pattern");
                    continue;
                }
            };

            match Pattern::from_text(&name, kind, &text) {
                Ok(pattern) => patterns.push(pattern),
                Err(err) => warn!(%err, path = %path.display(), "skipping pattern"),
            }
        }
    }

    patterns.sort_by(|a, b| a.name().cmp(b.name()));

    patterns
}
