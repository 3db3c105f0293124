//! termfolio terminal entry point.
//!
//! Draws a fake terminal window over an animated background and forwards
//! key, mouse and resize events to the session. Ctrl-C or Ctrl-D quits.

mod input;
mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use futures::executor::block_on;
use termfolio_terminal::background::{BackgroundGrid, standard_messages};
use termfolio_terminal::controller::{InputController, InputResult};
use termfolio_terminal::secret::Secret;
use termfolio_types::build_info::BuildInfo;
use termfolio_types::config::TermfolioConfig;
use termfolio_types::input::InputEvent;

fn main() -> Result<()> {
    // Resolve config from CLI arg, TERMFOLIO_CONFIG env var, or defaults.
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMFOLIO_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => TermfolioConfig::load(path)?,
        None => TermfolioConfig::default(),
    };

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(&config)),
    );
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    match &config_path {
        Some(path) => log::info!("Starting termfolio with config {}", path.display()),
        None => log::info!("Starting termfolio with built-in config"),
    }

    let mut rng = rand::thread_rng();
    let secret = Secret::generate(&mut rng);

    let mut controller = InputController::from_config(&config, &secret);

    let (cols, rows) = crossterm::terminal::size().context("query terminal size")?;
    log::info!("Terminal size {cols}x{rows}");
    let mut background = config.background.enabled.then(|| {
        let messages = standard_messages(&config.profile, &BuildInfo::current(), &secret);
        BackgroundGrid::new(
            usize::from(cols),
            usize::from(rows),
            messages,
            config.background.reveal_hidden,
            &mut rng,
        )
    });

    let guard = TerminalGuard::enter()?;
    let title = config.window_title();
    let tick = Duration::from_millis(config.frame_ms.max(1));
    let start = Instant::now();
    let (mut cols, mut rows) = (cols, rows);
    let mut stdout = io::stdout();

    loop {
        let now_ms = elapsed_ms(start);
        if let Some(grid) = background.as_mut() {
            grid.frame(now_ms, &mut rng);
        }
        render::draw(&mut stdout, &render::View {
            cols,
            rows,
            background: background.as_ref(),
            controller: &controller,
            prompt: &config.prompt,
            title: &title,
            now_ms,
        })?;

        if !event::poll(tick)? {
            continue;
        }
        let Some(ev) = input::translate(&event::read()?) else {
            continue;
        };
        match ev {
            InputEvent::PointerMove { col, row } => {
                if let Some(grid) = background.as_mut() {
                    grid.pointer_moved(usize::from(col), usize::from(row), elapsed_ms(start));
                }
            },
            InputEvent::Resize {
                cols: new_cols,
                rows: new_rows,
            } => {
                cols = new_cols;
                rows = new_rows;
                log::debug!("Resized to {cols}x{rows}");
                if let Some(grid) = background.as_mut() {
                    grid.resize(usize::from(cols), usize::from(rows), &mut rng);
                }
            },
            _ => {},
        }
        if block_on(controller.handle_event(&ev)) == InputResult::Quit {
            break;
        }
    }

    drop(guard);
    log::info!(
        "Exiting after {} commands",
        controller.history().command_count()
    );
    Ok(())
}

/// Logging stays off unless it has a file to go to, since stderr is the
/// screen the UI draws on. `RUST_LOG` still overrides this.
fn default_log_filter(config: &TermfolioConfig) -> &'static str {
    if config.log_file.is_some() { "warn" } else { "off" }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(
            self.stdout,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        ) {
            log::warn!("Failed to restore screen: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_off_without_log_file() {
        assert_eq!(default_log_filter(&TermfolioConfig::default()), "off");
    }

    #[test]
    fn logging_warn_with_log_file() {
        let config = TermfolioConfig {
            log_file: Some(PathBuf::from("termfolio.log")),
            ..TermfolioConfig::default()
        };
        assert_eq!(default_log_filter(&config), "warn");
    }
}
