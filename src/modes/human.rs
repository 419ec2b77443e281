use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven play in the terminal.
///
/// Timer ticks, key presses and frames are all handled on one task, so the
/// engine never sees concurrent calls.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.init();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;

        info!(
            "starting on a {}x{} grid, tick every {:?}",
            self.state.grid_width,
            self.state.grid_height,
            self.engine.config().tick_interval()
        );

        let result = self.run_in_terminal().await;
        let cleanup = guard.restore();

        info!(
            "leaving after {} games, best score {}",
            self.metrics.games_played, self.metrics.best_score
        );

        first_error(result, cleanup)
    }

    async fn run_in_terminal(&mut self) -> Result<()> {
        let backend = CrosstermBackend::new(stderr());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.run_game_loop(&mut terminal).await
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.state.phase);
                    let snapshot = self.state.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.engine.set_direction(&mut self.state, direction);
                }
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        self.engine.tick(&mut self.state);
        self.metrics.observe(self.state.phase, self.state.score);
    }

    fn reset_game(&mut self) {
        self.engine.reset(&mut self.state);
        self.metrics.on_game_start();
    }
}

/// Keeps raw mode and the alternate screen for its lifetime.
///
/// Dropping it restores the terminal, so early returns and panics
/// leave the shell usable.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self { active: true };
        execute!(stderr(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(guard)
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore_terminal(&mut stderr(), disable_raw_mode)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("terminal restore failed: {err:#}");
        }
    }
}

/// Run every teardown step even when an earlier one fails; report the first failure
fn restore_terminal<W, F>(out: &mut W, disable_raw: F) -> Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let raw = disable_raw().context("Failed to disable raw mode");
    let screen = execute!(out, LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

/// The game loop's own error wins over a teardown error
fn first_error(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Err(err), Err(cleanup_err)) => {
            warn!("terminal cleanup also failed: {cleanup_err:#}");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), cleanup) => cleanup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn seeded() -> GameConfig {
        GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(seeded());
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_key_press_turns_snake() {
        let mut mode = HumanMode::new(seeded());

        mode.handle_event(key(KeyCode::Char('s'), KeyEventKind::Press));
        assert_eq!(mode.state.direction, Direction::Down);

        // Reversal is ignored by the engine
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press));
        assert_eq!(mode.state.direction, Direction::Down);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = HumanMode::new(seeded());

        mode.handle_event(key(KeyCode::Up, KeyEventKind::Release));
        assert_eq!(mode.state.direction, Direction::Right);

        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Release));
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(seeded());
        mode.handle_event(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = HumanMode::new(seeded());
        mode.state.score = 10;
        mode.state.phase = Phase::GameOver;

        mode.handle_event(key(KeyCode::Char('r'), KeyEventKind::Press));

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
    }

    #[test]
    fn test_round_end_is_recorded() {
        let mut mode = HumanMode::new(seeded());
        mode.engine.set_direction(&mut mode.state, Direction::Up);

        // Straight up from y=5 leaves the grid on the sixth tick
        for _ in 0..6 {
            mode.update_game();
        }

        assert_eq!(mode.state.phase, Phase::GameOver);
        assert_eq!(mode.metrics.games_played, 1);

        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_restore_leaves_screen_when_raw_mode_fails() {
        let mut out = Vec::new();

        let result = restore_terminal(&mut out, || Err(io::Error::other("no tty")));

        assert!(result.is_err());
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_restore_succeeds() {
        let mut out = Vec::new();
        assert!(restore_terminal(&mut out, || Ok(())).is_ok());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_loop_error_reported_before_cleanup_error() {
        let result = first_error(
            Err(anyhow::anyhow!("draw failed")),
            Err(anyhow::anyhow!("restore failed")),
        );
        assert_eq!(result.unwrap_err().to_string(), "draw failed");

        let result = first_error(Ok(()), Err(anyhow::anyhow!("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_restored_guard_is_inert() {
        let mut guard = TerminalGuard { active: false };
        assert!(guard.restore().is_ok());
    }
}
