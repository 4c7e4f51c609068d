use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{GameConfig, GameEngine, GameState, TickInput};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending: TickInput,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.wall_inset, config.tick_rate);
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            pending: TickInput::none(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(tick_rate = self.engine.config().tick_rate, "session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation tick per rendered frame
        let rate = u64::from(self.engine.config().tick_rate.max(1));
        let mut frame_timer = interval(Duration::from_micros(1_000_000 / rate));
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Collect key presses for the next tick
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Tick, then draw what the tick produced
                _ = frame_timer.tick() => {
                    self.update_game();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
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
            // Only process key press events, not release or repeat
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Quit => self.should_quit = true,
                action => action.apply_to(&mut self.pending),
            }
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.tick(&mut self.state, &self.pending);
        self.pending.clear();
        self.metrics.record(&result, &self.state);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(!mode.state.is_game_over());
        assert_eq!(mode.state.score, 0);
        assert!(mode.pending.is_empty());
    }

    #[test]
    fn test_presses_are_consumed_by_one_tick() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Right));
        assert_eq!(mode.pending, TickInput::steer(crate::game::Direction::Right));

        mode.update_game();
        assert!(mode.pending.is_empty());
        assert_eq!(mode.state.snake.velocity, (31, 0));
        assert_eq!(mode.state.ticks, 1);
    }

    #[test]
    fn test_pause_and_quit_keys() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Char('p')));
        mode.update_game();
        assert!(mode.state.is_paused());

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_confirm_restarts_after_game_over() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.state.phase = crate::game::Phase::GameOver;

        mode.handle_event(key(KeyCode::Enter));
        mode.update_game();

        assert_eq!(mode.state.score, 0);
        assert!(!mode.state.is_game_over());
    }
}
