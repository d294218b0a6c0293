//! Autopilot mode for watching the pathfinding agent play
//!
//! Runs the same game loop as human mode, but each tick the next heading
//! comes from the A* pathfinder instead of the keyboard. Playback can be
//! paused and sped up; the session halts on game over until the viewer
//! restarts or quits.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart game
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::info;

use crate::agent::Pathfinder;
use crate::game::{GameConfig, GameEngine, GameState, Heading, Steering};
use crate::metrics::SessionStats;
use crate::render::{Hud, Renderer};

const HELP: &str = "Space to pause | 1-4 to change speed | R to restart | Q to quit";

/// Playback speed settings, relative to the configured tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl PlaybackSpeed {
    /// Tick interval at this speed, given the configured base interval.
    fn tick_interval(&self, base: Duration) -> Duration {
        match self {
            Self::Slow => base * 4,
            Self::Normal => base,
            Self::Fast => base / 2,
            Self::VeryFast => base / 6,
        }
    }
}

/// Autopilot mode: the pathfinder drives, the terminal watches.
pub struct AutopilotMode {
    engine: GameEngine,
    state: GameState,
    pilot: Pathfinder,
    stats: SessionStats,
    renderer: Renderer,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
    pending_heading: Option<Heading>,
}

impl AutopilotMode {
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let pilot = Pathfinder::new(engine.board());
        let state = engine.reset();
        // Plan the opening move from the starting layout.
        let pending_heading = Some(pilot.next_heading(&state.snake, state.food));

        Self {
            engine,
            state,
            pilot,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Normal,
            pending_heading,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            width = self.engine.board().width(),
            height = self.engine.board().height(),
            "starting autopilot session"
        );

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games = self.stats.games_played,
            high_score = self.stats.high_score,
            "autopilot session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.speed.tick_interval(self.base_interval()));

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.stats, &self.hud());
                    }).context("Failed to draw frame")?;
                }

                // Ctrl+C
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

    /// Run one tick with the buffered heading, then plan the next move from
    /// the state the tick just produced. Halts on game over; the board
    /// stays up until the viewer restarts or quits.
    fn advance_game(&mut self) {
        if !self.state.status.is_running() {
            return;
        }

        let steer = match self.pending_heading.take() {
            Some(heading) => Steering::Turn(heading),
            None => Steering::Hold,
        };

        let outcome = self.engine.tick(&mut self.state, steer);

        if outcome.game_over {
            self.stats.on_game_over(self.state.score);
            info!(
                score = self.state.score,
                ticks = self.state.ticks,
                high_score = self.stats.high_score,
                "autopilot game over"
            );
            return;
        }

        self.pending_heading = Some(self.pilot.next_heading(&self.state.snake, self.state.food));
    }

    /// Handle keyboard events
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.reset_game();
                }
                KeyCode::Char('1') => {
                    self.change_speed(PlaybackSpeed::Slow, tick_timer);
                }
                KeyCode::Char('2') => {
                    self.change_speed(PlaybackSpeed::Normal, tick_timer);
                }
                KeyCode::Char('3') => {
                    self.change_speed(PlaybackSpeed::Fast, tick_timer);
                }
                KeyCode::Char('4') => {
                    self.change_speed(PlaybackSpeed::VeryFast, tick_timer);
                }
                _ => {}
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.stats.on_game_start();
        self.pending_heading = Some(self.pilot.next_heading(&self.state.snake, self.state.food));
    }

    /// Swap in a fresh timer; tokio intervals cannot change period in place.
    fn change_speed(&mut self, new_speed: PlaybackSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        let period = self.speed.tick_interval(self.base_interval());
        *tick_timer = interval_at(Instant::now() + period, period);
    }

    fn base_interval(&self) -> Duration {
        Duration::from_millis(self.engine.config().tick_interval_ms)
    }

    fn hud(&self) -> Hud {
        Hud {
            mode: "Autopilot",
            help: HELP,
            paused: self.paused,
        }
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
