use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior, interval_at, sleep_until};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState, Phase, TickOutcome};
use crate::input::{Command, InputHandler};
use crate::metrics::SessionStats;
use crate::render::{Flash, Renderer, SCORE_POP, START_FLASH, Scene, Skin};

/// What the driver should do with its tick timer after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerChange {
    Keep,
    /// Drop any pending tick and start a fresh period
    Restart,
    Stop,
}

/// Interactive game driven by the keyboard and a periodic tick
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    flash: Option<Flash>,
    score_pop_until: Option<Instant>,
    started: bool,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, skin: Skin) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            stats: SessionStats::new(Instant::now()),
            renderer: Renderer::new(skin),
            input_handler: InputHandler::new(),
            flash: None,
            score_pop_until: None,
            started: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = undo_on_err(enter_terminal(), restore_terminal)?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let period = self.engine.config().tick_period();
        let mut ticker: Option<Interval> = None;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.draw(terminal)?;

        loop {
            let redraw_at = self.redraw_deadline();

            let change = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event, Instant::now()),
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => {
                        self.should_quit = true;
                        TimerChange::Keep
                    }
                },

                _ = next_tick(&mut ticker) => self.on_tick(Instant::now()),

                _ = sleep_until(redraw_at.unwrap_or_else(Instant::now).into()),
                    if redraw_at.is_some() => {
                    self.expire_effects(Instant::now());
                    TimerChange::Keep
                }

                _ = &mut ctrl_c => {
                    self.should_quit = true;
                    TimerChange::Keep
                }
            };

            if self.should_quit {
                break;
            }

            match change {
                TimerChange::Keep => {}
                TimerChange::Restart => ticker = Some(fresh_interval(period)),
                TimerChange::Stop => ticker = None,
            }

            self.draw(terminal)?;
        }

        info!(
            games_played = self.stats.games_played,
            high_score = self.stats.high_score,
            "session ended"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> TimerChange {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let command = self.input_handler.handle_key_event(key);
                self.apply(command, now)
            }
            _ => TimerChange::Keep,
        }
    }

    /// Apply one command to the game; each arm is a single state change
    fn apply(&mut self, command: Command, now: Instant) -> TimerChange {
        if command == Command::Quit {
            self.should_quit = true;
            return TimerChange::Keep;
        }

        if !self.started {
            return match command {
                Command::Start | Command::Restart => self.start_game(now),
                _ => TimerChange::Keep,
            };
        }

        match command {
            Command::Steer(direction) => {
                if !self.state.steer(direction) {
                    debug!(?direction, current = ?self.state.direction, "turn ignored");
                }
                TimerChange::Keep
            }
            Command::TogglePause => {
                let before = self.state.phase;
                match self.state.toggle_pause() {
                    after if after == before => TimerChange::Keep,
                    Phase::Paused => {
                        self.stats.on_pause(now);
                        info!("paused");
                        TimerChange::Stop
                    }
                    _ => {
                        self.stats.on_resume(now);
                        info!("resumed");
                        TimerChange::Restart
                    }
                }
            }
            Command::Restart => self.start_game(now),
            Command::Start | Command::Quit | Command::None => TimerChange::Keep,
        }
    }

    fn on_tick(&mut self, now: Instant) -> TimerChange {
        let (next, outcome) = self.engine.tick(self.state.clone());
        self.state = next;
        self.stats.update(now);

        match outcome {
            TickOutcome::Moved => TimerChange::Keep,
            TickOutcome::Ate => {
                self.score_pop_until = Some(now + SCORE_POP);
                TimerChange::Keep
            }
            TickOutcome::Died(_) | TickOutcome::Won => {
                self.stats.on_game_over(self.state.score, now);
                TimerChange::Stop
            }
            TickOutcome::Idle(_) => TimerChange::Stop,
        }
    }

    fn start_game(&mut self, now: Instant) -> TimerChange {
        self.state = self.engine.reset();
        self.stats.on_game_start(now);
        self.flash = Some(Flash::new("Game started!", START_FLASH, now));
        self.score_pop_until = None;
        self.started = true;
        info!(skin = ?self.renderer.skin(), "game started");
        TimerChange::Restart
    }

    /// Earliest moment a timed effect runs out and the frame must change
    fn redraw_deadline(&self) -> Option<Instant> {
        let flash = self.flash.as_ref().map(Flash::until);
        match (flash, self.score_pop_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn expire_effects(&mut self, now: Instant) {
        if self.flash.as_ref().is_some_and(|f| !f.is_active(now)) {
            self.flash = None;
        }
        if self.score_pop_until.is_some_and(|until| now >= until) {
            self.score_pop_until = None;
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let now = Instant::now();
        self.stats.update(now);

        if !self.started {
            terminal
                .draw(|frame| self.renderer.render_title(frame))
                .context("Failed to draw frame")?;
            return Ok(());
        }

        let scene = Scene::capture(&self.state, self.flash.as_ref(), now)
            .with_score_pop(self.score_pop_until.is_some_and(|until| now < until));
        terminal
            .draw(|frame| self.renderer.render(frame, &scene, &self.stats))
            .context("Failed to draw frame")?;
        Ok(())
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

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best effort; the setup error is what gets reported
fn restore_terminal() {
    let _ = execute!(stderr(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run `undo` when `result` failed, then hand the result back
fn undo_on_err<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// First tick lands one full period from now
fn fresh_interval(period: Duration) -> Interval {
    let mut ticker = interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Resolves on the next tick, or never while the timer is stopped
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
