use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

use crate::game::{GameEngine, GameState, Phase, TickScheduler};
use crate::input::{InputHandler, KeyAction, PromptKey};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, ScreenView};
use crate::scores::{ScoreRecord, ScoreStore};

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const ZERO_SCORE_NOTICE: &str = "You can't save a score of 0!";
const MAX_NAME_CHARS: usize = 24;

/// Dialog that takes every key until it closes. The game is paused meanwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    NamePrompt {
        name: String,
        score: u32,
        /// The default name is replaced by the first typed character
        edited: bool,
    },
    ConfirmClear,
    Notice(String),
}

pub struct HumanMode {
    engine: GameEngine,
    state: Option<GameState>,
    scheduler: TickScheduler,
    scores: ScoreStore,
    scores_visible: bool,
    modal: Option<Modal>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, scores: ScoreStore) -> Self {
        let scheduler = TickScheduler::new(engine.config().tick_interval());
        let metrics = GameMetrics::new(scores.best_score());

        Self {
            engine,
            state: None,
            scheduler,
            scores,
            scores_visible: false,
            modal: None,
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        self.start_game();

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

        // The header clock only needs whole seconds
        let mut clock = interval(Duration::from_secs(1));

        self.draw(terminal)?;

        loop {
            let redraw = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => {
                        self.should_quit = true;
                        false
                    }
                },

                _ = self.scheduler.next_tick() => self.update_game(),

                _ = clock.tick() => {
                    self.metrics.update();
                    true
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                    false
                }
            };

            if self.should_quit {
                break;
            }

            if redraw {
                self.draw(terminal)?;
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, &self.view()))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn view(&self) -> ScreenView<'_> {
        ScreenView {
            state: self.state.as_ref(),
            metrics: &self.metrics,
            scores: self.scores_visible.then(|| self.scores.records()),
            modal: self.modal.as_ref(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.as_ref().map_or(Phase::NotStarted, |state| state.phase)
    }

    /// Returns true when the screen needs repainting
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
                true
            }
            Event::Resize(..) => true,
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(modal) = self.modal.take() {
            self.handle_modal_key(modal, key);
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if let Some(state) = self.state.as_mut() {
                    state.set_direction(direction);
                }
            }
            KeyAction::Restart => self.start_game(),
            KeyAction::SaveScore => self.save_score(),
            KeyAction::ViewScores => self.view_scores(),
            KeyAction::ClearScores => self.modal = Some(Modal::ConfirmClear),
            KeyAction::CloseScores => self.scores_visible = false,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Swallowed | KeyAction::None => {}
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent) {
        match modal {
            Modal::NamePrompt {
                mut name,
                score,
                mut edited,
            } => {
                match self.input_handler.handle_prompt_key(key) {
                    PromptKey::Submit => {
                        self.submit_name(&name, score);
                        return;
                    }
                    PromptKey::Cancel => return,
                    PromptKey::Insert(c) => {
                        if !edited {
                            name.clear();
                            edited = true;
                        }
                        if name.chars().count() < MAX_NAME_CHARS {
                            name.push(c);
                        }
                    }
                    PromptKey::Backspace => {
                        edited = true;
                        name.pop();
                    }
                    PromptKey::Ignore => {}
                }
                self.modal = Some(Modal::NamePrompt {
                    name,
                    score,
                    edited,
                });
            }
            Modal::ConfirmClear => match self.input_handler.handle_confirm_key(key) {
                Some(true) => self.clear_scores(),
                Some(false) => {}
                None => self.modal = Some(Modal::ConfirmClear),
            },
            // Any key dismisses a notice
            Modal::Notice(_) => {}
        }
    }

    /// Build a fresh game and rearm the timer, dropping any previous one
    fn start_game(&mut self) {
        self.state = Some(self.engine.init());
        self.scheduler.start();
        self.scores_visible = false;
        self.metrics.on_game_start();
    }

    /// Returns true when the tick changed the game
    fn update_game(&mut self) -> bool {
        if self.modal.is_some() {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if !state.is_running() {
            return false;
        }

        let outcome = self.engine.tick(state);

        if outcome.terminated() {
            self.scheduler.cancel();
            self.metrics.on_game_over(state.score);
        }

        true
    }

    fn current_score(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.score)
    }

    fn save_score(&mut self) {
        let score = self.current_score();
        if score == 0 {
            self.modal = Some(Modal::Notice(ZERO_SCORE_NOTICE.to_string()));
            return;
        }

        self.modal = Some(Modal::NamePrompt {
            name: DEFAULT_PLAYER_NAME.to_string(),
            score,
            edited: false,
        });
    }

    fn submit_name(&mut self, name: &str, score: u32) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let notice = match self.scores.append(ScoreRecord::today(name, score)) {
            Ok(()) => format!("Score of {} saved for {}!", score, name),
            Err(err) => {
                error!(error = %format!("{:#}", err), "failed to save score");
                format!("Could not save score: {}", err)
            }
        };
        self.modal = Some(Modal::Notice(notice));
    }

    fn view_scores(&mut self) {
        self.scores.sort_for_display();
        self.scores_visible = true;
    }

    fn clear_scores(&mut self) {
        if let Err(err) = self.scores.clear() {
            error!(error = %format!("{:#}", err), "failed to clear scores");
            self.modal = Some(Modal::Notice(format!("Could not clear scores: {}", err)));
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
        info!(games = self.metrics.games_played, "session ended");
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    restore_on_error(enter_screen(), || {
        if let Err(err) = execute!(stderr(), LeaveAlternateScreen) {
            error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
    })
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Runs `restore` only when `result` failed, then hands the result back
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}
