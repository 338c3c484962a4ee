use std::time::{Duration, Instant};

/// Per-session numbers shown in the header
pub struct GameMetrics {
    started_at: Option<Instant>,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    /// `best_score` seeds the header from previously saved results
    pub fn new(best_score: u32) -> Self {
        Self {
            started_at: None,
            elapsed_time: Duration::ZERO,
            best_score,
            games_played: 0,
        }
    }

    /// Refresh the clock; it stands still between a game over and a restart
    pub fn update(&mut self) {
        if let Some(started_at) = self.started_at {
            self.elapsed_time = started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.started_at = None;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new(0)
    }
}
