use std::time::{Duration, Instant};

/// Counters that span games within one session.
///
/// The elapsed clock tracks the current game, not the session; it restarts
/// whenever a new game begins.
pub struct SessionStats {
    game_started_at: Instant,
    pub games_played: u32,
    pub high_score: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            game_started_at: Instant::now(),
            games_played: 0,
            high_score: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started_at = Instant::now();
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.game_started_at.elapsed()
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
