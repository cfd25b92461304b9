use std::time::{Duration, Instant};

use crate::game::Outcome;

/// Per-run statistics shown in the header
///
/// The clock runs while a session is in play and freezes when it ends, so
/// the game-over screen shows how long the chase lasted.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub running: bool,
    pub best_score: u32,
    pub wins: u32,
    pub catches: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            running: true,
            best_score: 0,
            wins: 0,
            catches: 0,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, outcome: Outcome, final_score: u32) {
        if !self.running {
            return;
        }
        self.update();
        self.running = false;

        match outcome {
            Outcome::Won => self.wins += 1,
            Outcome::Caught => self.catches += 1,
            Outcome::Ongoing => {}
        }
        self.best_score = self.best_score.max(final_score);
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.catches
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_outcome_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(Outcome::Caught, 10);
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.catches, 1);

        metrics.on_game_start();
        metrics.on_game_over(Outcome::Caught, 5);
        assert_eq!(metrics.best_score, 10); // Should not decrease

        metrics.on_game_start();
        metrics.on_game_over(Outcome::Won, 71);
        assert_eq!(metrics.best_score, 71);
        assert_eq!(metrics.wins, 1);
        assert_eq!(metrics.games_played(), 3);
    }

    #[test]
    fn test_game_over_counted_once() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(Outcome::Caught, 3);
        metrics.on_game_over(Outcome::Caught, 3);
        assert_eq!(metrics.games_played(), 1);
    }

    #[test]
    fn test_clock_freezes_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(Outcome::Won, 1);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
