use std::time::{Duration, Instant};

use crate::game::Phase;

/// Session bookkeeping shown next to the board. Nothing here is persisted.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    last_phase: Phase,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            last_phase: Phase::Running,
        }
    }

    /// Refresh the clock; it stops once the round is over
    pub fn update(&mut self, phase: Phase) {
        if phase == Phase::Running {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    /// Record a phase change. Returns true when a round has just ended.
    pub fn observe(&mut self, phase: Phase, score: u32) -> bool {
        let ended = self.last_phase == Phase::Running && phase == Phase::GameOver;
        if ended {
            self.on_game_over(score);
        }
        self.last_phase = phase;
        ended
    }

    pub fn on_game_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_phase = Phase::Running;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Round time as `m:ss`
    pub fn clock(&self) -> String {
        let secs = self.elapsed_time.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
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

    /// Metrics whose round began `secs` seconds ago, if the monotonic clock allows it
    fn started_ago(secs: u64) -> Option<GameMetrics> {
        let mut metrics = GameMetrics::new();
        metrics.round_start = Instant::now().checked_sub(Duration::from_secs(secs))?;
        Some(metrics)
    }

    #[test]
    fn test_clock_runs_while_running() {
        let Some(mut metrics) = started_ago(65) else {
            return;
        };

        metrics.update(Phase::Running);
        assert_eq!(metrics.clock(), "1:05");
    }

    #[test]
    fn test_clock_freezes_at_game_over() {
        let Some(mut metrics) = started_ago(3) else {
            return;
        };
        metrics.update(Phase::Running);
        metrics.observe(Phase::GameOver, 2);

        let Some(earlier) = metrics.round_start.checked_sub(Duration::from_secs(600)) else {
            return;
        };
        metrics.round_start = earlier;
        metrics.update(Phase::GameOver);

        assert_eq!(metrics.clock(), "0:03");
    }

    #[test]
    fn test_clock_restarts_with_new_round() {
        let Some(mut metrics) = started_ago(125) else {
            return;
        };
        metrics.update(Phase::Running);
        assert_eq!(metrics.clock(), "2:05");

        metrics.on_game_start();
        assert_eq!(metrics.clock(), "0:00");

        metrics.update(Phase::Running);
        assert!(metrics.elapsed_time < Duration::from_secs(1));
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        for (score, best) in [(10, 10), (5, 10), (15, 15)] {
            metrics.observe(Phase::Running, 0);
            metrics.observe(Phase::GameOver, score);
            assert_eq!(metrics.best_score, best);
        }
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_observe_counts_each_round_once() {
        let mut metrics = GameMetrics::new();

        assert!(!metrics.observe(Phase::Running, 0));
        assert!(metrics.observe(Phase::GameOver, 3));
        assert!(!metrics.observe(Phase::GameOver, 3));
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.best_score, 3);

        metrics.on_game_start();
        assert!(metrics.observe(Phase::GameOver, 1));
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.best_score, 3);
    }
}
