use crate::game::{GameState, TickResult};

/// Statistics kept across restarts within one process; nothing is saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetrics {
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub best_length: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's outcome into the running totals
    pub fn record(&mut self, result: &TickResult, state: &GameState) {
        self.food_eaten += result.eaten.len() as u32;
        self.best_length = self.best_length.max(state.snake.len());

        if result.collision.is_some() {
            self.on_game_over(state.score);
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Format whole seconds as MM:SS
    pub fn format_time(total_secs: u64) -> String {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, FoodKind, GameConfig, GameEngine};

    #[test]
    fn test_time_formatting() {
        assert_eq!(GameMetrics::format_time(125), "02:05");
        assert_eq!(GameMetrics::format_time(0), "00:00");
        assert_eq!(GameMetrics::format_time(3661), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_record_tick_results() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 5);
        let mut state = engine.reset();
        let mut metrics = GameMetrics::new();

        let eat = TickResult {
            eaten: vec![FoodKind::Regular, FoodKind::Bonus],
            ..TickResult::default()
        };
        metrics.record(&eat, &state);
        assert_eq!(metrics.food_eaten, 2);
        assert_eq!(metrics.best_length, 1);
        assert_eq!(metrics.games_played, 0);

        state.score = 4;
        let death = TickResult {
            collision: Some(CollisionType::Wall),
            ..TickResult::default()
        };
        metrics.record(&death, &state);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.high_score, 4);
    }
}
