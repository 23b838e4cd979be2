//! Event configuration

/// Event behaviour knobs
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Lowest score a judge may award
    pub min_score: i32,
    /// Highest score a judge may award
    pub max_score: i32,
    /// Team size used when an event does not set one
    pub default_team_size: i32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_score: 100,
            default_team_size: 1,
        }
    }
}

impl EventConfig {
    pub fn with_score_range(mut self, min: i32, max: i32) -> Self {
        self.min_score = min;
        self.max_score = max;
        self
    }

    pub fn score_in_range(&self, points: i32) -> bool {
        (self.min_score..=self.max_score).contains(&points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_score_bounds_are_inclusive() {
        let config = EventConfig::default();
        assert!(config.score_in_range(0));
        assert!(config.score_in_range(100));
        assert!(!config.score_in_range(-1));
        assert!(!config.score_in_range(101));
    }

    #[test]
    fn test_custom_score_range() {
        let config = EventConfig::default().with_score_range(1, 10);
        assert!(!config.score_in_range(0));
        assert!(config.score_in_range(10));
    }
}
