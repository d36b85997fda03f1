use std::time::{Duration, Instant};

/// Stats kept across restarts for the lifetime of the process
pub struct SessionStats {
    started: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new(now: Instant) -> Self {
        Self {
            started: now,
            paused_at: None,
            paused_total: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the game clock; time spent paused does not count
    pub fn update(&mut self, now: Instant) {
        let paused_now = self
            .paused_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default();
        self.elapsed_time = now
            .saturating_duration_since(self.started)
            .saturating_sub(self.paused_total + paused_now);
    }

    pub fn on_game_start(&mut self, now: Instant) {
        self.started = now;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self, now: Instant) {
        self.update(now);
        self.paused_at.get_or_insert(now);
    }

    pub fn on_resume(&mut self, now: Instant) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(at);
        }
        self.update(now);
    }

    /// Freeze the clock at `now` and record the final score
    pub fn on_game_over(&mut self, final_score: u32, now: Instant) {
        self.update(now);
        self.paused_at = Some(now);
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new(Instant::now());
        stats.elapsed_time = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.elapsed_time = Duration::ZERO;
        assert_eq!(stats.format_time(), "00:00");

        stats.elapsed_time = Duration::from_secs(3661);
        assert_eq!(stats.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let now = Instant::now();
        let mut stats = SessionStats::new(now);

        stats.on_game_over(10, now);
        assert_eq!(stats.high_score, 10);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(5, now);
        assert_eq!(stats.high_score, 10);
        assert_eq!(stats.games_played, 2);

        stats.on_game_over(15, now);
        assert_eq!(stats.high_score, 15);
        assert_eq!(stats.games_played, 3);
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let t0 = Instant::now();
        let mut stats = SessionStats::new(t0);

        stats.on_pause(t0 + 10 * SEC);
        stats.update(t0 + 25 * SEC);
        assert_eq!(stats.elapsed_time, 10 * SEC);

        stats.on_resume(t0 + 30 * SEC);
        stats.update(t0 + 35 * SEC);
        assert_eq!(stats.elapsed_time, 15 * SEC);
    }

    #[test]
    fn test_game_over_freezes_and_start_resets() {
        let t0 = Instant::now();
        let mut stats = SessionStats::new(t0);

        stats.on_game_over(3, t0 + 20 * SEC);
        stats.update(t0 + 60 * SEC);
        assert_eq!(stats.elapsed_time, 20 * SEC);

        stats.on_game_start(t0 + 61 * SEC);
        stats.update(t0 + 62 * SEC);
        assert_eq!(stats.elapsed_time, SEC);
        assert_eq!(stats.high_score, 3);
    }
}
