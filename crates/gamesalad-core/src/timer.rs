//! Play-time tracking driven by host timestamps.

/// State of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Stopwatch measuring time spent on a level.
///
/// All methods take the current time in milliseconds from the host clock,
/// so the timer works the same under a terminal `Instant` and a browser
/// `performance.now()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTimer {
    state: TimerState,
    /// Time accumulated before the current running stretch
    banked_ms: u64,
    /// When the current running stretch began
    resumed_at: u64,
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            banked_ms: 0,
            resumed_at: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    /// Start counting, keeping any time already elapsed
    pub fn start(&mut self, now_ms: u64) {
        if self.state != TimerState::Running {
            self.resumed_at = now_ms;
            self.state = TimerState::Running;
        }
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.state == TimerState::Running {
            self.banked_ms += now_ms.saturating_sub(self.resumed_at);
            self.state = TimerState::Paused;
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if self.state == TimerState::Paused {
            self.start(now_ms);
        }
    }

    /// Stop counting and keep the elapsed time, e.g. once a level is solved
    pub fn stop(&mut self, now_ms: u64) {
        self.pause(now_ms);
        self.state = TimerState::Stopped;
    }

    /// Stop and zero the timer
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            TimerState::Running => self.banked_ms + now_ms.saturating_sub(self.resumed_at),
            TimerState::Stopped | TimerState::Paused => self.banked_ms,
        }
    }

    /// Elapsed time as `MM:SS`
    pub fn time_string(&self, now_ms: u64) -> String {
        format_time(self.elapsed_ms(now_ms))
    }
}

/// Format milliseconds as `MM:SS`
pub fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_and_pauses() {
        let mut timer = GameTimer::new();
        assert_eq!(timer.elapsed_ms(5_000), 0);
        timer.start(1_000);
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_ms(3_500), 2_500);

        timer.pause(4_000);
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed_ms(60_000), 3_000);

        timer.resume(10_000);
        assert_eq!(timer.elapsed_ms(11_000), 4_000);
    }

    #[test]
    fn test_double_start_keeps_origin() {
        let mut timer = GameTimer::new();
        timer.start(0);
        timer.start(5_000);
        assert_eq!(timer.elapsed_ms(6_000), 6_000);
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut timer = GameTimer::new();
        timer.resume(100);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let mut timer = GameTimer::new();
        timer.start(0);
        timer.stop(42_000);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.elapsed_ms(99_000), 42_000);
        assert_eq!(timer.time_string(99_000), "00:42");
    }

    #[test]
    fn test_reset() {
        let mut timer = GameTimer::new();
        timer.start(0);
        timer.pause(9_000);
        timer.reset();
        assert_eq!(timer.elapsed_ms(20_000), 0);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59_999), "00:59");
        assert_eq!(format_time(61_000), "01:01");
        assert_eq!(format_time(3_600_000), "60:00");
    }
}
