use chrono::{DateTime, Duration, Utc};

/// Time elapsed since the last completed set, against a target rest.
///
/// Purely derived from timestamps; the display polls it. Nothing survives a
/// restart.
#[derive(Debug, Clone)]
pub struct RestTimer {
    target: Duration,
    last_set_at: Option<DateTime<Utc>>,
}

impl RestTimer {
    pub fn new(target_seconds: u64) -> Self {
        Self {
            target: clamp_seconds(target_seconds),
            last_set_at: None,
        }
    }

    /// Resume from a set completed earlier, e.g. one loaded from the server
    pub fn with_last_set(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.last_set_at = at;
        self
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn set_target(&mut self, seconds: u64) {
        self.target = clamp_seconds(seconds);
    }

    pub fn mark_set_completed(&mut self, now: DateTime<Utc>) {
        self.last_set_at = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_set_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_set_at.is_some()
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_set_at
            .map(|last| (now - last).max(Duration::zero()))
    }

    /// Rest left before the target is reached, zero once exceeded
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.elapsed(now)
            .map(|elapsed| (self.target - elapsed).max(Duration::zero()))
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now).map_or(false, |elapsed| elapsed > self.target)
    }

    /// Whole seconds rested, for the next set's `rest_seconds`
    pub fn rest_seconds(&self, now: DateTime<Utc>) -> Option<u32> {
        self.elapsed(now)
            .map(|elapsed| u32::try_from(elapsed.num_seconds()).unwrap_or(u32::MAX))
    }
}

// a day is far beyond any sensible rest
fn clamp_seconds(seconds: u64) -> Duration {
    Duration::seconds(seconds.min(86_400) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        "2024-05-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_idle_timer_reports_nothing() {
        let timer = RestTimer::new(90);
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(t0()), None);
        assert!(!timer.is_overdue(t0()));
    }

    #[test]
    fn test_elapsed_and_remaining() {
        let mut timer = RestTimer::new(90);
        timer.mark_set_completed(t0());

        let now = t0() + Duration::seconds(60);
        assert_eq!(timer.elapsed(now), Some(Duration::seconds(60)));
        assert_eq!(timer.remaining(now), Some(Duration::seconds(30)));
        assert_eq!(timer.rest_seconds(now), Some(60));
        assert!(!timer.is_overdue(now));

        let later = t0() + Duration::seconds(125);
        assert_eq!(timer.remaining(later), Some(Duration::zero()));
        assert!(timer.is_overdue(later));
    }

    #[test]
    fn test_clock_skew_never_goes_negative() {
        let timer = RestTimer::new(60).with_last_set(Some(t0()));
        assert_eq!(
            timer.elapsed(t0() - Duration::seconds(5)),
            Some(Duration::zero())
        );
    }

    #[test]
    fn test_new_set_restarts_timer() {
        let mut timer = RestTimer::new(60);
        timer.mark_set_completed(t0());
        timer.mark_set_completed(t0() + Duration::seconds(100));
        assert_eq!(
            timer.elapsed(t0() + Duration::seconds(110)),
            Some(Duration::seconds(10))
        );
        timer.reset();
        assert!(!timer.is_running());
    }
}
