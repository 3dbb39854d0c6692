use std::time::{Duration, Instant};

/// Shortest quiet period a combobox may be configured with
pub const MIN_DELAY: Duration = Duration::from_millis(300);
/// Longest quiet period a combobox may be configured with
pub const MAX_DELAY: Duration = Duration::from_millis(500);

/// A single-shot timer owned by one component instance.
///
/// `arm` (re)starts the quiet period and replaces the pending payload;
/// `take_due` hands the payload back once the deadline has passed. Nothing
/// fires on its own: the owner polls from its event loop, so cancelling is
/// just forgetting the pending entry.
#[derive(Debug, Clone)]
pub struct Debouncer<P> {
    delay: Duration,
    pending: Option<(Instant, P)>,
}

impl<P> Debouncer<P> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay: delay.clamp(MIN_DELAY, MAX_DELAY),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `payload` for `now + delay`, dropping whatever was pending.
    pub fn arm(&mut self, now: Instant, payload: P) {
        self.pending = Some((now + self.delay, payload));
    }

    /// Forget the pending payload, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Return the payload if its quiet period has elapsed by `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<P> {
        match &self.pending {
            Some((at, _)) if now >= *at => self.pending.take().map(|(_, p)| p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_delay_is_clamped() {
        assert_eq!(Debouncer::<()>::new(ms(50)).delay(), MIN_DELAY);
        assert_eq!(Debouncer::<()>::new(ms(2000)).delay(), MAX_DELAY);
        assert_eq!(Debouncer::<()>::new(ms(400)).delay(), ms(400));
    }

    #[test]
    fn test_fires_only_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.arm(t0, "a");
        assert_eq!(d.take_due(t0 + ms(299)), None);
        assert_eq!(d.take_due(t0 + ms(300)), Some("a"));
        // Single shot
        assert_eq!(d.take_due(t0 + ms(900)), None);
        assert!(!d.is_armed());
    }

    #[test]
    fn test_rearm_pushes_deadline_and_replaces_payload() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.arm(t0, "a");
        d.arm(t0 + ms(100), "ab");
        d.arm(t0 + ms(200), "abc");
        assert_eq!(d.take_due(t0 + ms(400)), None);
        assert_eq!(d.deadline(), Some(t0 + ms(500)));
        assert_eq!(d.take_due(t0 + ms(500)), Some("abc"));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.arm(t0, 1);
        d.cancel();
        assert_eq!(d.take_due(t0 + ms(1000)), None);
        assert_eq!(d.deadline(), None);
    }
}
