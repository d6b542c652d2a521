//! Rate limiting for scroll and resize handlers.
//!
//! Both types are clock-agnostic: callers pass the current time in
//! milliseconds, which keeps them usable from browser timers and from tests.

/// Leading-edge throttle. The first call in a window fires; the rest of the
/// window is dropped and never replayed. A clock that steps backwards opens a
/// new window instead of stalling until it catches up.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_fired: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            last_fired: None,
        }
    }

    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        let open = match self.last_fired {
            Some(last) => now_ms < last || now_ms - last >= self.interval_ms,
            None => true,
        };

        if open {
            self.last_fired = Some(now_ms);
        }
        open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Trailing-edge debounce. Each call supersedes the previous one; only the
/// newest ticket may fire, and only once.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay_ms: f64,
    generation: u64,
    pending: Option<(Ticket, f64)>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: f64::from(delay_ms),
            generation: 0,
            pending: None,
        }
    }

    pub fn call(&mut self, now_ms: f64) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some((ticket, now_ms + self.delay_ms));
        ticket
    }

    /// Claims the pending invocation if `ticket` is still the newest one.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending {
            Some((pending, _)) if pending == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Ticket whose quiet period has fully elapsed at `now_ms`, if any.
    pub fn due(&self, now_ms: f64) -> Option<Ticket> {
        self.pending
            .filter(|(_, deadline)| now_ms >= *deadline)
            .map(|(ticket, _)| ticket)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_fires_once_per_window() {
        let mut throttle = Throttle::new(16);
        let fired = (0..10)
            .map(|i| throttle.try_fire(f64::from(i)))
            .filter(|fired| *fired)
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn throttle_first_call_is_immediate_and_window_reopens() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.try_fire(1_000.0));
        assert!(!throttle.try_fire(1_015.9));
        assert!(throttle.try_fire(1_016.0));
        assert!(!throttle.try_fire(1_020.0));
    }

    #[test]
    fn throttle_recovers_when_clock_steps_back() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.try_fire(50_000.0));
        assert!(throttle.try_fire(1_000.0));
        assert!(!throttle.try_fire(1_010.0));
        assert!(throttle.try_fire(1_016.0));
    }

    #[test]
    fn debounce_fires_once_after_quiet_period_from_last_call() {
        let mut debounce = Debounce::new(250);
        let mut fired_at = Vec::new();
        let calls = [0.0, 50.0, 120.0, 200.0];

        let mut now = 0.0;
        while now <= 1_000.0 {
            if calls.contains(&now) {
                debounce.call(now);
            }
            if let Some(ticket) = debounce.due(now) {
                if debounce.fire(ticket) {
                    fired_at.push(now);
                }
            }
            now += 10.0;
        }

        assert_eq!(fired_at, vec![450.0]);
    }

    #[test]
    fn superseded_ticket_cannot_fire() {
        let mut debounce = Debounce::new(250);
        let first = debounce.call(0.0);
        let second = debounce.call(10.0);

        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
        assert!(!debounce.fire(second));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn cancel_drops_pending_call() {
        let mut debounce = Debounce::new(250);
        let ticket = debounce.call(0.0);
        debounce.cancel();
        assert_eq!(debounce.due(1_000.0), None);
        assert!(!debounce.fire(ticket));
    }
}
