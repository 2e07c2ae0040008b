//! Deterministic timing primitives for the presentation layer. Everything is
//! keyed to a caller-supplied clock in milliseconds, so tests drive time
//! explicitly instead of waiting on a wall clock.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Easing {
    /// `1 - (1 - t)^3`, used for the main value count-up.
    CubicOut,
    /// `1 - (1 - t)^4`, used for the social-proof counter.
    QuartOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    pub start: f64,
    pub end: f64,
    pub started_at_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: f64, end: f64, started_at_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start,
            end,
            started_at_ms,
            duration_ms,
            easing,
        }
    }

    /// Progress in [0, 1]; saturates at 1 once the duration has elapsed.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    pub fn value_at(&self, now_ms: u64) -> f64 {
        let eased = self.easing.apply(self.progress(now_ms));
        self.start + (self.end - self.start) * eased
    }

    pub fn finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// A numeric display target with at most one in-flight tween by construction:
/// retargeting replaces whatever was animating, so a stale tween can never
/// write over a newer value.
#[derive(Clone, Debug)]
pub struct ValueDisplay {
    current: f64,
    active: Option<Tween>,
    duration_ms: u64,
    easing: Easing,
}

impl ValueDisplay {
    pub fn new(initial: f64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            current: initial,
            active: None,
            duration_ms,
            easing,
        }
    }

    /// Begin animating toward `target` from wherever the display is now.
    /// Retargeting to the value already shown (or already being tweened to)
    /// is a no-op.
    pub fn retarget(&mut self, target: f64, now_ms: u64) {
        let heading_to = self.active.map(|t| t.end).unwrap_or(self.current);
        if heading_to == target {
            return;
        }
        let from = self.sample(now_ms);
        self.active = Some(Tween::new(from, target, now_ms, self.duration_ms, self.easing));
    }

    /// Advance to `now_ms` and return the value to render. Completed tweens
    /// settle exactly on their end value and are dropped.
    pub fn sample(&mut self, now_ms: u64) -> f64 {
        if let Some(tween) = self.active {
            self.current = tween.value_at(now_ms);
            if tween.finished(now_ms) {
                self.current = tween.end;
                self.active = None;
            }
        }
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

/// A one-shot scheduled task: fires once when polled at or past its deadline,
/// unless cancelled first. Backs the fixed-interval rejection-flag clears and
/// the reveal pacing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Delay {
    fires_at_ms: u64,
    state: DelayState,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum DelayState {
    Pending,
    Fired,
    Cancelled,
}

impl Delay {
    pub fn after(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            fires_at_ms: now_ms.saturating_add(delay_ms),
            state: DelayState::Pending,
        }
    }

    /// True exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.state == DelayState::Pending && now_ms >= self.fires_at_ms {
            self.state = DelayState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == DelayState::Pending {
            self.state = DelayState::Cancelled;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == DelayState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn easing_hits_both_endpoints_exactly() {
        for easing in [Easing::CubicOut, Easing::QuartOut] {
            assert_approx(easing.apply(0.0), 0.0);
            assert_approx(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn easing_is_monotone() {
        for easing in [Easing::CubicOut, Easing::QuartOut] {
            let mut prev = 0.0;
            for step in 0..=100 {
                let value = easing.apply(step as f64 / 100.0);
                assert!(value >= prev, "{easing:?} decreased at step {step}");
                prev = value;
            }
        }
    }

    #[test]
    fn tween_progress_clamps_at_one() {
        let tween = Tween::new(0.0, 100.0, 1_000, 400, Easing::CubicOut);
        assert_approx(tween.progress(1_000), 0.0);
        assert_approx(tween.progress(1_400), 1.0);
        assert_approx(tween.progress(9_999), 1.0);
        assert_approx(tween.value_at(9_999), 100.0);
        assert!(tween.finished(1_400));
    }

    #[test]
    fn tween_before_start_holds_start_value() {
        let tween = Tween::new(10.0, 20.0, 1_000, 400, Easing::CubicOut);
        assert_approx(tween.value_at(500), 10.0);
    }

    #[test]
    fn zero_duration_tween_is_immediately_done() {
        let tween = Tween::new(0.0, 50.0, 0, 0, Easing::QuartOut);
        assert!(tween.finished(0));
        assert_approx(tween.value_at(0), 50.0);
    }

    #[test]
    fn display_settles_exactly_on_target() {
        let mut display = ValueDisplay::new(0.0, 400, Easing::CubicOut);
        display.retarget(1_000.0, 0);
        assert!(display.is_animating());

        let midway = display.sample(200);
        assert!(midway > 0.0 && midway < 1_000.0);

        assert_approx(display.sample(400), 1_000.0);
        assert!(!display.is_animating());
    }

    #[test]
    fn retarget_supersedes_active_tween() {
        let mut display = ValueDisplay::new(0.0, 400, Easing::CubicOut);
        display.retarget(1_000.0, 0);
        let at_switch = display.sample(200);

        // A newer authoritative value takes over mid-flight from wherever the
        // display currently is; the old endpoint is never reached.
        display.retarget(50.0, 200);
        let first = display.sample(201);
        assert!(first <= at_switch);
        assert_approx(display.sample(600), 50.0);
    }

    #[test]
    fn retarget_to_current_value_is_a_no_op() {
        let mut display = ValueDisplay::new(42.0, 400, Easing::CubicOut);
        display.retarget(42.0, 0);
        assert!(!display.is_animating());

        display.retarget(100.0, 0);
        display.retarget(100.0, 100);
        let tween_end = display.sample(100);
        assert!(display.is_animating());
        assert!(tween_end < 100.0);
    }

    #[test]
    fn delay_fires_once_at_deadline() {
        let mut delay = Delay::after(1_000, 500);
        assert!(!delay.poll(1_200));
        assert!(delay.is_pending());
        assert!(delay.poll(1_500));
        assert!(!delay.poll(1_600));
        assert!(!delay.is_pending());
    }

    #[test]
    fn cancelled_delay_never_fires() {
        let mut delay = Delay::after(0, 500);
        delay.cancel();
        assert!(!delay.poll(10_000));
        assert!(!delay.is_pending());
    }
}
