use chrono::{DateTime, Days, Local, LocalResult, NaiveTime, TimeZone};

pub const MAX_HOUR: u32 = 23;
pub const MAX_MINUTE: u32 = 59;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlarmStatus {
    Off,
    Armed,
    Ringing,
}

/// One-shot time-of-day alarm. Polled once per second with the sampled wall
/// clock; the trigger is edge-based at second 0 of the target minute.
///
/// Instead of a literal `second == 0` equality (which silently misses the
/// trigger when a poll skips seconds, e.g. under host suspension), the engine
/// fires when the target instant HH:MM:00 falls inside the half-open window
/// between the previous poll and this one. Observable behavior is identical
/// for a healthy one-second cadence: a single shot at second 0, no re-ring
/// later in the same minute, and no retroactive ring after re-arming.
#[derive(Debug, Clone)]
pub struct AlarmEngine {
    status: AlarmStatus,
    target: Option<NaiveTime>,
    last_poll: Option<DateTime<Local>>,
}

impl Default for AlarmEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmEngine {
    pub fn new() -> Self {
        Self {
            status: AlarmStatus::Off,
            target: None,
            last_poll: None,
        }
    }

    pub fn status(&self) -> AlarmStatus {
        self.status
    }

    pub fn armed(&self) -> bool {
        self.status == AlarmStatus::Armed
    }

    pub fn ringing(&self) -> bool {
        self.status == AlarmStatus::Ringing
    }

    pub fn target(&self) -> Option<NaiveTime> {
        self.target
    }

    /// Stores the wall-clock target, clamping the fields to their domain.
    /// Changing the target while armed implicitly disarms.
    pub fn set_target(&mut self, hour: u32, minute: u32) {
        self.target = NaiveTime::from_hms_opt(hour.min(MAX_HOUR), minute.min(MAX_MINUTE), 0);
        self.status = AlarmStatus::Off;
    }

    pub fn clear_target(&mut self) {
        self.target = None;
        self.status = AlarmStatus::Off;
    }

    /// Valid only with a target set. Anchors the poll window at `now` so a
    /// target instant already in the past cannot fire retroactively.
    pub fn arm(&mut self, now: DateTime<Local>) {
        if self.target.is_none() {
            return;
        }
        self.status = AlarmStatus::Armed;
        self.last_poll = Some(now);
    }

    pub fn disarm(&mut self) {
        self.status = AlarmStatus::Off;
    }

    /// Silences a ringing alarm and disarms it; re-arming is explicit.
    pub fn dismiss(&mut self) {
        self.status = AlarmStatus::Off;
    }

    /// Once-per-second trigger check. Returns true on the poll that starts
    /// the ring.
    pub fn poll(&mut self, now: DateTime<Local>) -> bool {
        let previous = self.last_poll.replace(now);
        if self.status != AlarmStatus::Armed {
            return false;
        }
        let (Some(target), Some(previous)) = (self.target, previous) else {
            return false;
        };

        if trigger_in_window(target, previous, now) {
            self.status = AlarmStatus::Ringing;
            return true;
        }
        false
    }
}

/// True when the target instant HH:MM:00 lies in `(previous, now]`, checking
/// today's and yesterday's occurrence to cover windows spanning midnight.
fn trigger_in_window(target: NaiveTime, previous: DateTime<Local>, now: DateTime<Local>) -> bool {
    let today = now.date_naive();
    let candidates = [
        Some(today),
        today.checked_sub_days(Days::new(1)),
    ];
    for date in candidates.into_iter().flatten() {
        let naive = date.and_time(target);
        let instant = match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(first, _second) => first,
            LocalResult::None => continue,
        };
        if instant > previous && instant <= now {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 15, hour, minute, second)
            .single()
            .expect("valid local time")
    }

    fn armed_for(hour: u32, minute: u32, armed_at: DateTime<Local>) -> AlarmEngine {
        let mut engine = AlarmEngine::new();
        engine.set_target(hour, minute);
        engine.arm(armed_at);
        engine
    }

    #[test]
    fn rings_exactly_once_at_second_zero() {
        let mut engine = armed_for(9, 30, at(9, 29, 50));

        for second in 51..=59 {
            assert!(!engine.poll(at(9, 29, second)));
        }
        assert!(engine.poll(at(9, 30, 0)));
        assert_eq!(engine.status(), AlarmStatus::Ringing);

        for second in 1..=59 {
            assert!(!engine.poll(at(9, 30, second)));
        }
        assert_eq!(engine.status(), AlarmStatus::Ringing);
    }

    #[test]
    fn dismiss_clears_ring_and_disarms() {
        let mut engine = armed_for(9, 30, at(9, 29, 59));
        assert!(engine.poll(at(9, 30, 0)));

        engine.dismiss();
        assert_eq!(engine.status(), AlarmStatus::Off);
        assert!(!engine.armed());
        assert!(!engine.ringing());
    }

    #[test]
    fn rearming_inside_the_same_minute_does_not_retrigger() {
        let mut engine = armed_for(9, 30, at(9, 29, 59));
        assert!(engine.poll(at(9, 30, 0)));
        engine.dismiss();

        engine.arm(at(9, 30, 5));
        for second in 6..=59 {
            assert!(!engine.poll(at(9, 30, second)));
        }
        assert_eq!(engine.status(), AlarmStatus::Armed);
    }

    #[test]
    fn skipped_seconds_still_trigger_once() {
        // A suspended host can jump the poll clock straight past second 0.
        let mut engine = armed_for(9, 30, at(9, 29, 59));
        assert!(engine.poll(at(9, 30, 2)));
        assert_eq!(engine.status(), AlarmStatus::Ringing);
    }

    #[test]
    fn window_spanning_midnight_triggers() {
        let mut engine = AlarmEngine::new();
        engine.set_target(0, 0);
        let before_midnight = Local
            .with_ymd_and_hms(2026, 1, 15, 23, 59, 59)
            .single()
            .expect("valid local time");
        engine.arm(before_midnight);

        let after_midnight = Local
            .with_ymd_and_hms(2026, 1, 16, 0, 0, 1)
            .single()
            .expect("valid local time");
        assert!(engine.poll(after_midnight));
    }

    #[test]
    fn changing_target_while_armed_disarms() {
        let mut engine = armed_for(9, 30, at(9, 0, 0));
        assert!(engine.armed());

        engine.set_target(10, 0);
        assert_eq!(engine.status(), AlarmStatus::Off);
        assert!(!engine.poll(at(10, 0, 0)));
    }

    #[test]
    fn arming_after_the_target_passed_waits_for_the_next_day() {
        let mut engine = armed_for(9, 30, at(9, 30, 30));
        for second in 31..=59 {
            assert!(!engine.poll(at(9, 30, second)));
        }
        assert_eq!(engine.status(), AlarmStatus::Armed);
    }

    #[test]
    fn arm_without_target_is_a_no_op() {
        let mut engine = AlarmEngine::new();
        engine.arm(at(9, 0, 0));
        assert_eq!(engine.status(), AlarmStatus::Off);
        assert!(!engine.poll(at(9, 0, 1)));
    }

    #[test]
    fn set_target_clamps_fields() {
        let mut engine = AlarmEngine::new();
        engine.set_target(30, 75);
        let target = engine.target().expect("target set");
        assert_eq!(target, NaiveTime::from_hms_opt(23, 59, 0).expect("valid"));
    }
}
