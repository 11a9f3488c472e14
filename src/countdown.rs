use chrono::{DateTime, Duration, Local};

pub const MAX_HOURS: u32 = 99;
pub const MAX_MINUTES: u32 = 59;
pub const MAX_SECONDS: u32 = 59;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CountdownStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown state machine. All transitions take the sampled wall clock as a
/// parameter; remaining time is recomputed from wall-clock deltas rather than
/// counted ticks, so a throttled or suspended caller cannot make the display
/// lag behind real elapsed time.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    status: CountdownStatus,
    hours: u32,
    minutes: u32,
    seconds: u32,
    target: Duration,
    remaining: Duration,
    last_tick: Option<DateTime<Local>>,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self {
            status: CountdownStatus::Idle,
            hours: 0,
            minutes: 0,
            seconds: 0,
            target: Duration::zero(),
            remaining: Duration::zero(),
            last_tick: None,
        }
    }

    pub fn status(&self) -> CountdownStatus {
        self.status
    }

    pub fn inputs(&self) -> (u32, u32, u32) {
        (self.hours, self.minutes, self.seconds)
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Valid only while `Idle`; each field clamps to its domain.
    pub fn configure(&mut self, hours: u32, minutes: u32, seconds: u32) {
        if self.status != CountdownStatus::Idle {
            return;
        }
        self.hours = hours.min(MAX_HOURS);
        self.minutes = minutes.min(MAX_MINUTES);
        self.seconds = seconds.min(MAX_SECONDS);
    }

    /// From `Idle`/`Completed` starts a fresh run from the configured inputs
    /// (no-op when they total zero). From `Paused` resumes with the retained
    /// remaining time. No-op while already `Running`.
    pub fn start(&mut self, now: DateTime<Local>) {
        match self.status {
            CountdownStatus::Idle | CountdownStatus::Completed => {
                let total_seconds =
                    i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds);
                if total_seconds == 0 {
                    return;
                }
                self.target = Duration::seconds(total_seconds);
                self.remaining = self.target;
                self.last_tick = Some(now);
                self.status = CountdownStatus::Running;
            }
            CountdownStatus::Paused => {
                self.last_tick = Some(now);
                self.status = CountdownStatus::Running;
            }
            CountdownStatus::Running => {}
        }
    }

    /// Valid only while `Running`; freezes the remaining time.
    pub fn pause(&mut self) {
        if self.status != CountdownStatus::Running {
            return;
        }
        self.status = CountdownStatus::Paused;
        self.last_tick = None;
    }

    /// From any state: back to `Idle` with nothing remaining. Idempotent.
    pub fn reset(&mut self) {
        self.status = CountdownStatus::Idle;
        self.remaining = Duration::zero();
        self.target = Duration::zero();
        self.last_tick = None;
    }

    /// From `Completed` only: acknowledges the finished run.
    pub fn dismiss(&mut self) {
        if self.status != CountdownStatus::Completed {
            return;
        }
        self.reset();
    }

    /// Periodic re-evaluation while `Running`. Returns true on the call that
    /// crosses into `Completed`.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        if self.status != CountdownStatus::Running {
            return false;
        }
        let Some(last_tick) = self.last_tick else {
            return false;
        };

        // A clock stepped backwards contributes no elapsed time.
        let elapsed = (now - last_tick).max(Duration::zero());
        self.remaining = (self.remaining - elapsed).max(Duration::zero());
        self.last_tick = Some(now);

        if self.remaining.is_zero() {
            self.status = CountdownStatus::Completed;
            self.last_tick = None;
            return true;
        }
        false
    }

    /// H/M/S parts for display. While `Idle` this mirrors the configured
    /// inputs; otherwise the ceiling of the remaining time in whole seconds,
    /// so a fresh 5 s run reads 00:00:05 and only `Completed` reads zero.
    pub fn display_parts(&self) -> (u32, u32, u32) {
        match self.status {
            CountdownStatus::Idle => (self.hours, self.minutes, self.seconds),
            _ => {
                let ms = self.remaining.num_milliseconds().max(0);
                let total_seconds = (ms + 999) / 1000;
                split_seconds(total_seconds)
            }
        }
    }
}

fn split_seconds(total: i64) -> (u32, u32, u32) {
    let total = total.max(0);
    let hours = (total / 3600) as u32;
    let minutes = ((total % 3600) / 60) as u32;
    let seconds = (total % 60) as u32;
    (hours, minutes, seconds)
}
