use anyhow::Result;
use chrono::{DateTime, Local};

/// Wall-clock boundary shared by both engines. Everything downstream takes
/// `DateTime<Local>` values sampled through this trait, so tests can step
/// time explicitly instead of sleeping.
pub trait ClockSource: Send {
    fn now(&self) -> Result<DateTime<Local>>;
    fn label(&self) -> &'static str;
}

pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Result<DateTime<Local>> {
        Ok(Local::now())
    }

    fn label(&self) -> &'static str {
        "SYSTEM_LOCAL"
    }
}

pub fn select_source() -> Box<dyn ClockSource> {
    Box::new(SystemClock)
}
