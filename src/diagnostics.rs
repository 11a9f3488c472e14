use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::clock::ClockSource;

/// Rolling pacing statistics for the periodic engine re-evaluation.
pub struct TickStats {
    total_ticks: u64,
    late_ticks: u64,
    last_tick: Duration,
    target_tick: Duration,
    window: VecDeque<Duration>,
}

impl TickStats {
    pub fn new(window_size: usize, target_tick: Duration) -> Self {
        Self {
            total_ticks: 0,
            late_ticks: 0,
            last_tick: Duration::ZERO,
            target_tick,
            window: VecDeque::with_capacity(window_size),
        }
    }

    pub fn record_tick(&mut self, tick_time: Duration) {
        self.total_ticks += 1;
        self.last_tick = tick_time;
        if tick_time > self.target_tick {
            self.late_ticks += 1;
        }

        if self.window.len() == self.window.capacity() {
            let _ = self.window.pop_front();
        }
        self.window.push_back(tick_time);
    }

    pub fn instant_rate(&self) -> f64 {
        if self.last_tick.is_zero() {
            return 0.0;
        }
        1.0 / self.last_tick.as_secs_f64()
    }

    pub fn rolling_rate(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        let total_secs: f64 = self.window.iter().map(Duration::as_secs_f64).sum();
        if total_secs == 0.0 {
            return 0.0;
        }
        self.window.len() as f64 / total_secs
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn late_ticks(&self) -> u64 {
        self.late_ticks
    }
}

/// Samples the clock source at the countdown re-evaluation cadence for a few
/// seconds and reports how well the pacing holds up on this host.
pub fn run_diagnostics(source: &dyn ClockSource, tick_ms: u64) -> Result<()> {
    let target = Duration::from_millis(tick_ms.max(1));
    println!("DualChrono diagnostics");
    println!("Selected clock source: {}", source.label());
    println!("Tick cadence: {} ms", target.as_millis());

    println!("Running 2 second pacing benchmark...");
    let mut stats = TickStats::new(256, target);
    let bench_start = Instant::now();
    let bench_end = bench_start + Duration::from_secs(2);
    let mut next_tick = bench_start + target;
    while Instant::now() < bench_end {
        let tick_start = Instant::now();
        let _ = source.now()?;
        sleep_until(next_tick);
        stats.record_tick(tick_start.elapsed());
        next_tick += target;
    }

    println!("Benchmark summary:");
    println!("  Ticks: {}", stats.total_ticks());
    println!("  Late: {}", stats.late_ticks());
    println!("  Instant rate: {:.1}/s", stats.instant_rate());
    println!("  Rolling rate: {:.1}/s", stats.rolling_rate());
    Ok(())
}

pub fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if now >= deadline {
        return;
    }

    let mut remaining = deadline.saturating_duration_since(now);
    if remaining > Duration::from_millis(1) {
        std::thread::sleep(remaining - Duration::from_micros(250));
    }

    loop {
        let current = Instant::now();
        if current >= deadline {
            break;
        }
        remaining = deadline.saturating_duration_since(current);
        if remaining > Duration::from_micros(50) {
            std::thread::yield_now();
        } else {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_ticks_are_counted_against_the_target() {
        let mut stats = TickStats::new(8, Duration::from_millis(50));
        stats.record_tick(Duration::from_millis(40));
        stats.record_tick(Duration::from_millis(60));
        stats.record_tick(Duration::from_millis(50));
        assert_eq!(stats.total_ticks(), 3);
        assert_eq!(stats.late_ticks(), 1);
    }

    #[test]
    fn rolling_rate_averages_the_window() {
        let mut stats = TickStats::new(4, Duration::from_millis(100));
        for _ in 0..4 {
            stats.record_tick(Duration::from_millis(100));
        }
        let rate = stats.rolling_rate();
        assert!((rate - 10.0).abs() < 0.01);
        assert!((stats.instant_rate() - 10.0).abs() < 0.01);
    }

    #[test]
    fn empty_stats_report_zero_rates() {
        let stats = TickStats::new(4, Duration::from_millis(100));
        assert_eq!(stats.instant_rate(), 0.0);
        assert_eq!(stats.rolling_rate(), 0.0);
        assert_eq!(stats.total_ticks(), 0);
    }

    #[test]
    fn sleep_until_past_deadline_returns_immediately() {
        let deadline = Instant::now();
        sleep_until(deadline);
        assert!(Instant::now() >= deadline);
    }
}
