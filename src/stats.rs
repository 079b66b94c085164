use std::time::{Duration, Instant};

const REPORT_EVERY: Duration = Duration::from_millis(500);

/// Tracks how fast generations go by.
pub struct Throughput {
    gens: u64,
    alive: usize,
    gens_in_report: u64,
    last_report: Instant,
    rate: f64,
}
impl Throughput {
    pub fn new(alive: usize) -> Self {
        Self {
            gens: 0,
            alive,
            gens_in_report: 0,
            last_report: Instant::now(),
            rate: 0.0,
        }
    }

    /// Records the current generation number and live count. Generation numbers
    /// going backwards (after a clear) restart the count.
    pub fn record(&mut self, generation: u64, alive: usize) {
        if generation < self.gens {
            self.gens_in_report = 0;
        } else {
            self.gens_in_report += generation - self.gens;
        }
        self.gens = generation;
        self.alive = alive;
    }

    pub fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_EVERY
    }

    /// Generations per second over the last report period.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn report(&mut self) -> String {
        self.rate = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset for the next period
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{}",
            self.rate, self.gens, self.alive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_counts() {
        let mut stats = Throughput::new(5);
        stats.record(1, 4);
        stats.record(2, 3);

        let report = stats.report();
        assert!(report.ends_with("gens:2, alive:3"), "{report}");
        assert!(stats.rate() > 0.0);
    }

    #[test]
    fn clear_restarts_period() {
        let mut stats = Throughput::new(0);
        stats.record(10, 1);
        stats.record(0, 0);
        stats.report();

        assert_eq!(stats.rate(), 0.0);
    }

    #[test]
    fn waits_before_reporting() {
        let stats = Throughput::new(0);

        assert!(!stats.has_report());
    }
}
