//! Running a grid over time.
//!
//! A [`Simulation`] owns the grid behind a single lock, and is either idle or
//! running a [`Ticker`] that steps it periodically. Single steps can be taken in
//! either state.

mod ticker;

pub use self::ticker::Ticker;
use crate::{Error, Grid, Pos2, Result};
use parking_lot::{Mutex, MutexGuard};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

pub type SharedGrid = Arc<Mutex<Grid>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

struct Running {
    ticker: Ticker,
    interval: Duration,
}

pub struct Simulation {
    grid: SharedGrid,
    generation: Arc<AtomicU64>,
    parallel: bool,
    running: Option<Running>,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid: Arc::new(Mutex::new(grid)),
            generation: Arc::new(AtomicU64::new(0)),
            parallel: false,
            running: None,
        }
    }

    /// Steps on the rayon pool instead of the calling thread.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Locks the grid. Do not hold the guard across [`Simulation::stop`], the
    /// ticker may be waiting on it.
    pub fn grid(&self) -> MutexGuard<'_, Grid> {
        self.grid.lock()
    }

    pub fn shared(&self) -> SharedGrid {
        Arc::clone(&self.grid)
    }

    pub fn snapshot(&self) -> Vec<Pos2> {
        self.grid.lock().snapshot()
    }

    /// Empties the grid and restarts the generation count.
    pub fn clear(&self) {
        let mut grid = self.grid.lock();
        grid.clear();
        self.generation.store(0, Ordering::SeqCst);
    }

    /// Number of steps taken since the start or the last clear.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn alive_count(&self) -> usize {
        self.grid.lock().len()
    }

    /// Takes a single step. Does not change the run state.
    pub fn step(&self) {
        advance(&self.grid, &self.generation, self.parallel);
    }

    pub fn state(&self) -> RunState {
        match self.running {
            Some(_) => RunState::Running,
            None => RunState::Idle,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.running.as_ref().map(|r| r.interval)
    }

    /// Starts stepping every `interval`. When already running the current ticker
    /// is stopped first, which is how the interval is changed.
    pub fn start(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(Error::InvalidSetting("step interval must be non-zero".into()));
        }
        self.stop();

        let grid = Arc::clone(&self.grid);
        let generation = Arc::clone(&self.generation);
        let parallel = self.parallel;
        let ticker = Ticker::spawn(interval, move || advance(&grid, &generation, parallel))?;

        log::debug!("simulation running every {:?}", interval);
        self.running = Some(Running { ticker, interval });
        Ok(())
    }

    /// Stops the ticker. No step runs after this returns.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.ticker.cancel();
            log::debug!("simulation idle at generation {}", self.generation());
        }
    }

    /// Starts when idle, stops when running. Returns the new state.
    pub fn toggle(&mut self, interval: Duration) -> Result<RunState> {
        match self.state() {
            RunState::Idle => self.start(interval)?,
            RunState::Running => self.stop(),
        }
        Ok(self.state())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advance(grid: &Mutex<Grid>, generation: &AtomicU64, parallel: bool) {
    // the lock is held across compute and swap, readers see one generation or
    // the next, never a mix
    let mut grid = grid.lock();
    if parallel {
        grid.step_parallel();
    } else {
        grid.step();
    }
    generation.fetch_add(1, Ordering::SeqCst);
}
