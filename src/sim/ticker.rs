use parking_lot::{Condvar, Mutex, MutexGuard};
use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

struct Shared {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Calls a closure on its own thread at a fixed interval until cancelled.
///
/// Cancelling joins the thread: once [`Ticker::cancel`] returns (or the ticker is
/// dropped) the closure will not run again. A tick already in progress is
/// finished first.
pub struct Ticker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let shared = Arc::new(Shared {
            cancelled: Mutex::new(false),
            wake: Condvar::new(),
        });

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("life-ticker".into())
            .spawn(move || {
                let shared = thread_shared;
                let mut cancelled = shared.cancelled.lock();
                let mut deadline = Instant::now() + interval;
                while !*cancelled {
                    if !shared.wake.wait_until(&mut cancelled, deadline).timed_out() {
                        // woken early: either cancelled or spurious
                        continue;
                    }
                    if *cancelled {
                        break;
                    }
                    MutexGuard::unlocked(&mut cancelled, &mut tick);

                    // keep a fixed rate, but never try to catch up on missed ticks
                    let now = Instant::now();
                    deadline += interval;
                    if deadline < now {
                        deadline = now + interval;
                    }
                }
            })?;

        log::debug!("ticker started at {:?}", interval);
        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        *self.shared.cancelled.lock() = true;
        self.shared.wake.notify_all();
        if handle.join().is_err() {
            log::error!("ticker thread panicked");
        }
        log::debug!("ticker stopped");
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
