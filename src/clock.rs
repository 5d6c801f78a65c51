/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

/**
 * Simulated time shared by every thread.
 *
 * The driving loop is the only writer: it calls `advance` once per simulated second.
 * Elevators and floors read it to stamp passengers and prefix log lines.
 * `time_scale` compresses simulated time, e.g. a scale of 10 runs ten simulated
 * seconds in one real second.
 */
#[derive(Clone, Debug)]
pub struct SimClock {
    seconds: Arc<AtomicU64>,
    time_scale: u32,
}

impl SimClock {
    pub fn new(time_scale: u32) -> SimClock {
        SimClock {
            seconds: Arc::new(AtomicU64::new(0)),
            time_scale: time_scale.max(1),
        }
    }

    pub fn now(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }

    /// Moves the clock one simulated second forward and returns the new time.
    pub fn advance(&self) -> u64 {
        self.seconds.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    /// `HH:MM:SS` of the current simulated time.
    pub fn time_string(&self) -> String {
        let now = self.now();
        format!("{:02}:{:02}:{:02}", now / 3600, (now / 60) % 60, now % 60)
    }

    /// Real duration of `sim_ms` simulated milliseconds.
    pub fn scaled(&self, sim_ms: u64) -> Duration {
        Duration::from_micros(sim_ms * 1000 / self.time_scale as u64)
    }

    /// Blocks the calling thread for `sim_ms` simulated milliseconds.
    pub fn sleep(&self, sim_ms: u64) {
        sleep(self.scaled(sim_ms));
    }
}
