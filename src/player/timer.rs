use super::{TimerHandle, TimerService};
use crossbeam_channel::{Sender, bounded, select, tick};
use std::{
    collections::HashMap,
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::warn;

struct Ticker {
    // Dropping this sender is the stop signal
    cancel: Sender<()>,
    thread: JoinHandle<()>,
}

/// Timer service backed by one crossbeam ticker thread per armed handle.
///
/// Fired handles are sent over `ticks`; the owning event loop receives them
/// alongside its other events and decides whether they are still current.
/// The first tick is sent as soon as the timer is scheduled. `ticks` must be
/// unbounded: `cancel` joins the ticker thread, which may be mid-send.
pub struct TickerTimer {
    ticks: Sender<TimerHandle>,
    next_id: u64,
    running: HashMap<TimerHandle, Ticker>,
}

impl TickerTimer {
    pub fn new(ticks: Sender<TimerHandle>) -> Self {
        TickerTimer {
            ticks,
            next_id: 0,
            running: HashMap::new(),
        }
    }

    pub fn armed(&self) -> usize {
        self.running.len()
    }
}

impl TimerService for TickerTimer {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);

        let (cancel, cancelled) = bounded::<()>(0);
        let ticks = self.ticks.clone();

        let thread = thread::spawn(move || {
            let ticker = tick(period);

            if ticks.send(handle).is_err() {
                return;
            }

            loop {
                select! {
                    recv(cancelled) -> _ => break,
                    recv(ticker) -> _ => {
                        if ticks.send(handle).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        self.running.insert(handle, Ticker { cancel, thread });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(Ticker { cancel, thread }) = self.running.remove(&handle) {
            drop(cancel);
            if thread.join().is_err() {
                warn!(timer = handle.id(), "ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerTimer {
    fn drop(&mut self) {
        let handles: Vec<TimerHandle> = self.running.keys().copied().collect();
        for handle in handles {
            self.cancel(handle);
        }
    }
}
