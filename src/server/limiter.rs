//! Connection limiter
//!
//! Counting semaphore over a bounded channel: acquiring a slot sends a token,
//! dropping the permit takes one back out. When every slot is taken the
//! accept loop blocks in `acquire` until a handler thread finishes.

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::logger;

#[derive(Debug, Clone)]
pub struct ConnectionLimiter {
    slots: Sender<()>,
    release: Receiver<()>,
    max: usize,
}

/// A held slot, released on drop
#[derive(Debug)]
pub struct Permit {
    release: Receiver<()>,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        let max = max.max(1);
        let (slots, release) = bounded(max);
        Self {
            slots,
            release,
            max,
        }
    }

    /// Take a slot, blocking while all are in use
    pub fn acquire(&self) -> Permit {
        if self.slots.is_full() {
            logger::log_warning(&format!(
                "Max connections reached: {}/{}. Waiting for a free slot.",
                self.in_use(),
                self.max()
            ));
        }
        // Both ends live in self, so the channel never disconnects
        let _ = self.slots.send(());
        Permit {
            release: self.release.clone(),
        }
    }

    pub fn in_use(&self) -> usize {
        self.slots.len()
    }

    pub const fn max(&self) -> usize {
        self.max
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        let _ = self.release.try_recv();
    }
}
