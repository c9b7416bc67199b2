//! A small synchronization primitive for cooperative shutdown, adapted from
//! the teacher's `pleco_engine::sync::LockLatch`.

use std::sync::{Condvar, Mutex};

/// A latch that starts unset and is eventually set once; any number of
/// threads can block on [`LockLatch::wait`] until that happens.
pub struct LockLatch {
    m: Mutex<bool>,
    v: Condvar,
}

impl LockLatch {
    pub fn new() -> LockLatch {
        LockLatch { m: Mutex::new(false), v: Condvar::new() }
    }

    pub fn wait(&self) {
        let mut guard = self.m.lock().unwrap();
        while !*guard {
            guard = self.v.wait(guard).unwrap();
        }
    }

    pub fn set(&self) {
        let mut guard = self.m.lock().unwrap();
        *guard = true;
        self.v.notify_all();
    }
}

impl Default for LockLatch {
    fn default() -> LockLatch {
        LockLatch::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn wait_unblocks_after_set() {
        let latch = Arc::new(LockLatch::new());
        let latch2 = Arc::clone(&latch);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            latch2.set();
        });
        latch.wait();
        handle.join().unwrap();
    }
}
