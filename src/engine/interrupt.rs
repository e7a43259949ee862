use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared Ctrl-C state. The batch polls it between symbols.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
    batch_done: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request. Returns `false` if one was already pending.
    pub fn request(&self) -> bool {
        !self.requested.swap(true, Ordering::SeqCst)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn finish_batch(&self) {
        self.batch_done.store(true, Ordering::SeqCst);
    }

    /// After the batch nothing polls the flag, so a Ctrl-C there should end the process.
    pub fn batch_finished(&self) -> bool {
        self.batch_done.load(Ordering::SeqCst)
    }
}
