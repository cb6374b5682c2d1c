use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};

/// Messenger is used to notify the application that the layer collection or its styles have
/// changed and the map must be redrawn.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests the application to redraw the map.
    fn request_redraw(&self);
}

impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    fn request_redraw(&self) {
        self.as_ref().request_redraw()
    }
}

/// Messenger that counts redraw requests. Useful for headless applications and tests.
#[derive(Debug, Default)]
pub struct CountingMessenger {
    requests: AtomicUsize,
}

impl CountingMessenger {
    /// Number of redraw requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Messenger for CountingMessenger {
    fn request_redraw(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}
