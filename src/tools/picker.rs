use egui::Color32;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::task::{Context, Poll};
use thiserror::Error;

use super::ToolMode;

/// Why a color pick did not produce a color
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    #[error("color pick was cancelled")]
    Cancelled,
    #[error("no eyedropper is available")]
    Unavailable,
}

pub type PickResult = Result<Color32, PickError>;

/// A color pick in flight
pub type PickFuture = BoxFuture<'static, PickResult>;

/// Host capability that samples a color chosen by the user
pub trait Eyedropper: Send + Sync {
    /// Whether the picker control should be enabled at all
    fn is_available(&self) -> bool;

    /// Starts a pick; the future resolves once the user chooses a pixel or gives up
    fn open(&self) -> PickFuture;

    /// Offers the pixel under a canvas press to an open pick.
    /// Returns true if the pick consumed it.
    fn offer_sample(&self, _color: Color32) -> bool {
        false
    }

    /// Aborts an open pick, resolving it with `PickError::Cancelled`
    fn cancel(&self) {}
}

/// Eyedropper that resolves with the next pixel clicked on the canvas
pub struct CanvasEyedropper {
    enabled: bool,
    pending: Mutex<Option<oneshot::Sender<Color32>>>,
}

impl std::fmt::Debug for CanvasEyedropper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEyedropper")
            .field("enabled", &self.enabled)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Default for CanvasEyedropper {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEyedropper {
    pub fn new() -> Self {
        Self {
            enabled: true,
            pending: Mutex::new(None),
        }
    }

    /// An eyedropper that reports itself unavailable
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            pending: Mutex::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.lock().is_some()
    }
}

impl Eyedropper for CanvasEyedropper {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn open(&self) -> PickFuture {
        if !self.enabled {
            return future::ready(Err(PickError::Unavailable)).boxed();
        }

        let (sender, receiver) = oneshot::channel();
        if self.pending.lock().replace(sender).is_some() {
            log::debug!("Replacing an eyedropper pick that was still open");
        }
        receiver
            .map(|result| result.map_err(|_| PickError::Cancelled))
            .boxed()
    }

    fn offer_sample(&self, color: Color32) -> bool {
        match self.pending.lock().take() {
            Some(sender) => sender.send(color).is_ok(),
            None => false,
        }
    }

    fn cancel(&self) {
        // Dropping the sender resolves the receiver as cancelled
        self.pending.lock().take();
    }
}

/// A pick the editor is waiting on, plus the mode to return to once it succeeds
pub struct PendingPick {
    future: PickFuture,
    return_to: ToolMode,
}

impl std::fmt::Debug for PendingPick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPick")
            .field("return_to", &self.return_to)
            .finish_non_exhaustive()
    }
}

impl PendingPick {
    pub fn new(future: PickFuture, return_to: ToolMode) -> Self {
        Self { future, return_to }
    }

    pub fn return_to(&self) -> ToolMode {
        self.return_to
    }

    /// Polls once without blocking; `None` while the pick is still open
    pub fn poll(&mut self) -> Option<PickResult> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match self.future.poll_unpin(&mut cx) {
            Poll::Ready(result) => Some(result),
            Poll::Pending => None,
        }
    }
}
