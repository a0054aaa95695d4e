//! Navigation transition overlay.
//!
//! Every navigation opens a fixed-length window during which the full-screen transition is
//! shown. A navigation that arrives while a window is open cancels the pending timer and
//! starts a new window from its own start time, so at most one window exists at a time and
//! the overlay always clears `duration` after the latest navigation.
//!
//! Each window carries a generation number. A timer only hides the overlay if its
//! generation is still current, so a timer that fires concurrently with a restart cannot
//! close the newer window.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Window length used by the client unless configured otherwise.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(1200);

#[derive(Debug, Default)]
struct OverlayWindow {
    generation: u64,
    timer: Option<JoinHandle<()>>,
    started_at: Option<Instant>,
}

#[derive(Debug)]
pub struct TransitionOverlay {
    duration: Duration,
    window: Arc<Mutex<OverlayWindow>>,
    visible: Arc<watch::Sender<bool>>,
}

fn lock(window: &Mutex<OverlayWindow>) -> MutexGuard<'_, OverlayWindow> {
    window.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TransitionOverlay {
    pub fn new(duration: Duration) -> Self {
        let (visible, _) = watch::channel(false);
        Self {
            duration,
            window: Arc::new(Mutex::new(OverlayWindow::default())),
            visible: Arc::new(visible),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Visibility changes, for whatever draws the overlay.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// Start of the open window, `None` while hidden.
    pub fn window_started_at(&self) -> Option<Instant> {
        lock(&self.window).started_at
    }

    /// show
    ///
    /// Opens a window, replacing any window still open.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime; the hide timer is a spawned task.
    pub fn show(&self) {
        let mut window = lock(&self.window);
        if let Some(timer) = window.timer.take() {
            timer.abort();
        }
        window.generation += 1;
        window.started_at = Some(Instant::now());
        self.visible.send_replace(true);

        let generation = window.generation;
        let duration = self.duration;
        let shared = Arc::clone(&self.window);
        let visible = Arc::clone(&self.visible);

        window.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut window = lock(&shared);
            if window.generation == generation {
                window.timer = None;
                window.started_at = None;
                visible.send_replace(false);
            }
        }));
    }

    /// cancel
    ///
    /// Aborts the pending timer and hides the overlay immediately. Used when the view that
    /// owns the overlay goes away; no timer outlives it.
    pub fn cancel(&self) {
        let mut window = lock(&self.window);
        window.generation += 1;
        window.started_at = None;
        if let Some(timer) = window.timer.take() {
            timer.abort();
        }
        self.visible.send_replace(false);
    }
}

impl Default for TransitionOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}

impl Drop for TransitionOverlay {
    fn drop(&mut self) {
        self.cancel();
    }
}
