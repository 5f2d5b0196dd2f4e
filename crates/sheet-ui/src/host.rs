use std::time::Duration;

use sheet_core::{Recomposer, View, ViewKind};
use tokio::time::Instant;

use crate::{back, input};

/// Headless stand-in for a platform window: owns the composition, rebuilds
/// it when its signals change and routes input to the last frame.
///
/// Runs on the UI thread inside a `tokio::task::LocalSet`.
pub struct Host {
    recomposer: Recomposer,
    root: View,
    frame_interval: Duration,
}

impl Host {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            recomposer: Recomposer::new(),
            root: View::new(ViewKind::Box),
            frame_interval,
        }
    }

    /// Composes a new frame if the previous one is stale.
    pub fn frame(&mut self, build: &mut impl FnMut() -> View) -> &View {
        if self.recomposer.needs_recompose() {
            self.root = self.recomposer.compose(&mut *build);
        }
        &self.root
    }

    /// Runs the frame loop for `duration`, yielding to other UI tasks
    /// between frames.
    pub async fn pump(&mut self, build: &mut impl FnMut() -> View, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            self.frame(build);
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(self.frame_interval).await;
        }
    }

    pub fn root(&self) -> &View {
        &self.root
    }

    pub fn frames(&self) -> u64 {
        self.recomposer.frames()
    }

    pub fn click(&self, label: &str) -> bool {
        input::click(&self.root, label)
    }

    pub fn tap_outside(&self) -> bool {
        input::tap_outside(&self.root)
    }

    pub fn press_back(&self) -> bool {
        let handled = back::handle();
        log::debug!("back press handled={handled}");
        handled
    }

    pub fn dump(&self) -> String {
        crate::dump(&self.root)
    }
}
