use std::rc::Rc;

use sheet_core::{Signal, signal};

use crate::BottomSheet;

/// Observable sheet state shared by the manager and the provider.
///
/// Registered as a `single` in the container so every provider built from
/// the same container shows the same sheet.
pub struct SheetHostModel {
    visible: Signal<bool>,
    screen: Signal<Option<Rc<dyn BottomSheet>>>,
    generation: Signal<u64>,
}

impl SheetHostModel {
    pub fn new() -> Self {
        Self {
            visible: signal(false),
            screen: signal(None),
            generation: signal(0),
        }
    }

    /// Tracked read.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Tracked read.
    pub fn screen(&self) -> Option<Rc<dyn BottomSheet>> {
        self.screen.get()
    }

    /// Tracked read. Counts completed dismissals.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn next_generation(&self) {
        self.generation.update(|g| *g += 1);
    }

    pub fn update_visibility(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn update_screen(&self, screen: Option<Rc<dyn BottomSheet>>) {
        self.screen.set(screen);
    }
}

impl Default for SheetHostModel {
    fn default() -> Self {
        Self::new()
    }
}
