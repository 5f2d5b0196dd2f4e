use std::rc::Rc;

use sheet_core::UiTaskQueue;
use sheet_ui::SheetState;

use crate::{BottomSheet, SheetHostModel};

/// Shows and hides the local bottom sheet.
///
/// Calls return immediately. The work runs on the UI task queue in call
/// order, so a `hide` issued while a `show` is still animating takes effect
/// after it. Clones share the same sheet.
#[derive(Clone)]
pub struct SheetManager {
    model: Rc<SheetHostModel>,
    sheet_state: SheetState,
    tasks: UiTaskQueue,
}

impl SheetManager {
    pub fn new(model: Rc<SheetHostModel>, sheet_state: SheetState, tasks: UiTaskQueue) -> Self {
        Self {
            model,
            sheet_state,
            tasks,
        }
    }

    /// Makes `screen` the active sheet and opens it. A screen already on the
    /// sheet is replaced; what happens to its scope is up to the provider's
    /// `ReplacePolicy`.
    pub fn show<S: BottomSheet + 'static>(&self, screen: S) {
        self.show_rc(Rc::new(screen));
    }

    pub fn show_rc(&self, screen: Rc<dyn BottomSheet>) {
        let model = self.model.clone();
        let state = self.sheet_state.clone();
        log::debug!("show `{}` queued", screen.scope_name());
        self.tasks.enqueue(async move {
            model.update_screen(Some(screen));
            model.update_visibility(true);
            state.show().await;
        });
    }

    /// Closes the sheet and clears the active screen. The screen's scope is
    /// closed once its content leaves composition.
    pub fn hide(&self) {
        let model = self.model.clone();
        let state = self.sheet_state.clone();
        log::debug!("hide queued");
        self.tasks.enqueue(async move {
            model.update_visibility(false);
            model.update_screen(None);
            model.next_generation();
            state.hide().await;
        });
    }

    /// Tracked read.
    pub fn is_visible(&self) -> bool {
        self.model.is_visible()
    }

    pub fn active_screen(&self) -> Option<Rc<dyn BottomSheet>> {
        self.model.screen()
    }

    pub fn sheet_state(&self) -> &SheetState {
        &self.sheet_state
    }

    pub fn host_model(&self) -> &Rc<SheetHostModel> {
        &self.model
    }

    /// Waits until every queued `show`/`hide` has finished.
    pub async fn idle(&self) {
        self.tasks.idle().await;
    }
}
