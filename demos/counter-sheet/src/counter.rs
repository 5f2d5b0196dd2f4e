use std::cell::RefCell;
use std::time::Duration;

use local_sheet::{BottomSheet, ScreenScope, ScreenScoped, SheetManager};
use sheet_core::*;
use sheet_inject::Container;
use sheet_ui::{Button, Column, Text, TextStyle, ViewExt};
use tokio::task::JoinHandle;

pub const COUNTER_SCOPE: &str = "test_sheet_viewmodel";

/// Counts up once per interval for as long as it lives.
pub struct CounterViewModel {
    count: Signal<u64>,
    interval: Duration,
    job: RefCell<Option<JoinHandle<()>>>,
}

impl CounterViewModel {
    /// Starts counting right away. Needs a `LocalSet`.
    pub fn new(interval: Duration) -> Self {
        let vm = Self {
            count: signal(0),
            interval,
            job: RefCell::new(None),
        };
        vm.start_auto_increment();
        vm
    }

    /// Tracked read.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub fn count_signal(&self) -> Signal<u64> {
        self.count.clone()
    }

    /// (Re)starts the ticker; a running one is cancelled first.
    pub fn start_auto_increment(&self) {
        if let Some(job) = self.job.borrow_mut().take() {
            job.abort();
        }
        let count = self.count.clone();
        let interval = self.interval;
        let job = tokio::task::spawn_local(async move {
            loop {
                tokio::time::sleep(interval).await;
                count.update(|c| *c += 1);
            }
        });
        *self.job.borrow_mut() = Some(job);
    }
}

impl Drop for CounterViewModel {
    fn drop(&mut self) {
        if let Some(job) = self.job.get_mut().take() {
            job.abort();
            log::debug!("counter stopped at {}", self.count.get_untracked());
        }
    }
}

/// Sheet showing the counter and a button that hides it.
pub struct CounterSheet {
    scope: ScreenScope<CounterViewModel>,
}

impl CounterSheet {
    pub fn new(container: &Container) -> Self {
        Self {
            scope: ScreenScope::new(container, COUNTER_SCOPE),
        }
    }
}

impl ScreenScoped for CounterSheet {
    type ViewModel = CounterViewModel;

    fn screen_scope(&self) -> &ScreenScope<CounterViewModel> {
        &self.scope
    }
}

impl BottomSheet for CounterSheet {
    fn content(&self, sheets: &SheetManager) -> View {
        let vm = match self.scope.view_model() {
            Ok(vm) => vm,
            Err(e) => {
                log::error!("counter sheet: {e}");
                return Text(format!("Counter unavailable: {e}"));
            }
        };

        let sheets = sheets.clone();
        Column(
            Modifier::new()
                .fill_max_width()
                .fill_max_height(0.6)
                .center_horizontally()
                .center_vertically(),
        )
        .child((
            Text(vm.count().to_string()).size(48.0),
            Button("Hide Sheet", move || sheets.hide()),
        ))
    }
}
