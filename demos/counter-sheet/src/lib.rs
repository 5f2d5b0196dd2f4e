#![allow(non_snake_case)]
//! Demo app: one screen with a button that opens a counting bottom sheet.

pub mod config;
pub mod counter;
mod tests;

use local_sheet::{SheetManager, SheetProvider};
use sheet_core::*;
use sheet_inject::{Container, Module};
use sheet_ui::{Button, Column, Scaffold, Text, ViewExt};

pub use config::DemoConfig;
pub use counter::{COUNTER_SCOPE, CounterSheet, CounterViewModel};

/// Definitions for the demo. Start the container with
/// [`local_sheet::sheet_module`] too.
///
/// The counter only exists inside the sheet's scope; its ticker lives as
/// long as the sheet stays mounted.
pub fn app_module(config: &DemoConfig) -> Module {
    let interval = config.counter_interval();
    Module::new()
        .scope(COUNTER_SCOPE, move |s| {
            s.scoped(move |_| Ok(CounterViewModel::new(interval)))
        })
}

pub fn TestScreen(sheets: &SheetManager, container: &Container) -> View {
    let sheets = sheets.clone();
    let container = container.clone();
    Scaffold(|padding| {
        Column(
            Modifier::new()
                .fill_max_size()
                .padding_values(padding)
                .center_horizontally()
                .center_vertically(),
        )
        .child(Button("Show Counter Bottom Sheet", move || {
            sheets.show(CounterSheet::new(&container))
        }))
    })
}

/// Root of the demo: the test screen under a sheet provider.
pub fn App(container: &Container, config: &DemoConfig) -> View {
    match SheetProvider(container, &config.sheet, |sheets| {
        TestScreen(sheets, container)
    }) {
        Ok(view) => view,
        Err(e) => {
            log::error!("sheet provider: {e}");
            Text(format!("Sheet provider failed: {e}"))
        }
    }
}
