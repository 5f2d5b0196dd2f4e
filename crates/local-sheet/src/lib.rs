#![allow(non_snake_case)]
//! Local bottom sheets.
//!
//! A [`BottomSheet`] is a screen that owns an injection scope, opened the
//! first time the screen needs it and closed exactly once when the sheet is
//! dismissed. [`SheetProvider`] hosts one modal sheet for a subtree and hands
//! out a [`SheetManager`] to show and hide screens in it.
//!
//! ```rust,no_run
//! use local_sheet::*;
//! use sheet_core::*;
//! use sheet_inject::{Container, Module};
//! use sheet_ui::{Button, Text};
//!
//! struct Greeter;
//!
//! struct HelloSheet {
//!     scope: ScreenScope<Greeter>,
//! }
//!
//! impl ScreenScoped for HelloSheet {
//!     type ViewModel = Greeter;
//!     fn screen_scope(&self) -> &ScreenScope<Greeter> {
//!         &self.scope
//!     }
//! }
//!
//! impl BottomSheet for HelloSheet {
//!     fn content(&self, _sheets: &SheetManager) -> View {
//!         Text("hello")
//!     }
//! }
//!
//! let container = Container::start([
//!     sheet_module(),
//!     Module::new().scope("hello", |s| s.scoped(|_| Ok(Greeter))),
//! ]);
//! let config = SheetConfig::default();
//!
//! // Inside a LocalSet, once per frame:
//! let view = SheetProvider(&container, &config, |sheets| {
//!     let sheets = sheets.clone();
//!     let container = container.clone();
//!     Button("Greet", move || {
//!         sheets.show(HelloSheet {
//!             scope: ScreenScope::new(&container, "hello"),
//!         })
//!     })
//! });
//! ```

mod config;
mod error;
mod host_model;
mod manager;
mod provider;
mod screen;
mod tests;

pub use config::{ReplacePolicy, SheetConfig};
pub use error::SheetError;
pub use host_model::SheetHostModel;
pub use manager::SheetManager;
pub use provider::{LocalSheet, SheetProvider, local_sheet_manager, sheet_module};
pub use screen::{BottomSheet, ScopedScreen, ScreenScope, ScreenScoped};
