//! # State, slots and effects
//!
//! The core keeps UI state out of the view tree. Views are rebuilt every
//! frame from reactive state:
//!
//! - `Signal<T>`: observable value with explicit subscribers.
//! - `remember_with_key`: state that survives between frames for as long
//!   as its call site keeps being composed.
//! - `disposable_effect`: side-effects with cleanup on key change or when
//!   the call site leaves composition.
//!
//! ## Signals
//!
//! ```rust
//! use sheet_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Reads made during composition are tracked by the `Recomposer`; writing
//! to any of them marks the composition invalid so the frame loop rebuilds
//! it on its next tick.
//!
//! ## Slots
//!
//! ```rust
//! use sheet_core::*;
//!
//! let mut recomposer = Recomposer::new();
//! let clicks = signal(0);
//! let view = recomposer.compose(|| {
//!     let seen = remember_with_key("seen", || signal(false));
//!     seen.set(clicks.get() > 0);
//!     View::new(ViewKind::Box)
//! });
//! assert!(matches!(view.kind, ViewKind::Box));
//! ```
//!
//! Slots touched during a frame survive it; the rest are forgotten and their
//! disposers run. `key_group` nests keys so that a conditional subtree loses
//! all of its slots at once when it stops being composed.
//!
//! ## Tasks
//!
//! Everything runs on one thread. Async work (animations, timers) runs as
//! `spawn_local` tasks inside a `tokio::task::LocalSet`; `UiTaskQueue`
//! serializes jobs that must not interleave.

pub mod animation;
pub mod effects;
pub mod locals;
pub mod modifier;
pub mod reactive;
pub mod runtime;
pub mod signal;
pub mod task;
pub mod view;

pub use animation::*;
pub use effects::*;
pub use locals::*;
pub use modifier::*;
pub use runtime::*;
pub use signal::*;
pub use task::*;
pub use view::*;
