//! Dependency injection with named scopes.
//!
//! Definitions are grouped in [`Module`]s and combined into a [`Container`].
//! Root definitions are `single` (one shared instance) or `factory` (new
//! instance per request). Scope declarations, keyed by a [`Qualifier`], hold
//! `scoped` definitions: one instance per open scope.
//!
//! Open scopes live in an arena keyed by scope id. `get_or_create_scope` is
//! get-or-insert on that arena and closing a scope removes its slot, which
//! drops every instance the scope created.

mod container;
mod error;
mod module;
mod params;

pub use container::{Container, Resolver, ScopeHandle, ScopeKey};
pub use error::InjectError;
pub use module::{Module, ScopeDsl};
pub use params::{Parameters, Qualifier, named};
