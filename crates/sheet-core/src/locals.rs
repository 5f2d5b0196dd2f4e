//! # Locals
//!
//! Thread‑local "composition locals": values provided to a subtree while it
//! is being built. A local is keyed by its type, so wrap shared types in a
//! newtype before providing them.
//!
//! ```rust
//! use sheet_core::*;
//!
//! #[derive(Clone)]
//! struct Accent(&'static str);
//!
//! assert!(local::<Accent>().is_none());
//! provide_local(Accent("teal"), || {
//!     assert_eq!(local::<Accent>().map(|a| a.0), Some("teal"));
//! });
//! ```
//!
//! Locals only exist while the providing closure runs. Callbacks that fire
//! later (clicks, timers) must capture what they need during composition.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

/// Provide `value` to everything `f` builds.
pub fn provide_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Innermost provided value of type `T`, if any provider is active.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}
