//! Back dispatcher
//!
//! The host calls [`handle`] on a system back action. Composed UI registers
//! handlers; the most recently registered one is asked first and returns
//! `true` if it consumed the action.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sheet_core::{Dispose, disposable_effect, on_unmount};

type Handler = Rc<dyn Fn() -> bool>;

pub type HandlerId = u64;

thread_local! {
    static HANDLERS: RefCell<Vec<(HandlerId, Handler)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<HandlerId> = const { Cell::new(1) };
}

pub fn push(handler: impl Fn() -> bool + 'static) -> HandlerId {
    let id = NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    });
    HANDLERS.with(|h| h.borrow_mut().push((id, Rc::new(handler))));
    id
}

pub fn remove(id: HandlerId) -> bool {
    HANDLERS.with(|h| {
        let mut h = h.borrow_mut();
        let before = h.len();
        h.retain(|(hid, _)| *hid != id);
        h.len() != before
    })
}

pub fn handle() -> bool {
    let handlers: Vec<Handler> =
        HANDLERS.with(|h| h.borrow().iter().rev().map(|(_, f)| f.clone()).collect());
    for f in handlers {
        if f() {
            return true;
        }
    }
    false
}

pub fn handler_count() -> usize {
    HANDLERS.with(|h| h.borrow().len())
}

/// Registers `handler` while the call site stays composed.
pub fn BackHandler(callsite: &str, enabled: bool, handler: impl Fn() -> bool + 'static) {
    disposable_effect(format!("back:{callsite}").as_str(), enabled, move || {
        if !enabled {
            return Dispose::noop();
        }
        let id = push(handler);
        on_unmount(move || {
            remove(id);
        })
    });
}
