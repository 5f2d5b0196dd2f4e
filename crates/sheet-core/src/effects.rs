use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::remember_with_key_disposable;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Helper to register cleanup inside effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

struct EffectSlot<K> {
    key: Option<K>,
    cleanup: Option<Dispose>,
}

/// Runs `effect` when `key` changes; the previous cleanup runs first. The last
/// cleanup runs once when the call site leaves composition.
pub fn disposable_effect<K: PartialEq + 'static>(
    callsite: &str,
    key: K,
    effect: impl FnOnce() -> Dispose,
) {
    let slot = remember_with_key_disposable(
        format!("effect:{callsite}"),
        || {
            RefCell::new(EffectSlot::<K> {
                key: None,
                cleanup: None,
            })
        },
        |slot| {
            let cleanup = slot.borrow_mut().cleanup.take();
            if let Some(d) = cleanup {
                d.run();
            }
        },
    );

    if slot.borrow().key.as_ref() == Some(&key) {
        return;
    }
    let previous = {
        let mut s = slot.borrow_mut();
        s.key = Some(key);
        s.cleanup.take()
    };
    if let Some(d) = previous {
        d.run();
    }
    let d = effect();
    slot.borrow_mut().cleanup = Some(d);
}
