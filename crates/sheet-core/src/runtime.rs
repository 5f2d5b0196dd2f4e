use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::effects::Dispose;
use crate::reactive::{self, ObserverId};
use crate::view::View;

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

struct Slot {
    value: Box<dyn Any>,
    frame: u64,
    on_forget: Option<Dispose>,
}

/// Keyed slot table shared by every composition on this thread.
///
/// A slot lives as long as it is touched once per frame. Slots that a frame
/// does not reach are forgotten when that frame ends and their disposers run.
#[derive(Default)]
struct Composer {
    slots: HashMap<String, Slot>,
    groups: Vec<String>,
    frame: u64,
}

impl Composer {
    fn full_key(&self, key: &str) -> String {
        if self.groups.is_empty() {
            key.to_string()
        } else {
            format!("{}/{key}", self.groups.join("/"))
        }
    }

    fn touch<T: 'static>(&mut self, full_key: &str) -> Option<Rc<T>> {
        let frame = self.frame;
        let slot = self.slots.get_mut(full_key)?;
        match slot.value.downcast_ref::<Rc<T>>() {
            Some(rc) => {
                slot.frame = frame;
                Some(rc.clone())
            }
            None => {
                log::warn!("remember: key '{full_key}' reused with a different type; replacing.");
                None
            }
        }
    }

    fn forget_stale(&mut self) -> Vec<(String, Slot)> {
        let frame = self.frame;
        let stale: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, s)| s.frame != frame)
            .map(|(k, _)| k.clone())
            .collect();
        stale
            .into_iter()
            .filter_map(|k| self.slots.remove(&k).map(|s| (k, s)))
            .collect()
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

fn run_forgotten(slots: Vec<(String, Slot)>) {
    for (key, slot) in slots {
        log::trace!("forgetting slot '{key}'");
        if let Some(d) = slot.on_forget {
            d.run();
        }
        drop(slot.value);
    }
}

/// Key-based remember. Inside [`key_group`] the key is prefixed with the
/// group path, so whole subtrees can be forgotten together.
pub fn remember_with_key<T: 'static>(key: impl AsRef<str>, init: impl FnOnce() -> T) -> Rc<T> {
    remember_inner(key.as_ref(), init, None::<fn(&T)>)
}

/// Like [`remember_with_key`], running `on_forget` once when the slot leaves
/// composition (or when the thread's composer is reset).
pub fn remember_with_key_disposable<T: 'static>(
    key: impl AsRef<str>,
    init: impl FnOnce() -> T,
    on_forget: impl FnOnce(&T) + 'static,
) -> Rc<T> {
    remember_inner(key.as_ref(), init, Some(on_forget))
}

fn remember_inner<T: 'static, F: FnOnce(&T) + 'static>(
    key: &str,
    init: impl FnOnce() -> T,
    on_forget: Option<F>,
) -> Rc<T> {
    let full_key = COMPOSER.with(|c| c.borrow().full_key(key));
    if let Some(rc) = COMPOSER.with(|c| c.borrow_mut().touch::<T>(&full_key)) {
        return rc;
    }

    // `init` may itself remember things, so the composer is not borrowed here.
    let rc = Rc::new(init());
    let on_forget = on_forget.map(|f| {
        let held = rc.clone();
        Dispose::new(move || f(&held))
    });

    let replaced = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let frame = c.frame;
        c.slots.insert(
            full_key,
            Slot {
                value: Box::new(rc.clone()),
                frame,
                on_forget,
            },
        )
    });
    if let Some(old) = replaced {
        run_forgotten(vec![(key.to_string(), old)]);
    }
    rc
}

/// Nests every keyed slot remembered by `f` under `group`.
pub fn key_group<R>(group: impl Into<String>, f: impl FnOnce() -> R) -> R {
    struct Pop;
    impl Drop for Pop {
        fn drop(&mut self) {
            COMPOSER.with(|c| {
                c.borrow_mut().groups.pop();
            });
        }
    }
    COMPOSER.with(|c| c.borrow_mut().groups.push(group.into()));
    let _pop = Pop;
    f()
}

/// One frame of composition. Dropping the guard forgets every slot the frame
/// did not touch.
pub struct ComposeGuard {
    frame: u64,
}

impl ComposeGuard {
    pub fn begin() -> Self {
        let frame = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.frame += 1;
            c.groups.clear();
            c.frame
        });
        ComposeGuard { frame }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let stale = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.groups.clear();
            c.forget_stale()
        });
        run_forgotten(stale);
    }
}

/// Drives composition of a root view and tracks which signals it read.
pub struct Recomposer {
    observer: ObserverId,
    frames: u64,
}

impl Recomposer {
    pub fn new() -> Self {
        Self {
            observer: reactive::new_observer(),
            frames: 0,
        }
    }

    /// True before the first frame and after any signal read by the last
    /// frame has changed.
    pub fn needs_recompose(&self) -> bool {
        reactive::is_invalid(self.observer)
    }

    pub fn compose(&mut self, build: impl FnOnce() -> View) -> View {
        let guard = ComposeGuard::begin();
        let root = reactive::track(self.observer, build);
        drop(guard);
        self.frames += 1;
        log::trace!(
            "frame {} composed, {} dependencies",
            self.frames,
            reactive::dependency_count(self.observer)
        );
        root
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Recomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Recomposer {
    fn drop(&mut self) {
        reactive::remove_observer(self.observer);
        reset_composer();
    }
}

/// Forgets every slot on this thread, running their disposers.
pub fn reset_composer() {
    let all = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        c.groups.clear();
        c.slots.drain().collect::<Vec<_>>()
    });
    run_forgotten(all);
}

pub fn slot_count() -> usize {
    COMPOSER.with(|c| c.borrow().slot_count())
}
