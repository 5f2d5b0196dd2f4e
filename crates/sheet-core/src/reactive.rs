//! Dependency tracking between signals and compositions.
//!
//! An observer is usually a [`Recomposer`](crate::Recomposer). Signals read
//! while the observer is tracking become its dependencies; writing to any of
//! them marks the observer invalid. Invalid observers are not re-run here,
//! the frame loop asks [`is_invalid`] and recomposes on its next tick.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub type SignalId = usize;
pub type ObserverId = usize;

thread_local! {
    static CURRENT_OBSERVER: Cell<Option<ObserverId>> = const { Cell::new(None) };
    static NEXT_SIGNAL: Cell<SignalId> = const { Cell::new(1) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
}

#[derive(Default)]
struct DepGraph {
    next_observer: ObserverId,
    // signal_id -> observers that depend on it
    edges: HashMap<SignalId, HashSet<ObserverId>>,
    // observer_id -> signals it depends on
    back: HashMap<ObserverId, HashSet<SignalId>>,
    invalid: HashSet<ObserverId>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        if let Some(signals) = self.back.remove(&obs) {
            for s in signals {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                    if set.is_empty() {
                        self.edges.remove(&s);
                    }
                }
            }
        }
    }
}

pub(crate) fn next_signal_id() -> SignalId {
    NEXT_SIGNAL.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

pub fn register_signal_read(sig: SignalId) {
    if let Some(obs) = CURRENT_OBSERVER.with(Cell::get) {
        GRAPH.with(|g| {
            let mut g = g.borrow_mut();
            g.edges.entry(sig).or_default().insert(obs);
            g.back.entry(obs).or_default().insert(sig);
        });
    }
}

pub fn signal_changed(sig: SignalId) {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let Some(observers) = g.edges.get(&sig).cloned() else {
            return;
        };
        for obs in observers {
            if g.invalid.insert(obs) {
                log::trace!("signal {sig} invalidated observer {obs}");
            }
        }
    });
}

pub fn new_observer() -> ObserverId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_observer;
        g.next_observer += 1;
        g.invalid.insert(id);
        id
    })
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        g.remove_all_edges_for(id);
        g.invalid.remove(&id);
    });
}

pub fn is_invalid(id: ObserverId) -> bool {
    GRAPH.with(|g| g.borrow().invalid.contains(&id))
}

/// Runs `f` with `id` as the current observer. Previous dependencies of `id`
/// are dropped first and the observer is marked valid.
pub fn track<R>(id: ObserverId, f: impl FnOnce() -> R) -> R {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        g.remove_all_edges_for(id);
        g.invalid.remove(&id);
    });
    with_current(Some(id), f)
}

fn with_current<R>(obs: Option<ObserverId>, f: impl FnOnce() -> R) -> R {
    // Restores on unwind too.
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| co.set(self.0));
        }
    }
    let _restore = Restore(CURRENT_OBSERVER.with(|co| co.replace(obs)));
    f()
}

pub fn dependency_count(id: ObserverId) -> usize {
    GRAPH.with(|g| g.borrow().back.get(&id).map_or(0, HashSet::len))
}
