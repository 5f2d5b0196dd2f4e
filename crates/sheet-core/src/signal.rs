use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::reactive::{self, SignalId};

pub type SubId = usize;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Observable value with explicit subscribe/notify.
///
/// Reads made through [`Signal::get`] while a composition is tracking are
/// recorded, so a later write invalidates that composition.
pub struct Signal<T: 'static>(Rc<Inner<T>>);

struct Inner<T> {
    id: SignalId,
    value: RefCell<T>,
    subs: RefCell<SmallVec<[(SubId, Listener<T>); 2]>>,
    next_sub: Cell<SubId>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            id: reactive::next_signal_id(),
            value: RefCell::new(value),
            subs: RefCell::new(SmallVec::new()),
            next_sub: Cell::new(0),
        }))
    }

    pub fn id(&self) -> SignalId {
        self.0.id
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::register_signal_read(self.0.id);
        self.0.value.borrow().clone()
    }

    /// Reads without joining the current composition's dependencies.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        reactive::register_signal_read(self.0.id);
        f(&self.0.value.borrow())
    }

    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }

    /// Listeners may read the signal but must not write to it.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let id = self.0.next_sub.get();
        self.0.next_sub.set(id + 1);
        self.0.subs.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut subs = self.0.subs.borrow_mut();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().len()
    }

    fn notify(&self) {
        let listeners: SmallVec<[Listener<T>; 2]> =
            self.0.subs.borrow().iter().map(|(_, l)| l.clone()).collect();
        {
            let value = self.0.value.borrow();
            for l in &listeners {
                l(&value);
            }
        }
        reactive::signal_changed(self.0.id);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.0.id)
            .field("value", &self.0.value.borrow())
            .finish()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
