//! Cooperative task queue bound to the UI thread.
//!
//! Jobs are `!Send` futures run one after another by a single
//! `spawn_local` worker. A job that awaits (an animation, a timer) holds the
//! queue until it finishes, so later jobs observe its final writes.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use tokio::sync::{Notify, mpsc};

type Job = Pin<Box<dyn Future<Output = ()>>>;

#[derive(Clone)]
pub struct UiTaskQueue {
    tx: mpsc::UnboundedSender<Job>,
    pending: Rc<Cell<usize>>,
    idle: Rc<Notify>,
}

impl UiTaskQueue {
    /// Starts the worker. Must be called from inside a `tokio::task::LocalSet`.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let pending = Rc::new(Cell::new(0usize));
        let idle = Rc::new(Notify::new());

        let worker_pending = pending.clone();
        let worker_idle = idle.clone();
        tokio::task::spawn_local(async move {
            while let Some(job) = rx.recv().await {
                job.await;
                let left = worker_pending.get().saturating_sub(1);
                worker_pending.set(left);
                if left == 0 {
                    worker_idle.notify_waiters();
                }
            }
            log::debug!("ui task queue closed");
        });

        Self { tx, pending, idle }
    }

    /// Queues `job`; never blocks the caller.
    pub fn enqueue(&self, job: impl Future<Output = ()> + 'static) {
        self.pending.set(self.pending.get() + 1);
        if self.tx.send(Box::pin(job)).is_err() {
            self.pending.set(self.pending.get().saturating_sub(1));
            log::warn!("ui task queue worker is gone; job dropped");
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.get() == 0
    }

    /// Resolves once every job queued so far (and any queued meanwhile) ran.
    pub async fn idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}
