//! Signal/slot primitives with scoped connections
//!
//! A [`Signal`] fans a value out to connected slots. `connect` hands back a
//! [`Connection`] that removes the slot when dropped, and a [`DisposeBag`]
//! collects the connections of one owner so they are released together,
//! exactly once.

use crate::{GuiError, GuiResult};
use std::sync::{Arc, Mutex};

type Slot<T> = Arc<dyn Fn(T) + Send + Sync>;

struct SignalInner<T> {
    slots: Vec<(u64, Slot<T>)>,
    next_id: u64,
    /// Last emitted value, kept only for behaviour signals.
    value: Option<T>,
    replay: bool,
}

/// Typed signal shared between an owner that emits and any number of slots.
///
/// Event signals (`new`) only deliver future emissions. Behaviour signals
/// (`with_value`) hold a current value and replay it to every new slot.
pub struct Signal<T: Clone + Send + 'static> {
    inner: Arc<Mutex<SignalInner<T>>>,
}

impl<T: Clone + Send + 'static> Signal<T> {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    pub fn with_value(value: T) -> Self {
        Self::build(Some(value), true)
    }

    fn build(value: Option<T>, replay: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SignalInner {
                slots: Vec::new(),
                next_id: 0,
                value,
                replay,
            })),
        }
    }

    /// Connect a slot. A behaviour signal calls it with the current value
    /// before returning.
    pub fn connect<F>(&self, slot: F) -> GuiResult<Connection>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let slot: Slot<T> = Arc::new(slot);
        let (id, current) = {
            let mut inner = self.lock()?;
            let id = inner.next_id;
            inner.next_id += 1;
            inner.slots.push((id, Arc::clone(&slot)));
            let current = if inner.replay { inner.value.clone() } else { None };
            (id, current)
        };

        if let Some(value) = current {
            slot(value);
        }

        let weak = Arc::downgrade(&self.inner);
        Ok(Connection::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.slots.retain(|(slot_id, _)| *slot_id != id);
                }
            }
        }))
    }

    /// Deliver `value` to every connected slot.
    pub fn emit(&self, value: T) -> GuiResult<()> {
        // Slots run outside the lock so they may connect or emit themselves.
        let slots: Vec<Slot<T>> = {
            let mut inner = self.lock()?;
            if inner.replay {
                inner.value = Some(value.clone());
            }
            inner.slots.iter().map(|(_, slot)| Arc::clone(slot)).collect()
        };

        for slot in slots {
            slot(value.clone());
        }
        Ok(())
    }

    /// Current value of a behaviour signal, `None` for event signals.
    pub fn value(&self) -> GuiResult<Option<T>> {
        Ok(self.lock()?.value.clone())
    }

    pub fn connection_count(&self) -> usize {
        self.lock().map_or(0, |inner| inner.slots.len())
    }

    fn lock(&self) -> GuiResult<std::sync::MutexGuard<'_, SignalInner<T>>> {
        self.inner
            .lock()
            .map_err(|e| GuiError::State(format!("Failed to lock signal slots: {e}")))
    }
}

impl<T: Clone + Send + 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle of one connected slot; disconnects on drop.
pub struct Connection {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Connection {
    fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn disconnect(mut self) {
        self.release();
    }

    pub const fn is_connected(&self) -> bool {
        self.release.is_some()
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.release();
    }
}

/// Disposers owned by one controller instance.
#[derive(Default)]
pub struct DisposeBag {
    disposers: Vec<Box<dyn FnOnce() + Send>>,
    disposed: bool,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disposer. Once the bag is disposed it runs immediately.
    pub fn add(&mut self, disposer: impl FnOnce() + Send + 'static) {
        if self.disposed {
            disposer();
        } else {
            self.disposers.push(Box::new(disposer));
        }
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.add(move || connection.disconnect());
    }

    /// Run every disposer, newest first. Returns how many ran; a second call
    /// runs none.
    pub fn dispose(&mut self) -> usize {
        self.disposed = true;
        let count = self.disposers.len();
        while let Some(disposer) = self.disposers.pop() {
            disposer();
        }
        count
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}
