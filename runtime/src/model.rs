//! Dirty tracking and batched observer notification.
//!
//! Every model owns its children outright. The only link back up the tree is a
//! weak handle to the parent's [`ChangeNode`], used for nothing but bumping the
//! parent's child counter.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use crate::flags::ObservationFlags;
use crate::observer::{ModelObserver, ObserverFailure, ObserverId, log_observer_failure};

#[derive(Default)]
struct ChangeNode {
    self_change_id: Cell<u64>,
    child_change_id: Cell<u64>,
    parent: RefCell<Weak<ChangeNode>>,
}

impl ChangeNode {
    fn parent(&self) -> Option<Rc<ChangeNode>> {
        self.parent.borrow().upgrade()
    }

    fn notify_child_changed(&self) {
        bump(&self.child_change_id);
        let mut next = self.parent();
        while let Some(node) = next {
            bump(&node.child_change_id);
            next = node.parent();
        }
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().wrapping_add(1));
}

/// State every observable model embeds: change counters, the last values
/// reported to observers, the observer list and the parent handle.
pub struct ModelBase<T> {
    node: Rc<ChangeNode>,
    last_reported_self_change_id: u64,
    last_reported_child_change_id: u64,
    observers: Vec<(ObserverId, Box<dyn ModelObserver<T>>)>,
}

impl<T> ModelBase<T> {
    pub fn new() -> Self {
        Self {
            node: Rc::new(ChangeNode::default()),
            last_reported_self_change_id: 0,
            last_reported_child_change_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn self_change_id(&self) -> u64 {
        self.node.self_change_id.get()
    }

    pub fn child_change_id(&self) -> u64 {
        self.node.child_change_id.get()
    }

    /// True when either counter moved since the last notification pass.
    pub fn is_dirty(&self) -> bool {
        self.self_change_id() != self.last_reported_self_change_id
            || self.child_change_id() != self.last_reported_child_change_id
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn has_parent(&self) -> bool {
        self.node.parent().is_some()
    }

    /// Record a direct field write on this instance.
    pub fn self_changed(&self) {
        bump(&self.node.self_change_id);
    }

    /// Propagate "a child changed" to the parent and every ancestor above it.
    pub fn notify_parent(&self) {
        if let Some(parent) = self.node.parent() {
            parent.notify_child_changed();
        }
    }

    /// Bump the self counter without a field write; the base case of
    /// [`Model::force_mark_dirty`].
    pub fn mark_dirty(&self) {
        bump(&self.node.self_change_id);
    }

    /// Make `parent` the instance notified when this one changes.
    pub fn attach_to<P>(&self, parent: &ModelBase<P>) {
        *self.node.parent.borrow_mut() = Rc::downgrade(&parent.node);
    }

    pub fn detach_parent(&self) {
        *self.node.parent.borrow_mut() = Weak::new();
    }

    fn pending_flags(&self, force: bool) -> ObservationFlags {
        if force {
            return ObservationFlags::ALL;
        }
        let mut flags = ObservationFlags::NONE;
        if self.child_change_id() != self.last_reported_child_change_id {
            flags |= ObservationFlags::CHILDREN;
        }
        if self.self_change_id() != self.last_reported_self_change_id {
            flags |= ObservationFlags::SELF;
        }
        flags
    }

    fn mark_reported(&mut self) {
        self.last_reported_child_change_id = self.child_change_id();
        self.last_reported_self_change_id = self.self_change_id();
    }

    /// Move observers, parent handle and counters into `other`, leaving this
    /// instance detached. `other`'s self counter ends up one past ours so the
    /// next pass reports it.
    fn transfer_into(&mut self, other: &mut ModelBase<T>) {
        other.observers = mem::take(&mut self.observers);
        other.node.self_change_id.set(self.self_change_id().wrapping_add(1));
        other.last_reported_self_change_id = self.last_reported_self_change_id;
        other.node.child_change_id.set(self.child_change_id());
        other.last_reported_child_change_id = self.last_reported_child_change_id;
        let parent = self.node.parent.replace(Weak::new());
        *other.node.parent.borrow_mut() = parent;
    }
}

impl<T> Default for ModelBase<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ModelBase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBase")
            .field("self_change_id", &self.self_change_id())
            .field("child_change_id", &self.child_change_id())
            .field("last_reported_self_change_id", &self.last_reported_self_change_id)
            .field("last_reported_child_change_id", &self.last_reported_child_change_id)
            .field("observers", &self.observers.len())
            .field("has_parent", &self.has_parent())
            .finish()
    }
}

/// Capability shared by every generated model type (and [`crate::ModelList`]).
pub trait Model: Sized + 'static {
    fn base(&self) -> &ModelBase<Self>;
    fn base_mut(&mut self) -> &mut ModelBase<Self>;

    /// Mark dirty regardless of counters. Generated types override this to
    /// cascade into their object and list children.
    fn force_mark_dirty(&mut self) {
        self.base().mark_dirty();
    }

    /// Forward a notification pass to children. Generated types override this.
    fn invoke_callbacks_on_children(
        &mut self,
        force: bool,
        on_error: &mut dyn FnMut(ObserverFailure),
    ) {
        let _ = (force, on_error);
    }

    /// Register an observer. It is invoked once immediately with
    /// [`ObservationFlags::ALL`]; a failure there is logged.
    fn register_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: ModelObserver<Self> + 'static,
    {
        let id = ObserverId::next();
        let mut observer: Box<dyn ModelObserver<Self>> = Box::new(observer);
        if let Err(error) = observer.on_model_updated(self, ObservationFlags::ALL) {
            log_observer_failure(ObserverFailure { observer: id, error });
        }
        self.base_mut().observers.push((id, observer));
        id
    }

    fn deregister_observer(&mut self, id: ObserverId) -> bool {
        let observers = &mut self.base_mut().observers;
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    /// Run one notification pass over this instance and everything below it.
    ///
    /// Unless `force` is set, a clean instance returns immediately. Children
    /// settle first. Each observer runs independently: a failing observer is
    /// reported through `on_error` and the pass continues.
    fn invoke_model_updated_callbacks(
        &mut self,
        force: bool,
        on_error: &mut dyn FnMut(ObserverFailure),
    ) {
        if !force && !self.base().is_dirty() {
            return;
        }

        self.invoke_callbacks_on_children(force, on_error);

        if !self.base().observers.is_empty() {
            let flags = self.base().pending_flags(force);
            let mut observers = mem::take(&mut self.base_mut().observers);
            for (id, observer) in observers.iter_mut() {
                if let Err(error) = observer.on_model_updated(self, flags) {
                    on_error(ObserverFailure { observer: *id, error });
                }
            }
            self.base_mut().observers = observers;
        }

        self.base_mut().mark_reported();
    }

    /// Hand this instance's observers, parent and counters over to `other`.
    fn transfer_internals(&mut self, other: &mut Self) {
        self.base_mut().transfer_into(other.base_mut());
        other.force_mark_dirty();
    }
}

/// Replace the model in `slot` with `value` by transplantation and return the
/// detached previous instance.
pub fn transplant<M: Model>(slot: &mut M, mut value: M) -> M {
    slot.transfer_internals(&mut value);
    mem::replace(slot, value)
}
