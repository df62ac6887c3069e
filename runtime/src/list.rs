use std::fmt;
use std::ops::{Index, IndexMut};

use crate::model::{Model, ModelBase};
use crate::observer::ObserverFailure;

/// Observable, ordered collection of child models.
///
/// Entries are attached to the list's change node when they enter and
/// detached when they leave. Structural mutations mark the list itself
/// changed and notify whoever owns the list.
pub struct ModelList<T: Model> {
    base: ModelBase<ModelList<T>>,
    entries: Vec<T>,
}

impl<T: Model> ModelList<T> {
    pub fn new() -> Self {
        Self { base: ModelBase::new(), entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn push(&mut self, value: T) {
        value.base().attach_to(&self.base);
        self.entries.push(value);
        self.changed();
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        value.base().attach_to(&self.base);
        self.entries.insert(index, value);
        self.changed();
    }

    /// Remove and return the entry at `index`, detached from this list.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let value = self.entries.remove(index);
        value.base().detach_parent();
        self.changed();
        value
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.entries.pop()?;
        value.base().detach_parent();
        self.changed();
        Some(value)
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        for value in self.entries.drain(..) {
            value.base().detach_parent();
        }
        self.changed();
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let before = self.entries.len();
        self.entries.retain(|value| {
            let kept = keep(value);
            if !kept {
                value.base().detach_parent();
            }
            kept
        });
        if self.entries.len() != before {
            self.changed();
        }
    }

    fn changed(&self) {
        self.base.self_changed();
        self.base.notify_parent();
    }
}

impl<T: Model + Default> ModelList<T> {
    pub fn push_default(&mut self) -> &mut T {
        let index = self.entries.len();
        self.insert_default(index)
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_default(&mut self, index: usize) -> &mut T {
        self.insert(index, T::default());
        &mut self.entries[index]
    }

    /// Grow with default entries or truncate (detaching the removed tail).
    pub fn set_len(&mut self, len: usize) {
        let current = self.entries.len();
        if len == current {
            return;
        }
        if len < current {
            for value in self.entries.drain(len..) {
                value.base().detach_parent();
            }
        } else {
            for _ in current..len {
                let value = T::default();
                value.base().attach_to(&self.base);
                self.entries.push(value);
            }
        }
        self.changed();
    }
}

impl<T: Model> Model for ModelList<T> {
    fn base(&self) -> &ModelBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase<Self> {
        &mut self.base
    }

    fn invoke_callbacks_on_children(
        &mut self,
        force: bool,
        on_error: &mut dyn FnMut(ObserverFailure),
    ) {
        for entry in self.entries.iter_mut() {
            entry.invoke_model_updated_callbacks(force, on_error);
        }
    }
}

impl<T: Model> Default for ModelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Model> Extend<T> for ModelList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.entries.len();
        for value in iter {
            value.base().attach_to(&self.base);
            self.entries.push(value);
        }
        if self.entries.len() != before {
            self.changed();
        }
    }
}

impl<T: Model> Index<usize> for ModelList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.entries[index]
    }
}

impl<T: Model> IndexMut<usize> for ModelList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.entries[index]
    }
}

impl<'a, T: Model> IntoIterator for &'a ModelList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a, T: Model> IntoIterator for &'a mut ModelList<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}

impl<T: Model + fmt::Debug> fmt::Debug for ModelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T: Model + PartialEq> PartialEq for ModelList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
