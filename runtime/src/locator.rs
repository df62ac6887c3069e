//! Typed paths from a root model to a nested field.
//!
//! Generated locator structs carry one field per reachable object or list
//! property, each a [`ModelLocator`] or [`ListModelLocator`] built from a pair
//! of non-capturing accessor closures.

use std::fmt;
use std::marker::PhantomData;

use crate::list::ModelList;
use crate::model::Model;

/// Addresses a `Target` inside a root of type `S`.
pub trait Locate<S> {
    type Target;

    fn locate<'a>(&self, root: &'a S) -> Option<&'a Self::Target>;
    fn locate_mut<'a>(&self, root: &'a mut S) -> Option<&'a mut Self::Target>;

    /// Continue from this locator's target with `next`.
    fn then<L>(self, next: L) -> Redirect<Self, L>
    where
        Self: Sized,
        L: Locate<Self::Target>,
    {
        Redirect { first: self, second: next }
    }
}

/// Locator over a pair of accessor functions.
pub struct ModelLocator<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> ModelLocator<S, T> {
    pub fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }
}

impl<S, T> Locate<S> for ModelLocator<S, T> {
    type Target = T;

    fn locate<'a>(&self, root: &'a S) -> Option<&'a T> {
        Some((self.get)(root))
    }

    fn locate_mut<'a>(&self, root: &'a mut S) -> Option<&'a mut T> {
        Some((self.get_mut)(root))
    }
}

impl<S, T> Clone for ModelLocator<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for ModelLocator<S, T> {}

impl<S, T> fmt::Debug for ModelLocator<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelLocator")
            .field("root", &std::any::type_name::<S>())
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

/// Locator for a list property; its target is the [`ModelList`] itself.
/// Use [`LocateEntry::entry`] to go one level further.
pub struct ListModelLocator<S, E: Model> {
    inner: ModelLocator<S, ModelList<E>>,
}

impl<S, E: Model> ListModelLocator<S, E> {
    pub fn new(
        get: fn(&S) -> &ModelList<E>,
        get_mut: fn(&mut S) -> &mut ModelList<E>,
    ) -> Self {
        Self { inner: ModelLocator::new(get, get_mut) }
    }
}

impl<S, E: Model> Locate<S> for ListModelLocator<S, E> {
    type Target = ModelList<E>;

    fn locate<'a>(&self, root: &'a S) -> Option<&'a ModelList<E>> {
        self.inner.locate(root)
    }

    fn locate_mut<'a>(&self, root: &'a mut S) -> Option<&'a mut ModelList<E>> {
        self.inner.locate_mut(root)
    }
}

impl<S, E: Model> Clone for ListModelLocator<S, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E: Model> Copy for ListModelLocator<S, E> {}

impl<S, E: Model> fmt::Debug for ListModelLocator<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListModelLocator")
            .field("root", &std::any::type_name::<S>())
            .field("entry", &std::any::type_name::<E>())
            .finish()
    }
}

/// Two locators applied one after the other.
#[derive(Debug, Clone, Copy)]
pub struct Redirect<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> Locate<S> for Redirect<A, B>
where
    A: Locate<S>,
    A::Target: 'static,
    B: Locate<A::Target>,
{
    type Target = B::Target;

    fn locate<'a>(&self, root: &'a S) -> Option<&'a B::Target> {
        let middle = self.first.locate(root)?;
        self.second.locate(middle)
    }

    fn locate_mut<'a>(&self, root: &'a mut S) -> Option<&'a mut B::Target> {
        let middle = self.first.locate_mut(root)?;
        self.second.locate_mut(middle)
    }
}

/// Borrowed locators compose too, e.g. a nested locator held in a static.
impl<S, L> Locate<S> for &L
where
    L: Locate<S> + ?Sized,
{
    type Target = L::Target;

    fn locate<'a>(&self, root: &'a S) -> Option<&'a L::Target> {
        (**self).locate(root)
    }

    fn locate_mut<'a>(&self, root: &'a mut S) -> Option<&'a mut L::Target> {
        (**self).locate_mut(root)
    }
}

/// Addresses one entry of a [`ModelList`] by position.
pub struct EntryLocator<E> {
    index: usize,
    entry: PhantomData<fn() -> E>,
}

impl<E> EntryLocator<E> {
    pub fn new(index: usize) -> Self {
        Self { index, entry: PhantomData }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<E: Model> Locate<ModelList<E>> for EntryLocator<E> {
    type Target = E;

    fn locate<'a>(&self, list: &'a ModelList<E>) -> Option<&'a E> {
        list.get(self.index)
    }

    fn locate_mut<'a>(&self, list: &'a mut ModelList<E>) -> Option<&'a mut E> {
        list.get_mut(self.index)
    }
}

impl<E> Clone for EntryLocator<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EntryLocator<E> {}

impl<E> fmt::Debug for EntryLocator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntryLocator").field(&self.index).finish()
    }
}

/// `.entry(i)` on anything that locates a list.
pub trait LocateEntry<S, E: Model>: Locate<S, Target = ModelList<E>> + Sized {
    fn entry(self, index: usize) -> Redirect<Self, EntryLocator<E>> {
        self.then(EntryLocator::new(index))
    }
}

impl<S, E: Model, L> LocateEntry<S, E> for L where L: Locate<S, Target = ModelList<E>> {}
