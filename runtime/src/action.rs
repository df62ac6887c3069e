use std::fmt;
use std::rc::Rc;

/// A callback slot stored as a model property.
///
/// Two actions are equal when they hold the same closure allocation (or are
/// both empty), so re-assigning the same action does not count as a change.
pub struct Action<T = ()>(Option<Rc<dyn Fn(&T)>>);

impl<T> Action<T> {
    pub fn new(callback: impl Fn(&T) + 'static) -> Self {
        Self(Some(Rc::new(callback)))
    }

    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Run the callback if one is set; returns whether it ran.
    pub fn invoke(&self, argument: &T) -> bool {
        match &self.0 {
            Some(callback) => {
                callback(argument);
                true
            }
            None => false,
        }
    }
}

impl Action<()> {
    pub fn fire(&self) -> bool {
        self.invoke(&())
    }
}

impl<T> Default for Action<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for Action<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Action(set)" } else { "Action(empty)" })
    }
}
