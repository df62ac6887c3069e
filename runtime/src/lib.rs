//! Runtime support for code generated by `mdlc`.
//!
//! Models form an ownership tree. Writes bump change counters that propagate
//! to ancestors through weak handles; observers are notified in batches when
//! the owner calls [`Model::invoke_model_updated_callbacks`].

pub mod action;
pub mod flags;
pub mod list;
pub mod locator;
pub mod model;
pub mod observer;

pub use action::Action;
pub use flags::ObservationFlags;
pub use list::ModelList;
pub use locator::{EntryLocator, ListModelLocator, Locate, LocateEntry, ModelLocator, Redirect};
pub use model::{Model, ModelBase, transplant};
pub use observer::{ModelObserver, ObserverFailure, ObserverId, log_observer_failure};

/// Marker for models declared with `@BindTarget`; each one gets a root
/// locator in generated code.
pub trait BindTarget: Model {}

pub mod prelude {
    pub use crate::{
        Action, BindTarget, ListModelLocator, Locate, LocateEntry, Model, ModelList, ModelLocator,
        ObservationFlags, log_observer_failure,
    };
}
