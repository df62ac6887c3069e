use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::flags::ObservationFlags;

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by registration, used to deregister later.
///
/// Ids are process-unique so they stay valid when observers move to another
/// instance during transplantation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn next() -> Self {
        Self(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Receives batched update notifications for a model of type `T`.
pub trait ModelObserver<T> {
    fn on_model_updated(&mut self, model: &T, flags: ObservationFlags) -> anyhow::Result<()>;
}

impl<T, F> ModelObserver<T> for F
where
    F: FnMut(&T, ObservationFlags) -> anyhow::Result<()>,
{
    fn on_model_updated(&mut self, model: &T, flags: ObservationFlags) -> anyhow::Result<()> {
        self(model, flags)
    }
}

/// One observer failed during a notification pass.
///
/// The pass itself continues; the failure is handed to the caller's
/// error callback.
#[derive(Debug, thiserror::Error)]
#[error("observer {observer} failed: {error:#}")]
pub struct ObserverFailure {
    pub observer: ObserverId,
    pub error: anyhow::Error,
}

/// Default failure handler: log and keep going.
pub fn log_observer_failure(failure: ObserverFailure) {
    tracing::error!(observer = %failure.observer, error = %format!("{:#}", failure.error), "model observer failed");
}
