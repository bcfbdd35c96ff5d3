use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

mod activity;
mod bundle;
mod host;
pub mod local_presence;
pub mod presence;

pub use activity::Activity;
pub use bundle::BundleMetadata;
pub use host::{BusEndpoint, CommandExecutor, WindowHost};
pub use local_presence::{LocalPresence, RemoteActivityRecord};
pub use presence::{
    PresenceError, PresenceService, RemoteActivity, ServiceAdvertisement, ServiceHandle,
    ShareRequest,
};

/// An activity shared between its owner and the bus object that serves it.
pub type SharedActivity = Arc<Mutex<Activity>>;

/// Lock a shared activity.
///
/// A panic while the lock was held leaves the record in a consistent state
/// (every transition is a handful of field writes), so poisoning is ignored.
pub fn lock(activity: &SharedActivity) -> MutexGuard<'_, Activity> {
    activity.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hand `endpoint` over to the activity it serves.
///
/// A replaced endpoint, or `endpoint` itself when the activity is already
/// destroyed, is released once the activity is unlocked.
pub fn attach_bus(activity: &SharedActivity, endpoint: Box<dyn BusEndpoint>) {
    let stale = lock(activity).attach_bus(endpoint);
    if let Some(stale) = stale {
        stale.release();
    }
}

/// Teardown hook of the activity window. Safe to call more than once.
///
/// Releases the bus endpoint, then unregisters the published service. The
/// endpoint is released without holding the lock: a bus call blocked on the
/// activity has to complete before the bus can answer the release.
pub fn destroy(activity: &SharedActivity) {
    let endpoint = lock(activity).detach_bus();
    if let Some(endpoint) = endpoint {
        endpoint.release();
    }
    lock(activity).withdraw_service();
}
