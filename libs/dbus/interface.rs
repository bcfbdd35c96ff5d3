use std::sync::{Arc, MutexGuard};

use sugar_activity::{lock, Activity, PresenceService, SharedActivity};
use tracing::{trace, warn};
use zbus::interface;
use zvariant::Optional;

/// Object served at the activity path.
///
/// Kept separate from `Activity` so only the methods below cross the bus. Each
/// call holds the activity lock until it returns, calls never overlap.
pub struct ActivityDbusService {
    activity: SharedActivity,
    presence: Arc<dyn PresenceService>,
}

impl ActivityDbusService {
    pub fn new(activity: SharedActivity, presence: Arc<dyn PresenceService>) -> Self {
        Self { activity, presence }
    }

    fn activity(&self) -> MutexGuard<'_, Activity> {
        lock(&self.activity)
    }
}

#[interface(name = "org.laptop.Activity")]
impl ActivityDbusService {
    /// Start the activity in unshared mode.
    #[zbus(name = "start")]
    fn start(&self, activity_id: String) {
        trace!("start({activity_id})");
        self.activity().start(activity_id);
    }

    /// Join the activity specified by its presence service path.
    #[zbus(name = "join")]
    fn join(&self, activity_ps_path: String) {
        trace!("join({activity_ps_path})");
        match self.presence.get_activity(&activity_ps_path) {
            Some(remote) => self.activity().join(remote.as_ref()),
            None => warn!("No activity known to the presence service at {activity_ps_path}"),
        }
    }

    /// Called by the shell to request the activity to share itself on the network.
    #[zbus(name = "share")]
    fn share(&self) {
        trace!("share()");
        self.activity().share();
    }

    #[zbus(name = "get_id")]
    fn get_id(&self) -> Optional<String> {
        self.activity().get_id().map(str::to_owned).into()
    }

    #[zbus(name = "get_type")]
    fn get_type(&self) -> String {
        self.activity().get_type().to_owned()
    }

    /// Returns true if the activity is shared on the mesh.
    #[zbus(name = "get_shared")]
    fn get_shared(&self) -> bool {
        self.activity().get_shared()
    }

    #[zbus(name = "execute")]
    fn execute(&self, command: String, args: Vec<String>) -> bool {
        trace!("execute({command}, {args:?})");
        self.activity().execute(&command, &args)
    }
}
