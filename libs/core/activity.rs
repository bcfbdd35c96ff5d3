use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

use crate::{
    bundle::BundleMetadata,
    host::{BusEndpoint, CommandExecutor, WindowHost},
    presence::{PresenceService, RemoteActivity, ServiceHandle, ShareRequest},
    SharedActivity,
};

/// Lifecycle of a single activity window.
///
/// The identifier is written once, by `start` or `join`. Sharing publishes the
/// default service of the bundle through the presence service; the
/// [`crate::destroy`] hook releases the bus endpoint and the published service.
#[derive(TypedBuilder)]
pub struct Activity {
    presence: Arc<dyn PresenceService>,
    bundle: Arc<dyn BundleMetadata>,
    window: Box<dyn WindowHost>,
    #[builder(default, setter(strip_option))]
    executor: Option<Box<dyn CommandExecutor>>,

    #[builder(default, setter(skip))]
    activity_id: Option<String>,
    #[builder(default, setter(skip))]
    shared: bool,
    #[builder(default, setter(skip))]
    service: Option<ServiceHandle>,
    #[builder(default, setter(skip))]
    bus: Option<Box<dyn BusEndpoint>>,
    #[builder(default, setter(skip))]
    destroyed: bool,
}

impl Activity {
    pub fn into_shared(self) -> SharedActivity {
        Arc::new(Mutex::new(self))
    }

    /// Start the activity in unshared mode.
    pub fn start(&mut self, activity_id: String) {
        if !self.accepts_identifier() {
            return;
        }

        info!("Starting activity {activity_id}");
        self.activity_id = Some(activity_id);
        self.window.present();
    }

    /// Join an activity shared on the network.
    ///
    /// The activity is marked shared even when the remote advertises no service
    /// of the default type; in that case no local copy gets published.
    pub fn join(&mut self, remote: &dyn RemoteActivity) {
        if !self.accepts_identifier() {
            return;
        }

        let activity_id = remote.id();
        info!("Joining activity {activity_id}");
        self.activity_id = Some(activity_id);
        self.shared = true;

        // The local default service is a copy of one found on the network.
        let default_type = self.bundle.default_type().to_owned();
        let services = remote.services_of_type(&default_type);
        match services.first() {
            Some(service) => {
                let request = ShareRequest::republish(self.activity_id.clone(), service);
                match self.presence.share_activity(request) {
                    Ok(handle) => self.service = Some(handle),
                    Err(e) => error!("Cannot republish service {}: {e}", service.name),
                }
            }
            None => error!("Cannot join the activity: no {default_type} service advertised"),
        }

        self.window.present();
    }

    /// Share the activity on the network.
    pub fn share(&mut self) {
        if self.destroyed {
            warn!("Cannot share a destroyed activity.");
            return;
        }
        if let Some(handle) = &self.service {
            warn!(
                "The activity is already shared as {}, not publishing it again.",
                handle.service.name
            );
            return;
        }

        debug!("Share activity {:?} on the network.", self.activity_id);

        let request = ShareRequest::new(self.activity_id.clone(), self.bundle.default_type());
        match self.presence.share_activity(request) {
            Ok(handle) => {
                self.service = Some(handle);
                self.shared = true;
            }
            Err(e) => error!("Cannot share the activity: {e}"),
        }
    }

    pub fn execute(&self, command: &str, args: &[String]) -> bool {
        match &self.executor {
            Some(executor) => executor.execute(command, args),
            None => false,
        }
    }

    pub fn get_id(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }

    pub fn get_shared(&self) -> bool {
        self.shared
    }

    pub fn get_type(&self) -> &str {
        self.bundle.service_name()
    }

    pub fn get_default_type(&self) -> &str {
        self.bundle.default_type()
    }

    pub fn service(&self) -> Option<&ServiceHandle> {
        self.service.as_ref()
    }

    pub fn xid(&self) -> Option<u32> {
        self.window.xid()
    }

    pub fn presence(&self) -> Arc<dyn PresenceService> {
        self.presence.clone()
    }

    pub fn bus(&self) -> Option<&dyn BusEndpoint> {
        self.bus.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Take ownership of the endpoint serving this activity.
    ///
    /// Returns the endpoint that must now be released: the replaced one, or
    /// `endpoint` itself when the activity is already destroyed. Release it
    /// after unlocking the activity, see [`crate::attach_bus`].
    #[must_use = "the returned endpoint is still registered on the bus"]
    pub fn attach_bus(&mut self, endpoint: Box<dyn BusEndpoint>) -> Option<Box<dyn BusEndpoint>> {
        if self.destroyed {
            warn!("Activity already destroyed, releasing {}", endpoint.name());
            return Some(endpoint);
        }
        let previous = self.bus.replace(endpoint);
        if let Some(previous) = &previous {
            warn!("Replacing bus endpoint {}", previous.name());
        }
        previous
    }

    /// First half of the teardown: mark the activity destroyed and hand back
    /// its bus endpoint. `None` once destroyed.
    #[must_use = "the returned endpoint is still registered on the bus"]
    pub(crate) fn detach_bus(&mut self) -> Option<Box<dyn BusEndpoint>> {
        if self.destroyed {
            debug!("Activity {:?} already destroyed", self.activity_id);
            return None;
        }
        self.destroyed = true;

        let bus = self.bus.take();
        if let Some(bus) = &bus {
            debug!("Detaching bus endpoint {}", bus.name());
        }
        bus
    }

    /// Second half of the teardown: unregister the published service.
    pub(crate) fn withdraw_service(&mut self) {
        if let Some(handle) = self.service.take() {
            if let Err(e) = self.presence.unregister_service(&handle) {
                error!("Cannot unregister service {}: {e}", handle.service.name);
            }
        }
    }

    fn accepts_identifier(&self) -> bool {
        if self.destroyed {
            warn!("The activity has been destroyed.");
            return false;
        }
        if self.activity_id.is_some() {
            warn!("The activity has been already started.");
            return false;
        }
        true
    }
}
