use sugar_activity::{attach_bus, lock, BusEndpoint, SharedActivity};
use thiserror::Error;
use tracing::{debug, info, warn};
use zbus::blocking::{connection, Connection};

use crate::{get_object_path, get_service_name, interface::ActivityDbusService};

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("the activity window must be realized before it can be exposed on the bus")]
    NotRealized,

    #[error("the activity has already been destroyed")]
    Destroyed,

    #[error("failed to build the D-Bus endpoint: {0}")]
    Bus(#[from] zbus::Error),
}

pub type Result<T> = std::result::Result<T, EndpointError>;

/// Session bus registration of one activity window.
///
/// Owned by the activity it serves, released by `sugar_activity::destroy`.
pub struct ActivityEndpoint {
    connection: Connection,
    name: String,
    path: String,
}

impl ActivityEndpoint {
    /// Expose `activity` on the session bus under the names derived from its
    /// window handle, then hand the endpoint over to the activity.
    pub fn register(activity: &SharedActivity) -> Result<()> {
        let (xid, presence) = {
            let activity = lock(activity);
            if activity.is_destroyed() {
                return Err(EndpointError::Destroyed);
            }
            let xid = activity.xid().ok_or(EndpointError::NotRealized)?;
            (xid, activity.presence())
        };

        let name = get_service_name(xid);
        let path = get_object_path(xid);
        let service = ActivityDbusService::new(activity.clone(), presence);

        let connection = connection::Builder::session()?
            .name(name.as_str())?
            .serve_at(path.as_str(), service)?
            .build()?;

        info!("Activity exposed on the session bus as {name} at {path}");

        attach_bus(
            activity,
            Box::new(Self {
                connection,
                name,
                path,
            }),
        );

        Ok(())
    }
}

impl BusEndpoint for ActivityEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn release(self: Box<Self>) {
        match self
            .connection
            .object_server()
            .remove::<ActivityDbusService, _>(self.path.as_str())
        {
            Ok(true) => debug!("Removed {} from the object server", self.path),
            Ok(false) => debug!("Removed the activity interface, {} still serves others", self.path),
            Err(zbus::Error::InterfaceNotFound) => debug!("{} was not served anymore", self.path),
            Err(e) => warn!("Failed to remove {} from the object server: {e}", self.path),
        }

        if let Err(e) = self.connection.release_name(self.name.as_str()) {
            warn!("Failed to release bus name {}: {e}", self.name);
        }

        info!("Activity endpoint {} released", self.name);
    }
}
