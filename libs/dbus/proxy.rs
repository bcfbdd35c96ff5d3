//! Client side of the `org.laptop.Activity` interface, used by the shell to
//! drive an activity from another process.
use zbus::blocking::Connection;
use zvariant::Optional;

use crate::{get_object_path, get_service_name};

#[zbus::proxy(interface = "org.laptop.Activity")]
pub trait ActivityService {
    #[zbus(name = "start")]
    fn start(&self, activity_id: &str) -> zbus::Result<()>;

    #[zbus(name = "join")]
    fn join(&self, activity_ps_path: &str) -> zbus::Result<()>;

    #[zbus(name = "share")]
    fn share(&self) -> zbus::Result<()>;

    /// Empty when the activity has not been started.
    #[zbus(name = "get_id")]
    fn get_id(&self) -> zbus::Result<Optional<String>>;

    #[zbus(name = "get_type")]
    fn get_type(&self) -> zbus::Result<String>;

    #[zbus(name = "get_shared")]
    fn get_shared(&self) -> zbus::Result<bool>;

    #[zbus(name = "execute")]
    fn execute(&self, command: &str, args: &[String]) -> zbus::Result<bool>;
}

/// Proxy to the activity exposed by window `xid`.
pub fn get_service(
    connection: &Connection,
    xid: u32,
) -> zbus::Result<ActivityServiceProxyBlocking<'static>> {
    ActivityServiceProxyBlocking::builder(connection)
        .destination(get_service_name(xid))?
        .path(get_object_path(xid))?
        .build()
}
