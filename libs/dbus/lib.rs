//! D-Bus exposure of an activity.
//!
//! Every activity window owns the well-known name `org.laptop.Activity<xid>`
//! and serves the `org.laptop.Activity` interface at
//! `/org/laptop/Activity/<xid>`, `xid` being the numeric handle of its window.
pub mod endpoint;
pub mod interface;
pub mod proxy;

pub use endpoint::{ActivityEndpoint, EndpointError};
pub use interface::ActivityDbusService;
pub use proxy::{get_service, ActivityServiceProxy, ActivityServiceProxyBlocking};

pub use zbus;
pub use zvariant;

pub const ACTIVITY_SERVICE_NAME: &str = "org.laptop.Activity";
pub const ACTIVITY_SERVICE_PATH: &str = "/org/laptop/Activity";
pub const ACTIVITY_INTERFACE: &str = "org.laptop.Activity";

/// Well-known bus name of the activity shown in window `xid`.
pub fn get_service_name(xid: u32) -> String {
    format!("{ACTIVITY_SERVICE_NAME}{xid}")
}

/// Object path of the activity shown in window `xid`.
pub fn get_object_path(xid: u32) -> String {
    format!("{ACTIVITY_SERVICE_PATH}/{xid}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbus::names::WellKnownName;
    use zvariant::ObjectPath;

    #[test]
    fn test_names_derive_from_xid() {
        assert_eq!(get_service_name(42), format!("{ACTIVITY_SERVICE_NAME}42"));
        assert_eq!(get_object_path(42), format!("{ACTIVITY_SERVICE_PATH}/42"));
        assert_eq!(get_service_name(42), "org.laptop.Activity42");
        assert_eq!(get_object_path(42), "/org/laptop/Activity/42");
    }

    #[test]
    fn test_names_are_distinct_per_window() {
        assert_ne!(get_service_name(1), get_service_name(12));
        assert_ne!(get_object_path(1), get_object_path(12));
        assert_eq!(get_service_name(0), "org.laptop.Activity0");
        assert_eq!(get_object_path(u32::MAX), "/org/laptop/Activity/4294967295");
    }

    #[test]
    fn test_names_are_valid_on_the_bus() {
        for xid in [0, 7, 12345, u32::MAX] {
            let name = get_service_name(xid);
            let path = get_object_path(xid);
            assert!(WellKnownName::try_from(name.as_str()).is_ok());
            assert!(ObjectPath::try_from(path.as_str()).is_ok());
        }
    }
}
