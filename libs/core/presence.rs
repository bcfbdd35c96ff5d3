//! Contract of the presence service, the subsystem that advertises and
//! discovers activities on the local network.
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenceError {
    #[error("service {0} is not registered")]
    UnknownService(u64),

    #[error("presence service is unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PresenceError>;

/// A network service advertised by an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAdvertisement {
    pub name: String,
    pub stype: String,
    pub activity_id: Option<String>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub published_values: HashMap<String, String>,
}

/// What to publish through `PresenceService::share_activity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareRequest {
    pub activity_id: Option<String>,
    pub stype: String,
    pub properties: HashMap<String, String>,
    pub address: Option<String>,
    pub port: Option<u16>,
}

impl ShareRequest {
    /// Publish a fresh service of type `stype`.
    pub fn new(activity_id: Option<String>, stype: impl Into<String>) -> Self {
        Self {
            activity_id,
            stype: stype.into(),
            ..Default::default()
        }
    }

    /// Publish a local copy of a service found on the network.
    pub fn republish(activity_id: Option<String>, service: &ServiceAdvertisement) -> Self {
        Self {
            activity_id,
            stype: service.stype.clone(),
            properties: service.published_values.clone(),
            address: service.address.clone(),
            port: service.port,
        }
    }
}

/// A service published by this process, needed to unregister it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    pub key: u64,
    pub service: ServiceAdvertisement,
}

/// An activity shared by someone else on the network.
pub trait RemoteActivity: Send + Sync {
    fn id(&self) -> String;

    /// Services of type `stype` advertised by the activity, in the order the
    /// presence service knows them.
    fn services_of_type(&self, stype: &str) -> Vec<ServiceAdvertisement>;
}

pub trait PresenceService: Send + Sync {
    /// Resolve the presence path of a remote activity.
    fn get_activity(&self, path: &str) -> Option<Arc<dyn RemoteActivity>>;

    fn share_activity(&self, request: ShareRequest) -> Result<ServiceHandle>;

    fn unregister_service(&self, handle: &ServiceHandle) -> Result<()>;
}
