//! In-process presence registry.
//!
//! Stands in for the network presence service when none is reachable: remote
//! activities are announced by hand and published services only live in
//! memory.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::presence::{
    PresenceError, PresenceService, RemoteActivity, Result, ServiceAdvertisement, ServiceHandle,
    ShareRequest,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteActivityRecord {
    pub id: String,
    pub services: Vec<ServiceAdvertisement>,
}

impl RemoteActivityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: ServiceAdvertisement) -> Self {
        self.services.push(service);
        self
    }
}

impl RemoteActivity for RemoteActivityRecord {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn services_of_type(&self, stype: &str) -> Vec<ServiceAdvertisement> {
        self.services
            .iter()
            .filter(|service| service.stype == stype)
            .cloned()
            .collect()
    }
}

#[derive(Default)]
pub struct LocalPresence {
    activities: DashMap<String, Arc<RemoteActivityRecord>>,
    published: DashMap<u64, ServiceAdvertisement>,
    next_key: AtomicU64,
}

impl LocalPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a remote activity resolvable under `path`.
    pub fn announce(&self, path: impl Into<String>, activity: RemoteActivityRecord) {
        let path = path.into();
        debug!("Announcing activity {} at {path}", activity.id);
        self.activities.insert(path, Arc::new(activity));
    }

    pub fn withdraw(&self, path: &str) -> bool {
        self.activities.remove(path).is_some()
    }

    /// Services currently published, ordered by registration.
    pub fn published(&self) -> Vec<ServiceHandle> {
        let mut handles: Vec<ServiceHandle> = self
            .published
            .iter()
            .map(|entry| ServiceHandle {
                key: *entry.key(),
                service: entry.value().clone(),
            })
            .collect();
        handles.sort_by_key(|handle| handle.key);
        handles
    }

    pub fn is_published(&self, handle: &ServiceHandle) -> bool {
        self.published.contains_key(&handle.key)
    }
}

impl PresenceService for LocalPresence {
    fn get_activity(&self, path: &str) -> Option<Arc<dyn RemoteActivity>> {
        self.activities
            .get(path)
            .map(|entry| entry.value().clone() as Arc<dyn RemoteActivity>)
    }

    fn share_activity(&self, request: ShareRequest) -> Result<ServiceHandle> {
        let key = self.next_key.fetch_add(1, Ordering::SeqCst);
        let name = match &request.activity_id {
            Some(id) => format!("{id}-{key}"),
            None => format!("service-{key}"),
        };

        let service = ServiceAdvertisement {
            name,
            stype: request.stype,
            activity_id: request.activity_id,
            address: request.address,
            port: request.port,
            published_values: request.properties,
        };
        trace!("Publishing {service:?}");
        self.published.insert(key, service.clone());

        Ok(ServiceHandle { key, service })
    }

    fn unregister_service(&self, handle: &ServiceHandle) -> Result<()> {
        self.published
            .remove(&handle.key)
            .map(|_| ())
            .ok_or(PresenceError::UnknownService(handle.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_service(name: &str) -> ServiceAdvertisement {
        ServiceAdvertisement {
            name: name.to_string(),
            stype: "_chat_olpc._udp".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_services_of_type_keeps_announced_order() {
        let record = RemoteActivityRecord::new("a1b2")
            .with_service(chat_service("first"))
            .with_service(ServiceAdvertisement {
                name: "other".to_string(),
                stype: "_sketch_olpc._udp".to_string(),
                ..Default::default()
            })
            .with_service(chat_service("second"));

        let names: Vec<String> = record
            .services_of_type("_chat_olpc._udp")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(record.services_of_type("_web_olpc._udp").is_empty());
    }

    #[test]
    fn test_announce_and_resolve() {
        let presence = LocalPresence::new();
        presence.announce("/org/laptop/Presence/Activities/1", RemoteActivityRecord::new("a1b2"));

        let remote = presence.get_activity("/org/laptop/Presence/Activities/1");
        assert_eq!(remote.map(|r| r.id()), Some("a1b2".to_string()));
        assert!(presence.get_activity("/org/laptop/Presence/Activities/2").is_none());

        assert!(presence.withdraw("/org/laptop/Presence/Activities/1"));
        assert!(presence.get_activity("/org/laptop/Presence/Activities/1").is_none());
    }

    #[test]
    fn test_share_and_unregister() -> eyre::Result<()> {
        let presence = LocalPresence::new();
        let first = presence.share_activity(ShareRequest::new(Some("a1b2".into()), "_chat_olpc._udp"))?;
        let second = presence.share_activity(ShareRequest::new(None, "_chat_olpc._udp"))?;

        assert_ne!(first.key, second.key);
        assert_eq!(first.service.activity_id.as_deref(), Some("a1b2"));
        assert_eq!(presence.published(), vec![first.clone(), second.clone()]);

        presence.unregister_service(&first)?;
        assert!(!presence.is_published(&first));
        assert!(presence.is_published(&second));

        assert_eq!(
            presence.unregister_service(&first),
            Err(PresenceError::UnknownService(first.key))
        );
        Ok(())
    }

    #[test]
    fn test_republish_copies_the_advertisement() -> eyre::Result<()> {
        let presence = LocalPresence::new();
        let remote = ServiceAdvertisement {
            name: "remote".to_string(),
            stype: "_chat_olpc._udp".to_string(),
            activity_id: Some("a1b2".to_string()),
            address: Some("224.0.0.12".to_string()),
            port: Some(6312),
            published_values: [("title".to_string(), "Chat".to_string())].into(),
        };

        let handle = presence.share_activity(ShareRequest::republish(Some("a1b2".into()), &remote))?;
        assert_eq!(handle.service.address, remote.address);
        assert_eq!(handle.service.port, remote.port);
        assert_eq!(handle.service.published_values, remote.published_values);
        assert_eq!(handle.service.stype, remote.stype);
        Ok(())
    }
}
