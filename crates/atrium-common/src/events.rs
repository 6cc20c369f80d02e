use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::WindowId;

/// Events raised by host capabilities and the window lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostEvent {
    ThemeChanged(String),
    SidebarVisibilityChanged(bool),
    WorkspaceChanged(String),
    EnvUpdated { name: String, value: String },
    WindowCreated(WindowId),
    WindowDestroyed(WindowId),
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<HostEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: HostEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(HostEvent::ThemeChanged("dark".into()));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, HostEvent::ThemeChanged("dark".into()));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(HostEvent::SidebarVisibilityChanged(false));

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, HostEvent::SidebarVisibilityChanged(false));
        assert_eq!(e2, HostEvent::SidebarVisibilityChanged(false));
    }

    #[tokio::test]
    async fn window_events_keep_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(HostEvent::WindowCreated(WindowId(1)));
        bus.publish(HostEvent::WindowDestroyed(WindowId(1)));
        bus.publish(HostEvent::WindowCreated(WindowId(2)));

        assert_eq!(rx.recv().await.unwrap(), HostEvent::WindowCreated(WindowId(1)));
        assert_eq!(rx.recv().await.unwrap(), HostEvent::WindowDestroyed(WindowId(1)));
        assert_eq!(rx.recv().await.unwrap(), HostEvent::WindowCreated(WindowId(2)));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(HostEvent::WorkspaceChanged("ws-1".into()));
        assert_eq!(count, 0);
    }

    #[test]
    fn cloned_bus_shares_subscribers() {
        let bus = EventBus::new(16);
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        assert_eq!(
            clone.publish(HostEvent::EnvUpdated {
                name: "FOO".into(),
                value: "bar".into(),
            }),
            1
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            HostEvent::EnvUpdated { ref name, .. } if name == "FOO"
        ));
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, HostEvent::Unknown);
    }
}
