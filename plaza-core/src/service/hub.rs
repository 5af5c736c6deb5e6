//! In-memory hub for routing events to connected broadcast-channel clients.
//!
//! Single-process distribution only; the registry is owned by whoever holds
//! the hub, never ambient state. Broadcast tolerates concurrent
//! connect/disconnect: a subscriber that went away mid-iteration is skipped
//! and deregistered.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::ServerEvent;

/// Handle for a client connection subscription
pub type ConnectionId = String;

/// Subscriber information
#[derive(Debug)]
struct Subscriber {
    sender: mpsc::UnboundedSender<ServerEvent>,
}

/// Registry of open connections on the broadcast channel
#[derive(Clone, Default)]
pub struct ChannelHub {
    connections: Arc<DashMap<ConnectionId, Subscriber>>,
}

impl ChannelHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Register a connection and return its event receiver
    pub fn subscribe(&self, connection_id: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();

        self.connections
            .insert(connection_id.clone(), Subscriber { sender: tx });

        info!(
            connection_id = %connection_id,
            total_connections = self.connections.len(),
            "Client connected to broadcast channel"
        );

        rx
    }

    /// Deregister a connection; no side effects on other state
    pub fn unsubscribe(&self, connection_id: &str) {
        if self.connections.remove(connection_id).is_some() {
            info!(
                connection_id = %connection_id,
                total_connections = self.connections.len(),
                "Client disconnected from broadcast channel"
            );
        } else {
            debug!(
                connection_id = %connection_id,
                "Attempted to unsubscribe unknown connection"
            );
        }
    }

    /// Send an event to a single connection (history replay)
    pub fn send_to(&self, connection_id: &str, event: ServerEvent) -> bool {
        let Some(subscriber) = self.connections.get(connection_id) else {
            warn!(connection_id = %connection_id, "Send to unknown connection");
            return false;
        };

        if subscriber.sender.send(event).is_err() {
            drop(subscriber); // Release the map guard before removing
            self.unsubscribe(connection_id);
            return false;
        }
        true
    }

    /// Broadcast an event to every connected client, returning the number
    /// of clients it was delivered to. Dead connections are skipped and
    /// cleaned up.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut sent_count = 0;
        let mut failed_connections = Vec::new();

        for entry in self.connections.iter() {
            if entry.value().sender.send(event.clone()).is_ok() {
                sent_count += 1;
            } else {
                failed_connections.push(entry.key().clone());
            }
        }

        for connection_id in failed_connections {
            warn!(
                connection_id = %connection_id,
                "Dropping dead connection found during broadcast"
            );
            self.unsubscribe(&connection_id);
        }

        if sent_count > 0 {
            debug!(
                sent_count,
                event_type = event.event_type(),
                "Event broadcast complete"
            );
        }

        sent_count
    }

    /// Number of open connections
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
