//! Room Directory: maps room keys to running coordinators.
//!
//! A room's coordinator is spawned on first access and lives for the rest of the
//! process. Lookups for inspection never create rooms.

use std::{collections::HashMap, sync::Arc};

use sleuth_shared::time::Clock;
use tokio::sync::{Mutex, mpsc, oneshot};

use crate::domain::{Connection, ConnectionId, MessagePusher, RoomKey, RoomSnapshot};

use super::{
    config::RoomConfig,
    coordinator::{RoomCoordinator, RoomEvent},
    error::DirectoryError,
};

/// Sending side of one room's event loop
#[derive(Debug, Clone)]
pub struct RoomHandle {
    key: RoomKey,
    events: mpsc::UnboundedSender<RoomEvent>,
}

impl RoomHandle {
    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    fn send(&self, event: RoomEvent) -> Result<(), DirectoryError> {
        self.events
            .send(event)
            .map_err(|_| DirectoryError::RoomUnavailable(self.key.to_string()))
    }

    /// Admit a newly accepted connection
    pub fn connect(&self, connection: Connection) -> Result<(), DirectoryError> {
        self.send(RoomEvent::Connected { connection })
    }

    /// Forward raw inbound text
    pub fn message(&self, id: ConnectionId, text: String) -> Result<(), DirectoryError> {
        self.send(RoomEvent::Message { id, text })
    }

    pub fn disconnect(&self, id: ConnectionId) -> Result<(), DirectoryError> {
        self.send(RoomEvent::Disconnected { id })
    }

    /// Room state as of every event queued before this call
    pub async fn snapshot(&self) -> Result<RoomSnapshot, DirectoryError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomEvent::Inspect { reply })?;
        rx.await
            .map_err(|_| DirectoryError::RoomUnavailable(self.key.to_string()))
    }
}

pub struct RoomDirectory {
    rooms: Mutex<HashMap<RoomKey, RoomHandle>>,
    config: RoomConfig,
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl RoomDirectory {
    pub fn new(config: RoomConfig, pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            config,
            pusher,
            clock,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Handle of the room named `key`, starting its coordinator if needed
    pub async fn handle_for(&self, key: &RoomKey) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        if let Some(handle) = rooms.get(key) {
            return handle.clone();
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = RoomCoordinator::new(
            key.clone(),
            self.pusher.clone(),
            self.clock.clone(),
            self.config.pacing_delay,
        );
        tokio::spawn(coordinator.run(rx));

        let handle = RoomHandle {
            key: key.clone(),
            events: tx,
        };
        rooms.insert(key.clone(), handle.clone());
        tracing::info!("Created room '{}' (total rooms: {})", key, rooms.len());
        handle
    }

    /// Handle of an existing room
    pub async fn get(&self, key: &RoomKey) -> Option<RoomHandle> {
        self.rooms.lock().await.get(key).cloned()
    }

    /// Handles of every room, ordered by key
    pub async fn list(&self) -> Vec<RoomHandle> {
        let rooms = self.rooms.lock().await;
        let mut handles: Vec<RoomHandle> = rooms.values().cloned().collect();
        handles.sort_by(|a, b| a.key.cmp(&b.key));
        handles
    }
}
