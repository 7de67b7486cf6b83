//! Room Session Coordinator.
//!
//! Owns one [`Room`] and applies every event for it strictly one at a time. The
//! coordinator is driven by [`RoomCoordinator::run`] on its own task; nothing else
//! touches the room's state.
//!
//! The pacing delay of a round is awaited inside the event loop, so events that
//! arrive for this room meanwhile are queued and applied after `game-started`.

use std::{collections::HashMap, panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures_util::FutureExt;
use rand::{SeedableRng, rngs::StdRng};
use sleuth_shared::time::Clock;
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{
        Connection, ConnectionId, DisplayName, MessagePusher, Player, Room, RoomKey,
        RoomSnapshot, Succession, Timestamp,
    },
    infrastructure::dto::websocket::{
        ClientMessage, ErrorMessage, GameStartedMessage, NoticeMessage, PlayerJoinedMessage,
        PlayerLeftMessage, RoleMessage,
    },
};

use super::{dispatcher::Dispatcher, error::CommandError};

/// Input to a room's event loop
#[derive(Debug)]
pub enum RoomEvent {
    /// A socket was accepted for this room; it becomes a player on `join`
    Connected { connection: Connection },
    /// Raw text received from a connection
    Message { id: ConnectionId, text: String },
    /// The socket closed
    Disconnected { id: ConnectionId },
    /// Read the room state in event order
    Inspect { reply: oneshot::Sender<RoomSnapshot> },
}

pub struct RoomCoordinator {
    room: Room,
    /// Admitted connections that have not sent `join` yet
    awaiting_join: HashMap<ConnectionId, Connection>,
    dispatcher: Dispatcher,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    pacing_delay: Duration,
}

impl RoomCoordinator {
    pub fn new(
        key: RoomKey,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        pacing_delay: Duration,
    ) -> Self {
        let created_at = Timestamp::new(clock.now_jst_millis());
        Self {
            room: Room::new(key, created_at),
            awaiting_join: HashMap::new(),
            dispatcher: Dispatcher::new(pusher),
            clock,
            rng: StdRng::from_os_rng(),
            pacing_delay,
        }
    }

    /// Replace the random source, e.g. with a seeded one
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Consume events until every sender is gone.
    ///
    /// A panic while handling one event is logged and the loop carries on with the next.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<RoomEvent>) {
        tracing::info!("Room '{}' opened", self.room.key());
        while let Some(event) = events.recv().await {
            if AssertUnwindSafe(self.handle(event))
                .catch_unwind()
                .await
                .is_err()
            {
                tracing::error!(
                    "Room '{}' panicked while handling an event; continuing",
                    self.room.key()
                );
                self.room.abort_round();
            }
        }
        tracing::info!("Room '{}' closed", self.room.key());
    }

    /// Apply one event
    pub async fn handle(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Connected { connection } => self.on_connected(connection),
            RoomEvent::Message { id, text } => self.on_message(id, text).await,
            RoomEvent::Disconnected { id } => self.on_disconnected(id).await,
            RoomEvent::Inspect { reply } => {
                if reply.send(self.room.snapshot()).is_err() {
                    tracing::debug!("Inspect requester went away");
                }
            }
        }
    }

    fn on_connected(&mut self, connection: Connection) {
        tracing::debug!(
            "Connection '{}' admitted to room '{}'",
            connection.id(),
            self.room.key()
        );
        self.awaiting_join
            .insert(connection.id().clone(), connection);
    }

    /// Connection of a registered player or of an admitted connection
    fn connection_of(&self, id: &ConnectionId) -> Option<Connection> {
        self.room
            .registry()
            .get(id)
            .map(|player| player.connection.clone())
            .or_else(|| self.awaiting_join.get(id).cloned())
    }

    async fn on_message(&mut self, id: ConnectionId, text: String) {
        let Some(origin) = self.connection_of(&id) else {
            tracing::warn!("Message from unknown connection '{}' dropped", id);
            return;
        };

        let result = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(message) => self.execute(&origin, message).await,
            Err(e) => Err(CommandError::from(e)),
        };

        if let Err(e) = result {
            tracing::info!("Rejected command from '{}': {}", id, e);
            self.dispatcher
                .unicast(&origin, &ErrorMessage::new(e.to_string()))
                .await;
        }
    }

    async fn execute(
        &mut self,
        origin: &Connection,
        message: ClientMessage,
    ) -> Result<(), CommandError> {
        match message {
            ClientMessage::Join { name } => self.join(origin, name).await,
            ClientMessage::Start => self.start_round(origin).await,
            ClientMessage::Unknown => {
                tracing::debug!("Ignoring message of unknown type from '{}'", origin.id());
                Ok(())
            }
        }
    }

    async fn join(&mut self, origin: &Connection, name: Option<String>) -> Result<(), CommandError> {
        if self.room.registry().contains(origin.id()) {
            return Err(CommandError::AlreadyJoined);
        }
        let name = DisplayName::from_input(name)?;
        let player = Player::new(
            origin.clone(),
            name,
            Timestamp::new(self.clock.now_jst_millis()),
        );
        let outcome = self
            .room
            .join(player.clone())
            .map_err(|_| CommandError::AlreadyJoined)?;
        self.awaiting_join.remove(origin.id());

        tracing::info!(
            "Player '{}' ({}) joined room '{}' (count: {}, admin: {})",
            player.name,
            player.id(),
            self.room.key(),
            outcome.count,
            outcome.is_admin
        );

        let joined = PlayerJoinedMessage::from_join(&player, outcome.is_admin, outcome.count);
        self.dispatcher
            .broadcast(&self.room.registry().connections(), &joined)
            .await;
        Ok(())
    }

    async fn start_round(&mut self, origin: &Connection) -> Result<(), CommandError> {
        let assignment = self.room.begin_round(origin.id(), &mut self.rng)?;
        let count = assignment.len();
        tracing::info!(
            "Round starting in room '{}' with {} players",
            self.room.key(),
            count
        );

        self.dispatcher
            .broadcast(
                &self.room.registry().connections(),
                &NoticeMessage::roles_assigning(),
            )
            .await;

        if !self.pacing_delay.is_zero() {
            tokio::time::sleep(self.pacing_delay).await;
        }

        for (player, role) in assignment.iter() {
            tracing::debug!("Dealing '{}' to '{}'", role.tag(), player.id());
            self.dispatcher
                .unicast(&player.connection, &RoleMessage::new(*role))
                .await;
        }

        self.dispatcher
            .broadcast(
                &self.room.registry().connections(),
                &GameStartedMessage::new(count),
            )
            .await;
        self.room.finish_round();
        tracing::info!("Round started in room '{}'", self.room.key());
        Ok(())
    }

    async fn on_disconnected(&mut self, id: ConnectionId) {
        if self.awaiting_join.remove(&id).is_some() {
            tracing::debug!("Connection '{}' left before joining", id);
            return;
        }
        let Some(outcome) = self.room.leave(&id) else {
            return;
        };
        tracing::info!(
            "Player '{}' ({}) left room '{}' (count: {})",
            outcome.player.name,
            id,
            self.room.key(),
            outcome.count
        );

        let remaining = self.room.registry().connections();
        self.dispatcher
            .broadcast(&remaining, &PlayerLeftMessage::from(&outcome))
            .await;

        match outcome.succession {
            Succession::Succeeded(next) => {
                tracing::info!("Admin of room '{}' passed to '{}'", self.room.key(), next);
                if let Some(successor) = self.room.registry().get(&next) {
                    self.dispatcher
                        .unicast(&successor.connection, &NoticeMessage::you_are_now_admin())
                        .await;
                }
            }
            Succession::Vacated => {
                tracing::info!("Room '{}' is empty and has no admin", self.room.key());
            }
            Succession::Unchanged => {}
        }
    }
}
