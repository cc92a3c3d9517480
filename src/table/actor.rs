//! Table actor implementation with async message handling.

use super::messages::{TableMessage, TableReply};
use crate::game::{
    config::TableConfig,
    entities::{PlayerId, SeatIndex},
    snapshot::TableSnapshot,
    state::{Command, TableState},
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{Instant, sleep_until},
};

/// Table actor handle for sending commands and following snapshots
#[derive(Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    snapshots: watch::Receiver<TableSnapshot>,
}

impl TableHandle {
    /// Submit a command and wait for the verdict
    pub async fn apply(&self, command: Command) -> Result<TableReply, String> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(TableMessage::Apply { command, response })
            .await
            .map_err(|_| "table is closed".to_string())?;
        receiver.await.map_err(|_| "table is closed".to_string())
    }

    /// Claim a seat
    pub async fn join(
        &self,
        seat_idx: SeatIndex,
        id: PlayerId,
        name: impl Into<String>,
    ) -> Result<TableReply, String> {
        self.apply(Command::Join {
            seat_idx,
            id,
            name: name.into(),
        })
        .await
    }

    /// Give up a seat
    pub async fn exit(&self, seat_idx: SeatIndex, id: PlayerId) -> Result<TableReply, String> {
        self.apply(Command::Exit { seat_idx, id }).await
    }

    /// Call the table bet
    pub async fn call(&self, seat_idx: SeatIndex, id: PlayerId) -> Result<TableReply, String> {
        self.apply(Command::Call { seat_idx, id }).await
    }

    /// Raise to double the call amount
    pub async fn raise(&self, seat_idx: SeatIndex, id: PlayerId) -> Result<TableReply, String> {
        self.apply(Command::Raise { seat_idx, id }).await
    }

    /// Surrender the hand
    pub async fn fold(&self, seat_idx: SeatIndex, id: PlayerId) -> Result<TableReply, String> {
        self.apply(Command::Fold { seat_idx, id }).await
    }

    /// Fetch the current snapshot through the inbox
    pub async fn snapshot(&self) -> Result<TableSnapshot, String> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(TableMessage::GetSnapshot { response })
            .await
            .map_err(|_| "table is closed".to_string())?;
        receiver.await.map_err(|_| "table is closed".to_string())
    }

    /// Snapshot channel for following published state changes. A fresh
    /// snapshot lands after every applied command and timer transition.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<TableSnapshot> {
        self.snapshots.clone()
    }

    /// Close the table
    pub async fn close(&self) -> Result<TableReply, String> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(TableMessage::Close { response })
            .await
            .map_err(|_| "table is closed".to_string())?;
        receiver.await.map_err(|_| "table is closed".to_string())
    }
}

/// Table actor owning the authoritative state of a single table
pub struct TableActor {
    /// Authoritative table state
    state: TableState,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Snapshot publication channel
    snapshots: watch::Sender<TableSnapshot>,

    /// Is table closed
    is_closed: bool,
}

impl TableActor {
    /// Create a new table actor
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor to spawn and handle for
    ///   sending commands
    #[must_use]
    pub fn new(config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(100);

        let now = Instant::now().into_std();
        let state = TableState::new(config, now);
        let (snapshots, receiver) = watch::channel(state.snapshot(now));

        let actor = Self {
            state,
            inbox,
            snapshots,
            is_closed: false,
        };

        let handle = TableHandle {
            sender,
            snapshots: receiver,
        };

        (actor, handle)
    }

    /// Run the table actor event loop. Commands are applied strictly in
    /// arrival order; between messages the actor sleeps until the next
    /// deadline the state reports, if any.
    pub async fn run(mut self) {
        log::info!("table '{}' starting", self.state.config().name);

        loop {
            // Recomputed from state each pass, so a transition that
            // invalidates a pending timer also stops us sleeping on it.
            let pending = self.state.next_deadline();

            tokio::select! {
                message = self.inbox.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }

                    if self.is_closed {
                        break;
                    }
                }

                () = wait_until(pending.map(|(_, fire_at)| fire_at)) => {
                    if let Some((guard, _)) = pending {
                        let now = Instant::now().into_std();
                        if self.state.on_timer(guard, now) {
                            self.publish(now);
                        }
                    }
                }
            }
        }

        log::info!("table '{}' closed", self.state.config().name);
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Apply { command, response } => {
                let now = Instant::now().into_std();
                let described = command.to_string();
                let reply = match self.state.apply(command, now) {
                    Ok(()) => {
                        log::info!("table '{}': {described}", self.state.config().name);
                        // Publish before replying, so a caller that has
                        // awaited the verdict always finds the matching
                        // snapshot already out.
                        self.publish(now);
                        TableReply::Applied
                    }
                    Err(rejection) => {
                        log::debug!(
                            "table '{}': {described} rejected: {rejection}",
                            self.state.config().name
                        );
                        TableReply::Rejected(rejection)
                    }
                };
                let _ = response.send(reply);
            }

            TableMessage::GetSnapshot { response } => {
                let now = Instant::now().into_std();
                let _ = response.send(self.state.snapshot(now));
            }

            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(TableReply::Applied);
            }
        }
    }

    fn publish(&self, now: std::time::Instant) {
        let _ = self.snapshots.send(self.state.snapshot(now));
    }
}

/// Sleep until `fire_at`, or forever when there is no deadline.
async fn wait_until(fire_at: Option<std::time::Instant>) {
    match fire_at {
        Some(fire_at) => sleep_until(Instant::from_std(fire_at)).await,
        None => std::future::pending().await,
    }
}
