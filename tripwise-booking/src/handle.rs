use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn, Instrument};
use tripwise_core::LocationResolver;
use uuid::Uuid;

use crate::session::{BookingSession, BookingSnapshot, SessionCommand};

const COMMAND_BUFFER: usize = 64;

enum Command {
    Execute {
        command: SessionCommand,
        reply: oneshot::Sender<CommandReply>,
    },
    Snapshot {
        reply: oneshot::Sender<BookingSnapshot>,
    },
    SeedCitizenship {
        country_code: String,
    },
    SeedFailed,
}

/// Result of one command: the committed snapshot plus, for text entry,
/// the masked text to show back in the input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandReply {
    #[serde(flatten)]
    pub snapshot: BookingSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_echo: Option<String>,
}

/// Cloneable handle to a session owned by a single task.
///
/// User commands and the background location lookup travel through the
/// same channel, so every mutation is applied serially.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Move `session` onto its own task. When a resolver is given and the
    /// session has not tried yet, the citizenship lookup starts right away.
    pub fn spawn(mut session: BookingSession, resolver: Option<Arc<dyn LocationResolver>>) -> Self {
        let session_id = session.id();
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);

        if let Some(resolver) = resolver {
            if session.claim_citizenship_seed() {
                spawn_citizenship_lookup(session_id, resolver, tx.clone());
            }
        }

        tokio::spawn(
            run(session, rx).instrument(tracing::info_span!("booking_session", %session_id)),
        );

        Self { session_id, tx }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn execute(&self, command: SessionCommand) -> Result<CommandReply, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Execute { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn snapshot(&self) -> Result<BookingSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }
}

fn spawn_citizenship_lookup(session_id: Uuid, resolver: Arc<dyn LocationResolver>, tx: mpsc::Sender<Command>) {
    tokio::spawn(async move {
        let command = match resolver.resolve_caller_location().await {
            Ok(location) => Command::SeedCitizenship {
                country_code: location.country_code,
            },
            Err(e) => {
                warn!(%session_id, "Citizenship default unavailable: {}", e);
                Command::SeedFailed
            }
        };

        // Session may already be gone; nothing to report then
        let _ = tx.send(command).await;
    });
}

async fn run(mut session: BookingSession, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Execute { command, reply } => {
                let input_echo = session.execute(command);
                let _ = reply.send(CommandReply {
                    snapshot: session.snapshot(),
                    input_echo,
                });
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
            Command::SeedCitizenship { country_code } => {
                session.seed_citizenship(&country_code);
            }
            Command::SeedFailed => session.abandon_citizenship_seed(),
        }
    }

    info!("Booking session closed");
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session task is gone; a wiring defect, not a data condition
    #[error("Booking session is closed")]
    Closed,
}
