//! Per-villager owning tasks.
//!
//! Each villager's state is owned by exactly one tokio task. All access --
//! observation and mutation alike -- goes through the task's command
//! mailbox, so mutual exclusion comes from task ownership rather than
//! locks. The census never holds a reference to villager state: it submits
//! an [`VillagerCommand::Observe`] and receives an immutable snapshot back
//! over a reply channel.

use chrono::{DateTime, Utc};
use hamlet_types::{MAX_LEVEL, Profession, VillagerId, VillagerKind, VillagerSnapshot};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::WorldError;

/// Capacity of each villager's command mailbox.
///
/// A sender that fills the mailbox backpressures until the owning task
/// drains it.
const MAILBOX_CAPACITY: usize = 32;

/// Commands processed by a villager's owning task, strictly in order.
#[derive(Debug)]
pub enum VillagerCommand {
    /// Take an immutable snapshot and reply with it.
    Observe {
        /// Where to deliver the snapshot.
        reply: oneshot::Sender<VillagerSnapshot>,
    },
    /// Give the villager a trade profession.
    Assign {
        /// The profession to take up.
        profession: Profession,
    },
    /// Raise the villager's experience level by one, capped at [`MAX_LEVEL`].
    Promote,
    /// Stop the owning task; the villager ceases to exist.
    Despawn,
}

/// The state owned exclusively by one villager's task.
#[derive(Debug, Clone)]
pub(crate) struct VillagerState {
    /// The villager's identity.
    id: VillagerId,
    /// The villager's biome-bound kind, fixed at spawn.
    kind: VillagerKind,
    /// The villager's current profession, if any.
    profession: Option<Profession>,
    /// The villager's current experience level.
    level: u8,
    /// When the villager was spawned.
    spawned_at: DateTime<Utc>,
}

impl VillagerState {
    /// Create the initial state for a new villager.
    pub(crate) fn new(
        id: VillagerId,
        kind: VillagerKind,
        profession: Option<Profession>,
        level: u8,
    ) -> Self {
        Self {
            id,
            kind,
            profession,
            level,
            spawned_at: Utc::now(),
        }
    }

    /// Take an immutable snapshot of the current state.
    const fn snapshot(&self) -> VillagerSnapshot {
        VillagerSnapshot::new(self.kind, self.profession, self.level)
    }
}

/// Cloneable reference to one live villager's mailbox.
///
/// Handles are only useful while the owning task runs; operations against
/// a stopped task resolve absent (observations) or fail with
/// [`WorldError::Mailbox`] (mutations).
#[derive(Debug, Clone)]
pub struct VillagerHandle {
    /// The villager this handle refers to.
    id: VillagerId,
    /// Sender half of the owning task's mailbox.
    commands: mpsc::Sender<VillagerCommand>,
}

impl VillagerHandle {
    /// The villager this handle refers to.
    pub const fn id(&self) -> VillagerId {
        self.id
    }

    /// Submit an observation to the owning task and await the snapshot.
    ///
    /// Resolves to `None` if the owning task stopped before the read ran.
    pub async fn observe(&self) -> Option<VillagerSnapshot> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(VillagerCommand::Observe { reply })
            .await
            .ok()?;
        response.await.ok()
    }

    /// Enqueue a command on the owning task's mailbox.
    pub(crate) async fn send(&self, command: VillagerCommand) -> Result<(), WorldError> {
        self.commands
            .send(command)
            .await
            .map_err(|_err| WorldError::Mailbox { villager: self.id })
    }
}

/// Start the owning task for one villager, returning its handle.
pub(crate) fn spawn(state: VillagerState) -> VillagerHandle {
    let (commands, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
    let handle = VillagerHandle {
        id: state.id,
        commands,
    };
    tokio::spawn(run(state, mailbox));
    handle
}

/// The owning task's command loop.
async fn run(mut state: VillagerState, mut mailbox: mpsc::Receiver<VillagerCommand>) {
    debug!(
        villager = %state.id,
        kind = state.kind.label(),
        spawned_at = %state.spawned_at,
        "villager task started"
    );

    while let Some(command) = mailbox.recv().await {
        match command {
            VillagerCommand::Observe { reply } => {
                // The requester may have abandoned its cycle; a dropped
                // reply receiver is not an error.
                let _ = reply.send(state.snapshot());
            }
            VillagerCommand::Assign { profession } => {
                state.profession = Some(profession);
            }
            VillagerCommand::Promote => {
                state.level = state.level.saturating_add(1).min(MAX_LEVEL);
            }
            VillagerCommand::Despawn => break,
        }
    }

    debug!(villager = %state.id, "villager task stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hamlet_types::MIN_LEVEL;

    use super::*;

    fn spawn_test_villager(profession: Option<Profession>, level: u8) -> VillagerHandle {
        spawn(VillagerState::new(
            VillagerId::new(),
            VillagerKind::Plains,
            profession,
            level,
        ))
    }

    #[tokio::test]
    async fn observe_returns_current_state() {
        let handle = spawn_test_villager(Some(Profession::Farmer), 3);

        let snapshot = handle.observe().await.unwrap();

        assert_eq!(snapshot.kind, VillagerKind::Plains);
        assert_eq!(snapshot.profession, Some(Profession::Farmer));
        assert_eq!(snapshot.level, 3);
    }

    #[tokio::test]
    async fn assign_is_visible_to_later_observations() {
        let handle = spawn_test_villager(None, MIN_LEVEL);

        handle
            .send(VillagerCommand::Assign {
                profession: Profession::Librarian,
            })
            .await
            .unwrap();

        let snapshot = handle.observe().await.unwrap();
        assert_eq!(snapshot.profession, Some(Profession::Librarian));
    }

    #[tokio::test]
    async fn promote_caps_at_max_level() {
        let handle = spawn_test_villager(Some(Profession::Toolsmith), MAX_LEVEL);

        handle.send(VillagerCommand::Promote).await.unwrap();

        let snapshot = handle.observe().await.unwrap();
        assert_eq!(snapshot.level, MAX_LEVEL);
    }

    #[tokio::test]
    async fn observe_after_despawn_resolves_absent() {
        let handle = spawn_test_villager(None, MIN_LEVEL);

        handle.send(VillagerCommand::Despawn).await.unwrap();

        // The Despawn command precedes the Observe in the mailbox, so the
        // owning task stops before the read can run.
        assert!(handle.observe().await.is_none());
    }
}
