use crate::models::Identity;

/// Which write operation a gateway notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

/// Notifications pushed to presentation over the runtime's event channel.
///
/// Write outcomes are reported uniformly here; the task list itself only
/// changes when a `TasksUpdated` arrives via the subscription round-trip.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// The cache replaced its snapshot with a fresh delivery.
    TasksUpdated { count: usize },
    /// The subscription feed failed; the caller must resubscribe.
    SyncFailed { message: String },
    WriteCompleted { op: WriteOp },
    WriteFailed { op: WriteOp, message: String },
    /// Sign-in, sign-out, or a verification-flag change.
    IdentityChanged { identity: Option<Identity> },
}
