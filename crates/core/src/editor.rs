//! Optimistic link-collection state for one open link-page editor.
//!
//! [`LinkListState`] is the synchronous heart: it owns the ordered link
//! array and tracks every optimistic mutation through the
//! `Idle -> Pending(snapshot) -> {Committed | RolledBack}` lifecycle, with
//! the snapshot captured before the optimistic write. [`LinkCollection`]
//! pairs that state with a [`LinkGateway`] and drives each operation from
//! optimistic apply through commit or rollback.
//!
//! Concurrency rules (two in-flight writes may settle in either order):
//! - a pending op is scoped to the fields it touched, so ops on different
//!   links never clobber each other;
//! - each write to a link bumps that link's generation, and a rollback is
//!   dropped when a newer write has already superseded it, so a stale
//!   failure never overwrites a newer optimistic state.

use std::collections::HashMap;
use std::mem;

use crate::form::{validate_link_form, LinkForm, LinkFormErrors};
use crate::gateway::{GatewayError, LinkGateway, LinkPatch, LinkRecord, NewLink};
use crate::order;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Errors and notices
// ---------------------------------------------------------------------------

/// Typed outcome of an editor operation. Raw transport errors never escape.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Field-level validation failure. Local state and the gateway are
    /// untouched.
    #[error("validation failed")]
    Validation(LinkFormErrors),

    /// The gateway rejected the write; any optimistic change was rolled
    /// back to the pre-operation snapshot.
    #[error("could not save changes: {0}")]
    Persistence(String),

    /// The target vanished server-side; reconciled by a reload.
    #[error("link no longer exists")]
    NotFound,

    /// Owner mismatch. Hard failure, never retried here.
    #[error("not authorized for this project")]
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing notification queued by the editor (the toast analog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Synchronous state machine
// ---------------------------------------------------------------------------

/// Handle for one in-flight optimistic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpId(u64);

#[derive(Debug)]
enum PendingOp {
    Toggle {
        link_id: DbId,
        previous: bool,
        generation: u64,
    },
    Reorder {
        snapshot: Vec<LinkRecord>,
    },
}

/// The authoritative in-memory link list plus its in-flight bookkeeping.
///
/// This type is pure state: it never performs I/O. Callers stage an
/// optimistic mutation with a `begin_*` method, then settle it with
/// [`commit`](Self::commit) or [`rollback`](Self::rollback) once the
/// gateway answers.
#[derive(Debug, Default)]
pub struct LinkListState {
    links: Vec<LinkRecord>,
    pending: HashMap<u64, PendingOp>,
    /// Latest write generation per link id; rollbacks from older
    /// generations are stale and skipped.
    generations: HashMap<DbId, u64>,
    next_op: u64,
    next_generation: u64,
    reorder_in_flight: bool,
}

impl LinkListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn link(&self, id: DbId) -> Option<&LinkRecord> {
        self.links.iter().find(|l| l.id == id)
    }

    /// `true` while a reorder is pending; the UI disables drag affordances.
    pub fn reorder_in_flight(&self) -> bool {
        self.reorder_in_flight
    }

    /// Replace the whole list (initial load / reload reconciliation).
    /// Discards all pending bookkeeping.
    pub fn replace_all(&mut self, links: Vec<LinkRecord>) {
        self.links = links;
        self.pending.clear();
        self.generations.clear();
        self.reorder_in_flight = false;
    }

    /// Append a server-confirmed row (after a successful insert).
    pub fn push_confirmed(&mut self, record: LinkRecord) {
        self.links.push(record);
    }

    /// Replace a row with its server-confirmed version.
    pub fn replace_confirmed(&mut self, record: LinkRecord) {
        if let Some(slot) = self.links.iter_mut().find(|l| l.id == record.id) {
            *slot = record;
        }
    }

    /// Remove a row (after a confirmed delete).
    pub fn remove(&mut self, id: DbId) {
        self.links.retain(|l| l.id != id);
    }

    /// Optimistically flip `is_active` on one link. Returns the op handle
    /// and the new value, or `None` if the link is not present.
    pub fn begin_toggle(&mut self, id: DbId) -> Option<(OpId, bool)> {
        let link = self.links.iter_mut().find(|l| l.id == id)?;
        let previous = link.is_active;
        link.is_active = !previous;
        let now_active = link.is_active;

        self.next_generation += 1;
        let generation = self.next_generation;
        self.generations.insert(id, generation);

        let op = self.insert_pending(PendingOp::Toggle {
            link_id: id,
            previous,
            generation,
        });
        Some((op, now_active))
    }

    /// Optimistically apply a drag move. Returns the op handle and the
    /// `(id, display_order)` change set to persist, or `None` when the move
    /// is a no-op or another reorder is still in flight.
    pub fn begin_reorder(&mut self, from: usize, to: usize) -> Option<(OpId, Vec<(DbId, i32)>)> {
        if self.reorder_in_flight {
            return None;
        }
        let plan = order::plan_reorder(&self.links, from, to)?;
        let snapshot = mem::replace(&mut self.links, plan.ordered);
        self.reorder_in_flight = true;
        let op = self.insert_pending(PendingOp::Reorder { snapshot });
        Some((op, plan.changes))
    }

    /// The gateway confirmed the op: discard its snapshot.
    pub fn commit(&mut self, op: OpId) {
        if let Some(PendingOp::Reorder { .. }) = self.pending.remove(&op.0) {
            self.reorder_in_flight = false;
        }
    }

    /// The gateway rejected the op: restore the snapshot, unless a newer
    /// write to the same link already superseded it.
    pub fn rollback(&mut self, op: OpId) {
        match self.pending.remove(&op.0) {
            Some(PendingOp::Toggle {
                link_id,
                previous,
                generation,
            }) => {
                if self.generations.get(&link_id) == Some(&generation) {
                    if let Some(link) = self.links.iter_mut().find(|l| l.id == link_id) {
                        link.is_active = previous;
                    }
                }
            }
            Some(PendingOp::Reorder { snapshot }) => {
                self.links = snapshot;
                self.reorder_in_flight = false;
            }
            None => {}
        }
    }

    fn insert_pending(&mut self, op: PendingOp) -> OpId {
        self.next_op += 1;
        self.pending.insert(self.next_op, op);
        OpId(self.next_op)
    }
}

// ---------------------------------------------------------------------------
// Gateway-backed collection
// ---------------------------------------------------------------------------

/// The link editor for one open project: authoritative local list, gateway
/// synchronization, and the notice queue the surrounding UI drains.
///
/// Single mutable owner of the link array; the dialog and the drag
/// controller both go through these entry points.
pub struct LinkCollection<G> {
    gateway: G,
    state: LinkListState,
    notices: Vec<Notice>,
    loading: bool,
    pending_delete: Option<DbId>,
}

impl<G: LinkGateway> LinkCollection<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: LinkListState::new(),
            notices: Vec::new(),
            loading: false,
            pending_delete: None,
        }
    }

    pub fn links(&self) -> &[LinkRecord] {
        self.state.links()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_reorder_in_flight(&self) -> bool {
        self.state.reorder_in_flight()
    }

    /// Drain queued notifications for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }

    /// Fetch the full list, replacing local state. On failure the list is
    /// left empty and an error notice is queued -- never partial state.
    pub async fn load(&mut self) -> Result<(), EditorError> {
        self.loading = true;
        let result = self.gateway.list().await;
        self.loading = false;

        match result {
            Ok(links) => {
                self.state.replace_all(links);
                Ok(())
            }
            Err(err) => {
                self.state.replace_all(Vec::new());
                self.push_error(format!("Failed to load links: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    /// Validate and insert a new link at the end of the list.
    ///
    /// The new `display_order` is `max(existing) + 1` (0 when empty), which
    /// tolerates gaps left by deletions. Local state is only touched after
    /// the gateway confirms.
    pub async fn create(&mut self, form: &LinkForm) -> Result<DbId, EditorError> {
        let input = validate_link_form(form).map_err(EditorError::Validation)?;

        let display_order =
            order::next_display_order(self.state.links().iter().map(|l| l.display_order));
        let new_link = NewLink {
            title: input.title,
            url: input.url,
            display_order,
            is_active: input.is_active,
            icon: input.icon,
        };

        match self.gateway.insert(&new_link).await {
            Ok(record) => {
                let id = record.id;
                self.state.push_confirmed(record);
                self.push_success("Link added.");
                Ok(id)
            }
            Err(err) => {
                self.push_error(format!("Failed to add link: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    /// Validate and update an existing link. `display_order` is always
    /// preserved, and the icon too when the form leaves it unset. The local
    /// row is replaced only after the gateway confirms.
    pub async fn update(&mut self, id: DbId, form: &LinkForm) -> Result<(), EditorError> {
        let input = validate_link_form(form).map_err(EditorError::Validation)?;

        if self.state.link(id).is_none() {
            return Err(EditorError::NotFound);
        }

        let patch = LinkPatch {
            title: Some(input.title),
            url: Some(input.url),
            is_active: Some(input.is_active),
            icon: input.icon,
            display_order: None,
        };

        match self.gateway.update(id, &patch).await {
            Ok(record) => {
                self.state.replace_confirmed(record);
                self.push_success("Link updated.");
                Ok(())
            }
            Err(GatewayError::NotFound(_)) => {
                // Vanished server-side: reconcile quietly with a reload.
                let _ = self.load().await;
                Err(EditorError::NotFound)
            }
            Err(err) => {
                self.push_error(format!("Failed to update link: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    /// Optimistically flip `is_active`: local state changes before the
    /// gateway call, and is restored (stale-guarded) if the call fails.
    /// Returns the link's new active state.
    pub async fn toggle_active(&mut self, id: DbId) -> Result<bool, EditorError> {
        let Some((op, now_active)) = self.state.begin_toggle(id) else {
            return Err(EditorError::NotFound);
        };

        let patch = LinkPatch {
            is_active: Some(now_active),
            ..Default::default()
        };

        match self.gateway.update(id, &patch).await {
            Ok(_) => {
                self.state.commit(op);
                Ok(now_active)
            }
            Err(GatewayError::NotFound(_)) => {
                self.state.commit(op);
                let _ = self.load().await;
                Err(EditorError::NotFound)
            }
            Err(err) => {
                self.state.rollback(op);
                self.push_error(format!("Failed to update link status: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    /// First half of the two-step delete: mark the link for deletion and
    /// wait for [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: DbId) -> Result<(), EditorError> {
        if self.state.link(id).is_none() {
            return Err(EditorError::NotFound);
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    /// The id awaiting confirmation, if any.
    pub fn delete_requested(&self) -> Option<DbId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second half of the two-step delete. On success (or when the row is
    /// already gone server-side) the link is removed locally; on failure
    /// the list is untouched. No undo.
    pub async fn confirm_delete(&mut self) -> Result<(), EditorError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(EditorError::NotFound);
        };

        match self.gateway.delete(id).await {
            Ok(()) | Err(GatewayError::NotFound(_)) => {
                self.state.remove(id);
                self.push_success("Link deleted.");
                Ok(())
            }
            Err(err) => {
                self.push_error(format!("Failed to delete link: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    /// Drag-drop: apply the move optimistically, persist the changed
    /// orders as one batch, and roll the entire list back to the pre-drag
    /// snapshot if persistence fails (no partial reorder is ever visible).
    ///
    /// No-ops when `from == to`, an index is out of range, or a reorder is
    /// already in flight (the UI disables the affordance meanwhile).
    pub async fn reorder(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        let Some((op, changes)) = self.state.begin_reorder(from, to) else {
            return Ok(());
        };

        if changes.is_empty() {
            self.state.commit(op);
            return Ok(());
        }

        match self.gateway.update_order(&changes).await {
            Ok(()) => {
                self.state.commit(op);
                Ok(())
            }
            Err(err) => {
                self.state.rollback(op);
                self.push_error(format!("Failed to save the new link order: {err}"));
                Err(Self::map_gateway(err))
            }
        }
    }

    fn map_gateway(err: GatewayError) -> EditorError {
        match err {
            GatewayError::NotFound(_) => EditorError::NotFound,
            GatewayError::Unauthorized => EditorError::Unauthorized,
            GatewayError::Remote(message) => EditorError::Persistence(message),
        }
    }

    fn push_success(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        });
    }

    fn push_error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }
}
