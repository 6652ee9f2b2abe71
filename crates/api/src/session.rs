// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One operator's editing session over one war.
//!
//! The session owns every piece of client state for the war: the snapshot
//! store, the selection, the undo slot, the conflict state, the notice
//! board and the kick gate. All of it is mutated synchronously through
//! `&mut self`; the only suspension points are remote calls.
//!
//! Callers that cannot hold `&mut self` across an await can use the split
//! form: stage synchronously (`stage_move`, `confirm_kick`), await on a
//! cloned [`Dispatcher`], then fold the result back (`apply_report`,
//! `apply_kick_result`). The async helpers do exactly that in one call.

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::dispatch::{DispatchPlan, DispatchReport, Dispatcher, KickDispatch};
use crate::error::ApiError;
use crate::request_response::MutationAck;
use crate::service::{RemoteError, RosterService};
use time::Duration;
use tracing::{debug, info, warn};
use war_roster::{
    Conflict, ConflictResolver, CoreError, KickGate, KickPlan, KickRequest, MovePlan, Notice,
    NoticeBoard, RemoteOperation, Resolution, Routed, Selection, SnapshotStore, UndoController,
    plan_kick, plan_move,
};
use war_roster_domain::{Container, ParticipantId, RoleTag, Snapshot, VersionToken, WarId};

/// The undoable action as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    /// What the action did.
    pub description: String,
    /// Time left before it can no longer be undone.
    pub remaining: Duration,
}

/// How a confirmed kick ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickOutcome {
    /// The service removed the participant.
    Removed(MutationAck),
    /// The service refused; the local removal was rolled back.
    RolledBack {
        /// The notice raised for the operator.
        notice_id: u64,
        /// The service's error.
        error: RemoteError,
    },
}

/// Client state for one war.
#[derive(Debug)]
pub struct WarSession<S, C = SystemClock> {
    config: SessionConfig,
    dispatcher: Dispatcher<S>,
    clock: C,
    store: SnapshotStore,
    selection: Selection,
    undo: UndoController,
    conflicts: ConflictResolver,
    notices: NoticeBoard,
    kicks: KickGate,
}

impl<S, C> WarSession<S, C>
where
    S: RosterService + Clone,
    C: Clock,
{
    /// Opens a session by fetching the war's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the fetch fails, or the
    /// fetched roster violates the partition invariant.
    pub async fn open(
        service: S,
        clock: C,
        config: SessionConfig,
        war_id: WarId,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        let dispatcher: Dispatcher<S> = Dispatcher::new(service);
        let snapshot: Snapshot = fetch_snapshot(&dispatcher, &war_id).await?;
        info!(
            "Opened war {} for operator {} at {}",
            war_id,
            config.operator_id,
            snapshot.version()
        );
        Ok(Self::with_snapshot(
            dispatcher, clock, config, war_id, snapshot,
        ))
    }

    /// Creates a session over an already fetched snapshot.
    #[must_use]
    pub fn with_snapshot(
        dispatcher: Dispatcher<S>,
        clock: C,
        config: SessionConfig,
        war_id: WarId,
        snapshot: Snapshot,
    ) -> Self {
        let undo: UndoController = UndoController::new(config.undo_window());
        Self {
            config,
            dispatcher,
            clock,
            store: SnapshotStore::new(war_id, snapshot),
            selection: Selection::new(),
            undo,
            conflicts: ConflictResolver::new(),
            notices: NoticeBoard::new(),
            kicks: KickGate::new(),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns the war being edited.
    #[must_use]
    pub const fn war_id(&self) -> &WarId {
        self.store.war()
    }

    /// Returns the current local snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    /// Returns the version the next mutation will carry.
    #[must_use]
    pub const fn expected_version(&self) -> Option<&VersionToken> {
        self.store.expected_version()
    }

    /// Returns the current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the open conflict, if any.
    #[must_use]
    pub const fn conflict(&self) -> Option<&Conflict> {
        self.conflicts.current()
    }

    /// Returns the outstanding notices.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        self.notices.notices()
    }

    /// Returns the kick awaiting confirmation.
    #[must_use]
    pub const fn pending_kick(&self) -> Option<&KickRequest> {
        self.kicks.pending()
    }

    /// Returns the session config.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a detached dispatcher for this session's service.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<S> {
        self.dispatcher.clone()
    }

    /// Returns the undoable action and its remaining countdown.
    #[must_use]
    pub fn pending_action(&self) -> Option<PendingAction> {
        let now = self.clock.now();
        self.undo.pending(now).map(|action| PendingAction {
            description: action.description().to_string(),
            remaining: action.remaining(now),
        })
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Toggles a participant in the selection.
    pub fn toggle(&mut self, participant_id: &ParticipantId, additive: bool) {
        self.selection.toggle(participant_id, additive);
    }

    /// Starts a drag, returning the participants that will move.
    pub fn begin_drag(&mut self, participant_id: &ParticipantId) -> Vec<ParticipantId> {
        self.selection.begin_drag(participant_id)
    }

    /// Selects everyone in a container.
    pub fn select_all(&mut self, container: &Container) {
        self.selection.select_all(self.store.snapshot(), container);
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Moves the selection into `destination` locally.
    ///
    /// # Returns
    ///
    /// What to dispatch, or `None` if nothing changed container.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is empty or does not match the
    /// snapshot, or a squad involved is locked.
    pub fn stage_move(&mut self, destination: &Container) -> Result<Option<DispatchPlan>, ApiError> {
        let ids: Vec<ParticipantId> = self.selection.ids().to_vec();
        self.stage_move_of(&ids, destination)
    }

    /// Moves the named participants into `destination` locally.
    ///
    /// On a genuine change the edit is committed to the store, registered
    /// as the undoable action (superseding any pending one) and the
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if `ids` is empty or does not match the snapshot, or
    /// a squad involved is locked.
    pub fn stage_move_of(
        &mut self,
        ids: &[ParticipantId],
        destination: &Container,
    ) -> Result<Option<DispatchPlan>, ApiError> {
        let Some(plan) = plan_move(self.store.snapshot(), ids, destination)? else {
            debug!("Move of {} participant(s) to {} is a no-op", ids.len(), destination);
            return Ok(None);
        };
        let MovePlan {
            moves,
            previous,
            next,
            description,
        } = plan;

        let now = self.clock.now();
        self.store.commit(&next);
        if let Some(superseded) =
            self.undo
                .register(description.clone(), war_roster::rollback_to(previous), now)
        {
            debug!("Superseded undo for: {}", superseded);
        }
        self.selection.clear();
        info!("{}", description);

        Ok(Some(DispatchPlan {
            war_id: self.store.war().clone(),
            operator_id: self.config.operator_id.clone(),
            expected_version: self.store.expected_version().cloned(),
            moves,
        }))
    }

    /// Folds a dispatch report back into the session.
    ///
    /// Accepted batches advance the expected version. A version mismatch
    /// opens (or re-counts) the conflict; any other failure raises a
    /// notice. The local optimistic layout is never touched here.
    ///
    /// # Returns
    ///
    /// Where each failure was routed, in dispatch order.
    pub fn apply_report(&mut self, report: &DispatchReport) -> Vec<Routed> {
        let now = self.clock.now();
        let mut routed: Vec<Routed> = Vec::new();
        for outcome in &report.outcomes {
            match &outcome.result {
                Ok(ack) => self.store.acknowledge(ack.version.clone()),
                Err(err) => {
                    let operation: RemoteOperation = outcome.category.into();
                    routed.push(self.conflicts.route(
                        err.clone().into_failure(operation),
                        &mut self.notices,
                        now,
                    ));
                }
            }
        }
        routed
    }

    /// Moves the selection into `destination` and dispatches it.
    ///
    /// # Returns
    ///
    /// The dispatch report, or `None` for a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails. Remote failures are folded into
    /// the session and reported in the returned report.
    pub async fn move_selection(
        &mut self,
        destination: &Container,
    ) -> Result<Option<DispatchReport>, ApiError> {
        let Some(plan) = self.stage_move(destination)? else {
            return Ok(None);
        };
        let report: DispatchReport = self.dispatcher.dispatch(&plan).await;
        self.apply_report(&report);
        Ok(Some(report))
    }

    /// Drops a dragged participant (and the selection it belongs to) on
    /// `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails.
    pub async fn drop_on(
        &mut self,
        dragged: &ParticipantId,
        destination: &Container,
    ) -> Result<Option<DispatchReport>, ApiError> {
        self.selection.begin_drag(dragged);
        self.move_selection(destination).await
    }

    // ========================================================================
    // Undo
    // ========================================================================

    /// Rolls back the pending action if its window is still open.
    ///
    /// Undo is local: the service is not told, so it may disagree with the
    /// restored layout until the next refresh.
    ///
    /// # Returns
    ///
    /// The description of the undone action.
    pub fn undo(&mut self) -> Option<String> {
        let now = self.clock.now();
        let undone: Option<String> = self.undo.undo(&mut self.store, now);
        if let Some(description) = &undone {
            info!(
                "Undid locally: {} (refresh to reconcile with the service)",
                description
            );
        }
        undone
    }

    /// Discards the pending action once its window has elapsed.
    ///
    /// # Returns
    ///
    /// The description of the discarded action.
    pub fn tick(&mut self) -> Option<String> {
        let expired: Option<String> = self.undo.expire(self.clock.now());
        if let Some(description) = &expired {
            debug!("Undo window closed for: {}", description);
        }
        expired
    }

    // ========================================================================
    // Conflicts and refresh
    // ========================================================================

    /// Installs a freshly fetched snapshot, discarding local edits.
    ///
    /// Closes the open conflict, if any, drops the pending undo so it can
    /// never overwrite the fresh roster, and prunes the selection.
    ///
    /// # Returns
    ///
    /// The conflict this closed.
    pub fn apply_refresh(&mut self, fresh: Snapshot) -> Option<Conflict> {
        let closed: Option<Conflict> = if self.conflicts.is_open() {
            self.conflicts.resolve_refresh(&mut self.store, fresh).ok()
        } else {
            self.store.replace(fresh);
            None
        };

        if self.undo.clear() {
            debug!("Dropped pending undo on refresh");
        }
        self.selection.retain_present(self.store.snapshot());
        info!(
            "Refreshed war {} at {}",
            self.store.war(),
            self.store.snapshot().version()
        );
        closed
    }

    /// Closes the open conflict, keeping local edits. The next mutation is
    /// sent without a version check.
    ///
    /// # Errors
    ///
    /// Returns an error if no conflict is open.
    pub fn override_conflict(&mut self) -> Result<Conflict, ApiError> {
        let conflict: Conflict = self.conflicts.resolve_override(&mut self.store)?;
        warn!(
            "Operator {} overrode a version conflict on war {}",
            self.config.operator_id,
            self.store.war()
        );
        Ok(conflict)
    }

    /// Refetches the roster and installs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the roster is invalid. Local
    /// state is untouched in that case.
    pub async fn refresh(&mut self) -> Result<Option<Conflict>, ApiError> {
        let fresh: Snapshot = fetch_snapshot(&self.dispatcher, self.store.war()).await?;
        Ok(self.apply_refresh(fresh))
    }

    /// Resolves the open conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if no conflict is open, or a refresh fetch fails (the
    /// conflict then stays open).
    pub async fn resolve_conflict(&mut self, resolution: Resolution) -> Result<Conflict, ApiError> {
        if !self.conflicts.is_open() {
            return Err(CoreError::NoOpenConflict.into());
        }
        match resolution {
            Resolution::Refresh => {
                let fresh: Snapshot = fetch_snapshot(&self.dispatcher, self.store.war()).await?;
                self.apply_refresh(fresh)
                    .ok_or_else(|| CoreError::NoOpenConflict.into())
            }
            Resolution::Override => self.override_conflict(),
        }
    }

    /// Dismisses a notice.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }

    // ========================================================================
    // Kicks
    // ========================================================================

    /// Asks for confirmation before removing a participant.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is unknown or in a locked squad.
    pub fn request_kick(&mut self, participant_id: &ParticipantId) -> Result<KickRequest, ApiError> {
        Ok(self
            .kicks
            .request(self.store.snapshot(), participant_id)?
            .clone())
    }

    /// Declines the pending kick. Nothing else changes.
    pub fn cancel_kick(&mut self) -> Option<KickRequest> {
        self.kicks.cancel()
    }

    /// Confirms the pending kick and removes the participant locally.
    ///
    /// No undoable action is registered; a failed remote kick is rolled
    /// back through [`Self::apply_kick_result`].
    ///
    /// # Errors
    ///
    /// Returns an error if no kick is pending, or the participant has left
    /// the snapshot or sits in a squad that was locked since the request.
    /// The request stays pending on error so it can still be cancelled.
    pub fn confirm_kick(&mut self) -> Result<KickDispatch, ApiError> {
        let participant_id: ParticipantId = self
            .kicks
            .pending()
            .ok_or(CoreError::NoPendingKick)?
            .participant_id
            .clone();
        let KickPlan {
            request,
            previous,
            next,
        } = plan_kick(self.store.snapshot(), &participant_id)?;
        self.kicks.confirm()?;

        self.store.commit(&next);
        self.selection.retain_present(self.store.snapshot());
        info!("Kicked {} from the {}", request.participant_id, request.from);

        Ok(KickDispatch {
            war_id: self.store.war().clone(),
            operator_id: self.config.operator_id.clone(),
            expected_version: self.store.expected_version().cloned(),
            request,
            previous,
        })
    }

    /// Folds the service's answer to a kick back into the session.
    ///
    /// A failure of any kind restores the layout captured just before the
    /// removal and raises a notice. Kicks never open a conflict.
    ///
    /// The restore covers the whole layout. In the split flow, a move staged
    /// between [`Self::confirm_kick`] and a failed result is wiped locally
    /// while its undo entry and its remote batch stand, so the local roster
    /// may disagree with the service until the next refresh. Undo has the
    /// same local-only limitation.
    pub fn apply_kick_result(
        &mut self,
        kick: KickDispatch,
        result: Result<MutationAck, RemoteError>,
    ) -> KickOutcome {
        match result {
            Ok(ack) => {
                self.store.acknowledge(ack.version.clone());
                KickOutcome::Removed(ack)
            }
            Err(error) => {
                self.store.restore_layout(&kick.previous);
                self.selection.retain_present(self.store.snapshot());
                let message: String = format!(
                    "Kick of {} was rolled back: {error}",
                    kick.participant_id()
                );
                warn!("{}", message);
                let notice_id: u64 =
                    self.notices
                        .raise(kick.operation(), message, self.clock.now());
                KickOutcome::RolledBack { notice_id, error }
            }
        }
    }

    /// Confirms the pending kick and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns an error if the kick cannot be confirmed. Remote failures
    /// are reported through [`KickOutcome::RolledBack`].
    pub async fn kick(&mut self) -> Result<KickOutcome, ApiError> {
        let dispatch: KickDispatch = self.confirm_kick()?;
        let result: Result<MutationAck, RemoteError> = self.dispatcher.kick(&dispatch).await;
        Ok(self.apply_kick_result(dispatch, result))
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Sets or clears a squad member's role tag.
    ///
    /// Role tags are a local annotation and are not sent to the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not a squad member.
    pub fn set_role(
        &mut self,
        participant_id: &ParticipantId,
        role: Option<RoleTag>,
    ) -> Result<(), ApiError> {
        self.store.set_role(participant_id, role)?;
        Ok(())
    }
}

async fn fetch_snapshot<S: RosterService>(
    dispatcher: &Dispatcher<S>,
    war_id: &WarId,
) -> Result<Snapshot, ApiError> {
    let response = dispatcher
        .fetch(war_id)
        .await
        .map_err(|err| ApiError::remote(RemoteOperation::FetchRoster, err))?;
    Ok(Snapshot::from_document(response.roster)?)
}
