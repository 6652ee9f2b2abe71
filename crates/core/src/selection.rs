// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use war_roster_domain::{Container, ParticipantId, Snapshot};

/// The set of currently selected participants.
///
/// Selection order is preserved so a multi-select move appends members to
/// the destination in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ParticipantId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Toggles a participant.
    ///
    /// Additive toggles add `id` if absent and remove it if present, leaving
    /// the rest untouched. A non-additive toggle replaces the selection with
    /// `{id}`, unless `id` was already the only selected participant, in
    /// which case the selection becomes empty.
    pub fn toggle(&mut self, id: &ParticipantId, additive: bool) {
        if additive {
            if let Some(position) = self.ids.iter().position(|s| s == id) {
                self.ids.remove(position);
            } else {
                self.ids.push(id.clone());
            }
            return;
        }

        let sole_selected: bool = self.ids.len() == 1 && &self.ids[0] == id;
        self.ids.clear();
        if !sole_selected {
            self.ids.push(id.clone());
        }
    }

    /// Starts a drag on `id` and returns the set being dragged.
    ///
    /// Dragging an unselected participant first collapses the selection to
    /// that participant alone.
    pub fn begin_drag(&mut self, id: &ParticipantId) -> Vec<ParticipantId> {
        if !self.contains(id) {
            self.ids.clear();
            self.ids.push(id.clone());
        }
        self.ids.clone()
    }

    /// Replaces the selection with every member of a container.
    pub fn select_all(&mut self, snapshot: &Snapshot, container: &Container) {
        self.ids = match container {
            Container::Pool => snapshot.pool_ids().to_vec(),
            Container::Squad(squad_id) => snapshot
                .squad(squad_id)
                .map(|squad| squad.member_ids().cloned().collect())
                .unwrap_or_default(),
        };
    }

    /// Drops selected identifiers that are no longer part of the snapshot.
    pub fn retain_present(&mut self, snapshot: &Snapshot) {
        self.ids.retain(|id| snapshot.contains(id));
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns whether the participant is selected.
    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.ids.contains(id)
    }

    /// Returns the selected identifiers in selection order.
    #[must_use]
    pub fn ids(&self) -> &[ParticipantId] {
        &self.ids
    }

    /// Returns the number of selected participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
