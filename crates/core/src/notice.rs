// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::operation::RemoteOperation;
use time::OffsetDateTime;

/// A dismissible notice about a failure that did not open a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Identifier used to dismiss the notice.
    pub id: u64,
    /// The remote operation that failed.
    pub operation: RemoteOperation,
    /// Human-readable message.
    pub message: String,
    /// When the notice was raised.
    pub raised_at: OffsetDateTime,
}

/// Notices awaiting dismissal, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 1,
            notices: Vec::new(),
        }
    }

    /// Raises a notice.
    ///
    /// # Returns
    ///
    /// The new notice's identifier.
    pub fn raise(
        &mut self,
        operation: RemoteOperation,
        message: String,
        now: OffsetDateTime,
    ) -> u64 {
        let id: u64 = self.next_id.max(1);
        self.next_id = id + 1;
        self.notices.push(Notice {
            id,
            operation,
            message,
            raised_at: now,
        });
        id
    }

    /// Dismisses a notice.
    ///
    /// # Returns
    ///
    /// Whether a notice with that identifier existed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before: usize = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    /// Returns the outstanding notices.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Returns whether no notice is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
