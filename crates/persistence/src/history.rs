// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revision history and the version check applied to every write.

use crate::error::PersistenceError;
use std::collections::VecDeque;
use war_roster_domain::{VersionToken, WarId};

/// How many revisions are remembered per war.
///
/// A token older than this window is treated as unknown and rejected.
pub const HISTORY_LIMIT: usize = 256;

/// One committed revision of a war roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Monotonic revision number, starting at 1 for the seeded roster.
    pub number: u64,
    /// The token handed to clients for this revision.
    pub token: VersionToken,
    /// The operator that committed it, `None` for the seed.
    pub operator_id: Option<String>,
}

/// The bounded revision log of one war.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionLog {
    war: WarId,
    head: Revision,
    /// Older revisions, oldest first.
    earlier: VecDeque<Revision>,
}

impl RevisionLog {
    /// Starts a log at revision 1.
    #[must_use]
    pub fn seeded(war: &WarId) -> Self {
        Self {
            war: war.clone(),
            head: Revision {
                number: 1,
                token: token_for(war, 1),
                operator_id: None,
            },
            earlier: VecDeque::new(),
        }
    }

    /// Returns the newest revision.
    #[must_use]
    pub const fn head(&self) -> &Revision {
        &self.head
    }

    /// Returns the remembered revisions, oldest first.
    pub fn revisions(&self) -> impl Iterator<Item = &Revision> {
        self.earlier.iter().chain(std::iter::once(&self.head))
    }

    /// Checks a write against the log.
    ///
    /// A write without an expected version is never rejected. Otherwise the
    /// expected token must be remembered, and no *other* operator may have
    /// committed after it. An operator's own later commits do not count, so
    /// concurrent batches from one client do not reject each other.
    ///
    /// # Errors
    ///
    /// Returns `VersionMismatch` when the check fails.
    pub fn check(
        &self,
        expected: Option<&VersionToken>,
        operator_id: &str,
    ) -> Result<(), PersistenceError> {
        let Some(expected) = expected else {
            return Ok(());
        };

        let mismatch = || PersistenceError::VersionMismatch {
            expected: expected.clone(),
            current: self.head.token.clone(),
        };

        let base: u64 = self
            .revisions()
            .find(|r| &r.token == expected)
            .map(|r| r.number)
            .ok_or_else(mismatch)?;

        let foreign_commit: bool = self
            .revisions()
            .any(|r| r.number > base && r.operator_id.as_deref() != Some(operator_id));
        if foreign_commit {
            return Err(mismatch());
        }

        Ok(())
    }

    /// Appends a revision and returns its token.
    pub fn advance(&mut self, operator_id: &str) -> VersionToken {
        let number: u64 = self.head.number + 1;
        let token: VersionToken = token_for(&self.war, number);
        let next: Revision = Revision {
            number,
            token: token.clone(),
            operator_id: Some(operator_id.to_string()),
        };
        let previous: Revision = std::mem::replace(&mut self.head, next);
        self.earlier.push_back(previous);
        while self.earlier.len() >= HISTORY_LIMIT {
            self.earlier.pop_front();
        }
        token
    }
}

fn token_for(war: &WarId, number: u64) -> VersionToken {
    VersionToken::new(&format!("{war}@{number}"))
}
