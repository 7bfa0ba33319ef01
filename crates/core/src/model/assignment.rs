use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{AssignmentId, TrainingId, UserId};
use crate::model::training::InstructorLink;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown assignment status {0:?}")]
pub struct UnknownStatus(pub String);

/// Lifecycle state the server stores on an assignment.
///
/// The legacy backend emits these as free-form strings in two languages and
/// mixed case; they are normalized into this closed set at the api boundary
/// and compared exhaustively from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// Parses a wire status string, accepting the legacy synonyms.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStatus` for strings outside the known set.
    pub fn parse(raw: &str) -> Result<Self, UnknownStatus> {
        match raw.trim().to_lowercase().as_str() {
            "assigned" | "asignado" | "not_started" | "no_iniciado" => {
                Ok(AssignmentStatus::Assigned)
            }
            "in_progress" | "en_progreso" => Ok(AssignmentStatus::InProgress),
            "completed" | "completado" => Ok(AssignmentStatus::Completed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::InProgress => "in_progress",
            AssignmentStatus::Completed => "completed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "Assigned",
            AssignmentStatus::InProgress => "In progress",
            AssignmentStatus::Completed => "Completed",
        }
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, AssignmentStatus::Completed)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ASSIGNMENT ────────────────────────────────────────────────────────────────
//

/// Links one trainee to one training, optionally with an instructor.
///
/// `stored_percentage` and `status` are the SERVER'S view of completion and
/// are display-only here: the client-side checklist aggregation (see
/// [`crate::model::progress`]) is computed independently every render and
/// never written back to these fields. The two can disagree; dashboards
/// count on `status`, progress cards render the aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingAssignment {
    id: AssignmentId,
    user_id: UserId,
    training_id: TrainingId,
    instructor_id: Option<UserId>,
    status: AssignmentStatus,
    stored_percentage: u8,
    assigned_at: DateTime<Utc>,
    meeting_link: Option<String>,
    instructor_links: Vec<InstructorLink>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssignmentError {
    #[error("completion percentage must be 0-100, got {0}")]
    PercentageOutOfRange(u8),
}

impl TrainingAssignment {
    /// Creates an assignment from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentError` if the stored percentage exceeds 100.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AssignmentId,
        user_id: UserId,
        training_id: TrainingId,
        instructor_id: Option<UserId>,
        status: AssignmentStatus,
        stored_percentage: u8,
        assigned_at: DateTime<Utc>,
        meeting_link: Option<String>,
        instructor_links: Vec<InstructorLink>,
    ) -> Result<Self, AssignmentError> {
        if stored_percentage > 100 {
            return Err(AssignmentError::PercentageOutOfRange(stored_percentage));
        }

        let meeting_link = meeting_link
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty());

        Ok(Self {
            id,
            user_id,
            training_id,
            instructor_id,
            status,
            stored_percentage,
            assigned_at,
            meeting_link,
            instructor_links,
        })
    }

    #[must_use]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn training_id(&self) -> TrainingId {
        self.training_id
    }

    #[must_use]
    pub fn instructor_id(&self) -> Option<UserId> {
        self.instructor_id
    }

    /// Server-stored status. See the type-level note on the two notions of
    /// "completed".
    #[must_use]
    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Server-stored completion percentage; informative only.
    #[must_use]
    pub fn stored_percentage(&self) -> u8 {
        self.stored_percentage
    }

    #[must_use]
    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    #[must_use]
    pub fn meeting_link(&self) -> Option<&str> {
        self.meeting_link.as_deref()
    }

    #[must_use]
    pub fn instructor_links(&self) -> &[InstructorLink] {
        &self.instructor_links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn assignment(status: AssignmentStatus, pct: u8) -> Result<TrainingAssignment, AssignmentError> {
        TrainingAssignment::new(
            AssignmentId::new(1),
            UserId::new(2),
            TrainingId::new(3),
            None,
            status,
            pct,
            fixed_now(),
            None,
            Vec::new(),
        )
    }

    #[test]
    fn status_parses_canonical_and_legacy_forms() {
        assert_eq!(
            AssignmentStatus::parse("COMPLETED").unwrap(),
            AssignmentStatus::Completed
        );
        assert_eq!(
            AssignmentStatus::parse("Completado").unwrap(),
            AssignmentStatus::Completed
        );
        assert_eq!(
            AssignmentStatus::parse("en_progreso").unwrap(),
            AssignmentStatus::InProgress
        );
        assert_eq!(
            AssignmentStatus::parse("no_iniciado").unwrap(),
            AssignmentStatus::Assigned
        );
        assert!(AssignmentStatus::parse("paused").is_err());
    }

    #[test]
    fn rejects_percentage_over_100() {
        let err = assignment(AssignmentStatus::Assigned, 101).unwrap_err();
        assert_eq!(err, AssignmentError::PercentageOutOfRange(101));
    }

    #[test]
    fn blank_meeting_link_is_dropped() {
        let a = TrainingAssignment::new(
            AssignmentId::new(1),
            UserId::new(2),
            TrainingId::new(3),
            Some(UserId::new(4)),
            AssignmentStatus::InProgress,
            50,
            fixed_now(),
            Some("  ".into()),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(a.meeting_link(), None);
    }

    #[test]
    fn completed_flag_follows_status() {
        assert!(assignment(AssignmentStatus::Completed, 100)
            .unwrap()
            .status()
            .is_completed());
        assert!(!assignment(AssignmentStatus::InProgress, 100)
            .unwrap()
            .status()
            .is_completed());
    }
}
