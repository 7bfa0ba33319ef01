//! Assignment reads and the bulk fan-out action.

use std::sync::Arc;

use training_api::gateway::{AssignmentGateway, NewAssignment};
use training_core::model::{AssignmentId, TrainingAssignment, TrainingId, UserId};

use crate::error::AssignmentServiceError;

/// Result of a bulk assignment: which creations landed and which did not.
/// Callers always get counts, never a collapsed boolean.
#[derive(Debug, Clone, Default)]
pub struct FanOutOutcome {
    requested: usize,
    created: Vec<AssignmentId>,
    failed: Vec<(UserId, String)>,
}

impl FanOutOutcome {
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    #[must_use]
    pub fn created(&self) -> &[AssignmentId] {
        &self.created
    }

    #[must_use]
    pub fn failed(&self) -> &[(UserId, String)] {
        &self.failed
    }

    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.created.len() == self.requested
    }

    /// One-line report for the action banner.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Created {} assignment(s).", self.created.len())
        } else {
            format!(
                "Created {} of {} assignment(s); {} failed.",
                self.created.len(),
                self.requested,
                self.failed.len()
            )
        }
    }
}

/// Orchestrates assignment reads and writes.
#[derive(Clone)]
pub struct AssignmentService {
    assignments: Arc<dyn AssignmentGateway>,
}

impl AssignmentService {
    #[must_use]
    pub fn new(assignments: Arc<dyn AssignmentGateway>) -> Self {
        Self { assignments }
    }

    /// A trainee's assignments.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentServiceError::Api` if the fetch fails.
    pub async fn assignments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingAssignment>, AssignmentServiceError> {
        Ok(self.assignments.assignments_for_user(user_id).await?)
    }

    /// Every assignment issued for one training.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentServiceError::Api` if the fetch fails.
    pub async fn assignments_for_training(
        &self,
        training_id: TrainingId,
    ) -> Result<Vec<TrainingAssignment>, AssignmentServiceError> {
        Ok(self
            .assignments
            .assignments_for_training(training_id)
            .await?)
    }

    /// Assigns one training to many trainees, one independent request per
    /// trainee. A failed creation never aborts the rest; every failure is
    /// recorded against its user with the server's message.
    pub async fn assign_training(
        &self,
        training_id: TrainingId,
        user_ids: &[UserId],
        instructor_id: Option<UserId>,
    ) -> FanOutOutcome {
        let mut outcome = FanOutOutcome {
            requested: user_ids.len(),
            ..FanOutOutcome::default()
        };

        for &user_id in user_ids {
            let request = NewAssignment::new(user_id, training_id, instructor_id);
            match self.assignments.create_assignment(&request).await {
                Ok(assignment) => outcome.created.push(assignment.id()),
                Err(err) => {
                    tracing::warn!(%user_id, %training_id, error = %err, "assignment not created");
                    outcome.failed.push((user_id, err.to_string()));
                }
            }
        }

        outcome
    }

    /// Drops candidates that already hold an assignment for the training.
    /// A convenience pre-filter only; the server stays authoritative and
    /// still rejects duplicates created in between.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentServiceError::Api` if the existing assignments
    /// cannot be fetched.
    pub async fn filter_unassigned(
        &self,
        training_id: TrainingId,
        candidates: &[UserId],
    ) -> Result<Vec<UserId>, AssignmentServiceError> {
        let existing = self
            .assignments
            .assignments_for_training(training_id)
            .await?;
        Ok(candidates
            .iter()
            .copied()
            .filter(|candidate| existing.iter().all(|a| a.user_id() != *candidate))
            .collect())
    }

    /// Sets the meeting link on one assignment.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentServiceError::Api` if the update fails.
    pub async fn set_meeting_link(
        &self,
        id: AssignmentId,
        link: &str,
    ) -> Result<(), AssignmentServiceError> {
        Ok(self.assignments.update_meeting_link(id, link).await?)
    }

    /// Reassigns the instructor across a training's assignments.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentServiceError::Api` if the update fails.
    pub async fn set_instructor(
        &self,
        training_id: TrainingId,
        instructor_id: UserId,
    ) -> Result<(), AssignmentServiceError> {
        Ok(self
            .assignments
            .update_instructor(training_id, instructor_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::InMemoryGateway;

    fn user_ids(ids: &[u64]) -> Vec<UserId> {
        ids.iter().map(|&id| UserId::new(id)).collect()
    }

    #[tokio::test]
    async fn fan_out_reports_partial_failure() {
        let gateway = InMemoryGateway::new();
        gateway.reject_assignments_for(UserId::new(4));
        let service = AssignmentService::new(Arc::new(gateway.clone()));

        let outcome = service
            .assign_training(TrainingId::new(7), &user_ids(&[1, 2, 3, 4, 5]), None)
            .await;

        assert_eq!(outcome.requested(), 5);
        assert_eq!(outcome.created_count(), 4);
        assert_eq!(outcome.failed().len(), 1);
        assert_eq!(outcome.failed()[0].0, UserId::new(4));
        assert!(!outcome.is_complete_success());
        assert_eq!(outcome.summary(), "Created 4 of 5 assignment(s); 1 failed.");
        assert_eq!(gateway.assignment_count(), 4);
    }

    #[tokio::test]
    async fn fan_out_full_success_summary() {
        let gateway = InMemoryGateway::new();
        let service = AssignmentService::new(Arc::new(gateway));

        let outcome = service
            .assign_training(TrainingId::new(7), &user_ids(&[1, 2]), Some(UserId::new(9)))
            .await;

        assert!(outcome.is_complete_success());
        assert_eq!(outcome.summary(), "Created 2 assignment(s).");
    }

    #[tokio::test]
    async fn filter_unassigned_drops_existing_holders() {
        let gateway = InMemoryGateway::new();
        let service = AssignmentService::new(Arc::new(gateway));

        // user 2 gets the training first
        service
            .assign_training(TrainingId::new(7), &user_ids(&[2]), None)
            .await;

        let remaining = service
            .filter_unassigned(TrainingId::new(7), &user_ids(&[1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(remaining, user_ids(&[1, 3]));
    }

    #[tokio::test]
    async fn duplicate_creations_are_counted_as_failures() {
        let gateway = InMemoryGateway::new();
        let service = AssignmentService::new(Arc::new(gateway));

        service
            .assign_training(TrainingId::new(7), &user_ids(&[1]), None)
            .await;
        let outcome = service
            .assign_training(TrainingId::new(7), &user_ids(&[1]), None)
            .await;

        assert_eq!(outcome.created_count(), 0);
        assert_eq!(outcome.failed().len(), 1);
        assert!(outcome.failed()[0].1.contains("already assigned"));
    }
}
