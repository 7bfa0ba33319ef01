//! Checklist loading, toggling, and the one-time completion notice.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use training_api::gateway::{ProgressGateway, TrainingGateway};
use training_core::model::{
    AssignmentId, LinkId, MaterialId, MaterialProgressRecord, ProgressSummary, ProgressTarget,
    RequiredTechnology, StudyMaterial, TechnologyId, TechnologyProgressRecord,
    TrainingAssignment, UserId, aggregate_progress,
};

use crate::error::ProgressServiceError;

/// Everything needed to render one assignment's progress card: the three
/// item lists and the records marking what is checked.
#[derive(Debug, Clone)]
pub struct AssignmentChecklists {
    pub assignment: TrainingAssignment,
    pub technologies: Vec<RequiredTechnology>,
    pub materials: Vec<StudyMaterial>,
    pub technology_records: Vec<TechnologyProgressRecord>,
    pub material_records: Vec<MaterialProgressRecord>,
}

impl AssignmentChecklists {
    /// Recomputes the client-side summary from current checklist state.
    /// Independent of the assignment's server-stored status/percentage.
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        let technology_ids: Vec<TechnologyId> = self
            .technologies
            .iter()
            .map(|tech| tech.technology_id)
            .collect();
        let material_ids: Vec<MaterialId> =
            self.materials.iter().map(StudyMaterial::id).collect();
        let link_ids: Vec<LinkId> = self
            .assignment
            .instructor_links()
            .iter()
            .map(|link| link.id().clone())
            .collect();
        aggregate_progress(
            &technology_ids,
            &material_ids,
            &link_ids,
            &self.technology_records,
            &self.material_records,
        )
    }

    #[must_use]
    pub fn is_technology_checked(&self, technology_id: TechnologyId) -> bool {
        self.technology_records
            .iter()
            .any(|rec| rec.technology_id == technology_id && rec.completed)
    }

    #[must_use]
    pub fn is_material_checked(&self, material_id: MaterialId) -> bool {
        self.material_records
            .iter()
            .any(|rec| rec.material_id() == Some(material_id) && rec.completed)
    }

    #[must_use]
    pub fn is_link_checked(&self, link_id: &LinkId) -> bool {
        self.material_records
            .iter()
            .any(|rec| rec.link_id() == Some(link_id) && rec.completed)
    }
}

/// Tracks which assignments have already shown their completion notice.
///
/// Per process, never persisted: the notice fires once per assignment per
/// run, and unchecking then re-checking an item does not re-fire it.
#[derive(Default)]
pub struct CompletionNotifier {
    notified: Mutex<HashSet<AssignmentId>>,
}

impl CompletionNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per assignment, the first time its summary is
    /// fully complete.
    pub fn should_notify(&self, assignment_id: AssignmentId, summary: &ProgressSummary) -> bool {
        if !summary.is_fully_complete() {
            return false;
        }
        match self.notified.lock() {
            Ok(mut notified) => notified.insert(assignment_id),
            Err(_) => false,
        }
    }
}

/// Loads checklists and writes individual checklist toggles.
#[derive(Clone)]
pub struct ProgressService {
    trainings: Arc<dyn TrainingGateway>,
    progress: Arc<dyn ProgressGateway>,
    notifier: Arc<CompletionNotifier>,
}

impl ProgressService {
    #[must_use]
    pub fn new(trainings: Arc<dyn TrainingGateway>, progress: Arc<dyn ProgressGateway>) -> Self {
        Self {
            trainings,
            progress,
            notifier: Arc::new(CompletionNotifier::new()),
        }
    }

    /// Fetches the three item lists and both record sets for an assignment.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if any fetch fails.
    pub async fn load_checklists(
        &self,
        assignment: TrainingAssignment,
    ) -> Result<AssignmentChecklists, ProgressServiceError> {
        let technologies = self
            .trainings
            .list_technologies(assignment.training_id())
            .await?;
        let materials = self.trainings.list_materials(assignment.training_id()).await?;
        let technology_records = self.progress.technology_progress(assignment.id()).await?;
        let material_records = self.progress.material_progress(assignment.id()).await?;

        Ok(AssignmentChecklists {
            assignment,
            technologies,
            materials,
            technology_records,
            material_records,
        })
    }

    /// Toggles one technology checklist entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the write fails.
    pub async fn set_technology(
        &self,
        assignment_id: AssignmentId,
        technology_id: TechnologyId,
        completed: bool,
    ) -> Result<(), ProgressServiceError> {
        Ok(self
            .progress
            .upsert_technology_progress(assignment_id, technology_id, completed)
            .await?)
    }

    /// Toggles one study-material checklist entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the write fails.
    pub async fn set_material(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
        material_id: MaterialId,
        completed: bool,
    ) -> Result<(), ProgressServiceError> {
        Ok(self
            .progress
            .upsert_material_progress(
                assignment_id,
                user_id,
                &ProgressTarget::Material(material_id),
                completed,
            )
            .await?)
    }

    /// Toggles one instructor-link checklist entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the write fails.
    pub async fn set_instructor_link(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
        link_id: LinkId,
        completed: bool,
    ) -> Result<(), ProgressServiceError> {
        Ok(self
            .progress
            .upsert_material_progress(
                assignment_id,
                user_id,
                &ProgressTarget::InstructorLink(link_id),
                completed,
            )
            .await?)
    }

    /// The one-time completion notice, when due.
    #[must_use]
    pub fn completion_notice(
        &self,
        assignment_id: AssignmentId,
        summary: &ProgressSummary,
    ) -> Option<String> {
        self.notifier
            .should_notify(assignment_id, summary)
            .then(|| "All items complete. Let your supervisor know.".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::InMemoryGateway;
    use training_core::model::{AssignmentStatus, Training, TrainingId};
    use training_core::time::fixed_now;

    fn seeded_gateway() -> (InMemoryGateway, TrainingAssignment) {
        let gateway = InMemoryGateway::new();
        let training = Training::new(
            TrainingId::new(7),
            "Rust Backend",
            None,
            vec![
                RequiredTechnology {
                    technology_id: TechnologyId::new(1),
                    name: "Rust".into(),
                    level: Some("intermediate".into()),
                },
                RequiredTechnology {
                    technology_id: TechnologyId::new(2),
                    name: "SQL".into(),
                    level: None,
                },
            ],
            fixed_now(),
        )
        .unwrap();
        gateway.seed_training(training);
        gateway.seed_material(
            StudyMaterial::new(
                MaterialId::new(1),
                TrainingId::new(7),
                "Ownership chapter",
                "https://doc.rust-lang.org/book/ch04-00.html",
                None,
            )
            .unwrap(),
        );

        let assignment = TrainingAssignment::new(
            AssignmentId::new(12),
            UserId::new(3),
            TrainingId::new(7),
            None,
            AssignmentStatus::InProgress,
            0,
            fixed_now(),
            None,
            Vec::new(),
        )
        .unwrap();
        gateway.seed_assignment(assignment.clone());
        (gateway, assignment)
    }

    fn service(gateway: &InMemoryGateway) -> ProgressService {
        ProgressService::new(Arc::new(gateway.clone()), Arc::new(gateway.clone()))
    }

    #[tokio::test]
    async fn checklists_aggregate_two_of_three() {
        let (gateway, assignment) = seeded_gateway();
        let service = service(&gateway);

        service
            .set_technology(assignment.id(), TechnologyId::new(1), true)
            .await
            .unwrap();
        service
            .set_material(assignment.id(), UserId::new(3), MaterialId::new(1), true)
            .await
            .unwrap();

        let checklists = service.load_checklists(assignment).await.unwrap();
        let summary = checklists.summary();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.percentage(), 67);
        assert!(checklists.is_technology_checked(TechnologyId::new(1)));
        assert!(!checklists.is_technology_checked(TechnologyId::new(2)));
        assert!(checklists.is_material_checked(MaterialId::new(1)));
    }

    #[tokio::test]
    async fn completion_notice_fires_exactly_once() {
        let (gateway, assignment) = seeded_gateway();
        let service = service(&gateway);
        let id = assignment.id();
        let user = UserId::new(3);

        for tech in [1, 2] {
            service
                .set_technology(id, TechnologyId::new(tech), true)
                .await
                .unwrap();
        }
        service
            .set_material(id, user, MaterialId::new(1), true)
            .await
            .unwrap();

        let summary = service
            .load_checklists(assignment.clone())
            .await
            .unwrap()
            .summary();
        assert!(summary.is_fully_complete());
        assert!(service.completion_notice(id, &summary).is_some());
        // complete state observed again: no second notice
        assert!(service.completion_notice(id, &summary).is_none());

        // toggle off and back on; still no re-fire
        service
            .set_material(id, user, MaterialId::new(1), false)
            .await
            .unwrap();
        let partial = service
            .load_checklists(assignment.clone())
            .await
            .unwrap()
            .summary();
        assert!(service.completion_notice(id, &partial).is_none());

        service
            .set_material(id, user, MaterialId::new(1), true)
            .await
            .unwrap();
        let complete_again = service.load_checklists(assignment).await.unwrap().summary();
        assert!(complete_again.is_fully_complete());
        assert!(service.completion_notice(id, &complete_again).is_none());
    }

    #[tokio::test]
    async fn toggles_never_touch_the_stored_assignment() {
        use training_api::gateway::AssignmentGateway;

        let (gateway, assignment) = seeded_gateway();
        let service = service(&gateway);

        service
            .set_technology(assignment.id(), TechnologyId::new(1), true)
            .await
            .unwrap();

        let reloaded = gateway
            .assignments_for_user(UserId::new(3))
            .await
            .unwrap()
            .remove(0);
        assert_eq!(reloaded.status(), AssignmentStatus::InProgress);
        assert_eq!(reloaded.stored_percentage(), 0);
        assert_eq!(reloaded, assignment);
    }
}
