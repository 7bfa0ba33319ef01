use async_trait::async_trait;
use serde::Serialize;

use training_core::model::{AssignmentId, TrainingAssignment, TrainingId, UserId};

use crate::error::ApiError;
use crate::gateway::{AssignmentGateway, AssignmentRecord, NewAssignment};
use crate::rest::client::ApiClient;

// The backend names this collection `user-training-assignments`; the
// similarly named `course-assignments` resource is a different entity.
const COLLECTION: &str = "user-training-assignments";

fn by_user_path(user_id: UserId) -> String {
    format!("{COLLECTION}/user/{user_id}")
}

fn by_training_path(training_id: TrainingId) -> String {
    format!("{COLLECTION}/training/{training_id}")
}

fn meeting_link_path(id: AssignmentId) -> String {
    format!("{COLLECTION}/{id}/meeting-link")
}

fn instructor_path(training_id: TrainingId) -> String {
    format!("{COLLECTION}/training/{training_id}/instructor")
}

#[derive(Serialize)]
struct MeetingLinkUpdate<'a> {
    meeting_link: &'a str,
}

#[derive(Serialize)]
struct InstructorUpdate {
    instructor_id: u64,
}

fn decode_assignments(
    records: Vec<AssignmentRecord>,
) -> Result<Vec<TrainingAssignment>, ApiError> {
    records
        .into_iter()
        .map(AssignmentRecord::into_assignment)
        .collect()
}

#[async_trait]
impl AssignmentGateway for ApiClient {
    async fn assignments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingAssignment>, ApiError> {
        let records: Vec<AssignmentRecord> = self.get_json(&by_user_path(user_id)).await?;
        decode_assignments(records)
    }

    async fn assignments_for_training(
        &self,
        training_id: TrainingId,
    ) -> Result<Vec<TrainingAssignment>, ApiError> {
        let records: Vec<AssignmentRecord> = self.get_json(&by_training_path(training_id)).await?;
        decode_assignments(records)
    }

    async fn create_assignment(
        &self,
        new_assignment: &NewAssignment,
    ) -> Result<TrainingAssignment, ApiError> {
        let record: AssignmentRecord = self.post_json(COLLECTION, new_assignment).await?;
        record.into_assignment()
    }

    async fn update_meeting_link(&self, id: AssignmentId, link: &str) -> Result<(), ApiError> {
        self.put_json_unit(
            &meeting_link_path(id),
            &MeetingLinkUpdate { meeting_link: link },
        )
        .await
    }

    async fn update_instructor(
        &self,
        training_id: TrainingId,
        instructor_id: UserId,
    ) -> Result<(), ApiError> {
        self.put_json_unit(
            &instructor_path(training_id),
            &InstructorUpdate {
                instructor_id: instructor_id.value(),
            },
        )
        .await
    }
}
