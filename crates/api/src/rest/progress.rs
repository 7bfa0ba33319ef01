use async_trait::async_trait;
use serde::Serialize;

use training_core::model::{
    AssignmentId, MaterialProgressRecord, ProgressTarget, TechnologyId,
    TechnologyProgressRecord, UserId,
};

use crate::error::ApiError;
use crate::gateway::{
    CompletionFlag, MaterialProgressWire, ProgressGateway, TechnologyProgressWire,
};
use crate::rest::client::ApiClient;

const TECHNOLOGY_COLLECTION: &str = "user-technology-progress";
const MATERIAL_COLLECTION: &str = "user-material-progress";

fn technology_by_assignment_path(assignment_id: AssignmentId) -> String {
    format!("{TECHNOLOGY_COLLECTION}/assignment/{assignment_id}")
}

fn material_by_assignment_path(assignment_id: AssignmentId) -> String {
    format!("{MATERIAL_COLLECTION}/assignment/{assignment_id}")
}

#[derive(Serialize)]
struct TechnologyProgressUpsert {
    assignment_id: u64,
    technology_id: u64,
    completed: &'static str,
}

#[derive(Serialize)]
struct MaterialProgressUpsert {
    assignment_id: u64,
    user_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    material_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url_id: Option<String>,
    completed: &'static str,
}

#[async_trait]
impl ProgressGateway for ApiClient {
    async fn technology_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<TechnologyProgressRecord>, ApiError> {
        let rows: Vec<TechnologyProgressWire> = self
            .get_json(&technology_by_assignment_path(assignment_id))
            .await?;
        rows.into_iter()
            .map(TechnologyProgressWire::into_record)
            .collect()
    }

    async fn material_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<MaterialProgressRecord>, ApiError> {
        let rows: Vec<MaterialProgressWire> = self
            .get_json(&material_by_assignment_path(assignment_id))
            .await?;
        rows.into_iter()
            .map(MaterialProgressWire::into_record)
            .collect()
    }

    async fn upsert_technology_progress(
        &self,
        assignment_id: AssignmentId,
        technology_id: TechnologyId,
        completed: bool,
    ) -> Result<(), ApiError> {
        self.post_json_unit(
            TECHNOLOGY_COLLECTION,
            &TechnologyProgressUpsert {
                assignment_id: assignment_id.value(),
                technology_id: technology_id.value(),
                completed: CompletionFlag::from_bool(completed).as_wire(),
            },
        )
        .await
    }

    async fn upsert_material_progress(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
        target: &ProgressTarget,
        completed: bool,
    ) -> Result<(), ApiError> {
        let (material_id, url_id) = match target {
            ProgressTarget::Material(id) => (Some(id.value()), None),
            ProgressTarget::InstructorLink(id) => (None, Some(id.as_str().to_owned())),
        };
        self.post_json_unit(
            MATERIAL_COLLECTION,
            &MaterialProgressUpsert {
                assignment_id: assignment_id.value(),
                user_id: user_id.value(),
                material_id,
                url_id,
                completed: CompletionFlag::from_bool(completed).as_wire(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both progress collections carry the `user-` prefix on the backend.
    #[test]
    fn paths_use_the_served_collection_names() {
        assert_eq!(
            technology_by_assignment_path(AssignmentId::new(12)),
            "user-technology-progress/assignment/12"
        );
        assert_eq!(
            material_by_assignment_path(AssignmentId::new(12)),
            "user-material-progress/assignment/12"
        );
    }
}
