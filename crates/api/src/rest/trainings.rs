use async_trait::async_trait;

use training_core::model::{RequiredTechnology, StudyMaterial, Training, TrainingId};

use crate::error::ApiError;
use crate::gateway::{
    MaterialRecord, NewMaterial, TechnologyRecord, TrainingGateway, TrainingRecord,
};
use crate::rest::client::ApiClient;

#[async_trait]
impl TrainingGateway for ApiClient {
    async fn list_trainings(&self) -> Result<Vec<Training>, ApiError> {
        let records: Vec<TrainingRecord> = self.get_json("trainings").await?;
        records
            .into_iter()
            .map(TrainingRecord::into_training)
            .collect()
    }

    async fn get_training(&self, id: TrainingId) -> Result<Training, ApiError> {
        let record: TrainingRecord = self.get_json(&format!("trainings/{id}")).await?;
        record.into_training()
    }

    async fn list_technologies(
        &self,
        id: TrainingId,
    ) -> Result<Vec<RequiredTechnology>, ApiError> {
        let records: Vec<TechnologyRecord> = self
            .get_json(&format!("trainings/{id}/technologies"))
            .await?;
        Ok(records
            .into_iter()
            .map(TechnologyRecord::into_technology)
            .collect())
    }

    async fn list_materials(&self, id: TrainingId) -> Result<Vec<StudyMaterial>, ApiError> {
        let records: Vec<MaterialRecord> =
            self.get_json(&format!("trainings/{id}/materials")).await?;
        records
            .into_iter()
            .map(MaterialRecord::into_material)
            .collect()
    }

    async fn create_material(
        &self,
        new_material: &NewMaterial,
    ) -> Result<StudyMaterial, ApiError> {
        let record: MaterialRecord = self.post_json("materials", new_material).await?;
        record.into_material()
    }
}
