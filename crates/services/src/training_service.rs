//! Training catalog reads and material authoring.

use std::sync::Arc;

use training_api::gateway::{NewMaterial, TrainingGateway};
use training_core::model::{StudyMaterial, Training, TrainingId};

use crate::error::TrainingServiceError;

/// Orchestrates the training catalog.
#[derive(Clone)]
pub struct TrainingService {
    trainings: Arc<dyn TrainingGateway>,
}

impl TrainingService {
    #[must_use]
    pub fn new(trainings: Arc<dyn TrainingGateway>) -> Self {
        Self { trainings }
    }

    /// The full catalog.
    ///
    /// # Errors
    ///
    /// Returns `TrainingServiceError::Api` if the fetch fails.
    pub async fn list_trainings(&self) -> Result<Vec<Training>, TrainingServiceError> {
        Ok(self.trainings.list_trainings().await?)
    }

    /// One training by id.
    ///
    /// # Errors
    ///
    /// Returns `TrainingServiceError::Api` if the fetch fails or the
    /// training is missing.
    pub async fn get_training(&self, id: TrainingId) -> Result<Training, TrainingServiceError> {
        Ok(self.trainings.get_training(id).await?)
    }

    /// The study materials attached to a training.
    ///
    /// # Errors
    ///
    /// Returns `TrainingServiceError::Api` if the fetch fails.
    pub async fn list_materials(
        &self,
        id: TrainingId,
    ) -> Result<Vec<StudyMaterial>, TrainingServiceError> {
        Ok(self.trainings.list_materials(id).await?)
    }

    /// Attaches a material after checking the form fields, so an obviously
    /// empty submission never reaches the wire.
    ///
    /// # Errors
    ///
    /// Returns `TrainingServiceError::Validation` for a blank title or
    /// link, `TrainingServiceError::Api` if the server refuses.
    pub async fn add_material(
        &self,
        training_id: TrainingId,
        title: &str,
        link: &str,
        description: Option<String>,
    ) -> Result<StudyMaterial, TrainingServiceError> {
        if title.trim().is_empty() {
            return Err(TrainingServiceError::Validation(
                "material title is required".into(),
            ));
        }
        if link.trim().is_empty() {
            return Err(TrainingServiceError::Validation(
                "material link is required".into(),
            ));
        }
        let request = NewMaterial::new(training_id, title.trim(), link.trim(), description);
        Ok(self.trainings.create_material(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::InMemoryGateway;
    use training_core::time::fixed_now;

    fn gateway_with_training() -> InMemoryGateway {
        let gateway = InMemoryGateway::new();
        gateway.seed_training(
            Training::new(TrainingId::new(7), "Rust Backend", None, Vec::new(), fixed_now())
                .unwrap(),
        );
        gateway
    }

    #[tokio::test]
    async fn add_material_rejects_blank_fields_before_dispatch() {
        let service = TrainingService::new(Arc::new(gateway_with_training()));

        let err = service
            .add_material(TrainingId::new(7), "  ", "https://example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrainingServiceError::Validation(_)));

        let err = service
            .add_material(TrainingId::new(7), "Guide", "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrainingServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn add_material_stores_and_returns_it() {
        let gateway = gateway_with_training();
        let service = TrainingService::new(Arc::new(gateway));

        let material = service
            .add_material(
                TrainingId::new(7),
                "Ownership chapter",
                "doc.rust-lang.org/book",
                None,
            )
            .await
            .unwrap();
        assert_eq!(material.title(), "Ownership chapter");

        let listed = service.list_materials(TrainingId::new(7)).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
