use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Confirmation, DeleteOutcome, Transport};
use crate::models::{Car, CarDraft};

impl<T: Transport> ApiClient<T> {
    pub async fn create_car(&self, draft: &CarDraft, current_year: i32) -> Result<(), ApiError> {
        let car = draft.validate(current_year)?;
        self.send_json(Method::POST, "/novo/carro".to_string(), &car).await?;
        info!(brand = %car.brand, model = %car.model, "car registered");
        Ok(())
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, ApiError> {
        self.get_json("/lista/carros".to_string()).await
    }

    pub async fn update_car(&self, id: i64, draft: &CarDraft, current_year: i32) -> Result<(), ApiError> {
        let car = draft.validate(current_year)?.with_id(id);
        self.send_json(Method::PUT, format!("/atualizar/carro/{}", id), &car).await?;
        info!(id, "car updated");
        Ok(())
    }

    pub async fn delete_car(&self, id: i64, confirmation: Confirmation) -> Result<DeleteOutcome, ApiError> {
        let outcome = self.delete_path(format!("/delete/carro/{}", id), confirmation).await?;
        if outcome == DeleteOutcome::Deleted {
            info!(id, "car removed");
        }
        Ok(outcome)
    }
}
