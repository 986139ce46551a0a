use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Confirmation, DeleteOutcome, Transport};
use crate::models::{Client, ClientDraft};

impl<T: Transport> ApiClient<T> {
    pub async fn create_client(&self, draft: &ClientDraft) -> Result<(), ApiError> {
        let client = draft.validate()?;
        self.send_json(Method::POST, "/novo/cliente".to_string(), &client).await?;
        info!(name = %client.name, "client registered");
        Ok(())
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        self.get_json("/lista/clientes".to_string()).await
    }

    pub async fn update_client(&self, id: i64, draft: &ClientDraft) -> Result<(), ApiError> {
        let client = draft.validate()?.with_id(id);
        self.send_json(Method::PUT, format!("/atualizar/cliente/{}", id), &client).await?;
        info!(id, "client updated");
        Ok(())
    }

    pub async fn delete_client(&self, id: i64, confirmation: Confirmation) -> Result<DeleteOutcome, ApiError> {
        let outcome = self.delete_path(format!("/delete/cliente/{}", id), confirmation).await?;
        if outcome == DeleteOutcome::Deleted {
            info!(id, "client removed");
        }
        Ok(outcome)
    }
}
