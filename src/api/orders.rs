use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Confirmation, DeleteOutcome, Transport};
use crate::models::{Order, OrderDraft};

impl<T: Transport> ApiClient<T> {
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<(), ApiError> {
        let order = draft.validate()?;
        self.send_json(Method::POST, "/novo/pedido".to_string(), &order).await?;
        info!(client_id = order.client_id, car_id = order.car_id, "order registered");
        Ok(())
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("/lista/pedidos".to_string()).await
    }

    pub async fn update_order(&self, id: i64, draft: &OrderDraft) -> Result<(), ApiError> {
        let order = draft.validate()?.with_id(id);
        self.send_json(Method::PUT, format!("/atualizar/pedido/{}", id), &order).await?;
        info!(id, "order updated");
        Ok(())
    }

    pub async fn delete_order(&self, id: i64, confirmation: Confirmation) -> Result<DeleteOutcome, ApiError> {
        let outcome = self.delete_path(format!("/delete/pedido/{}", id), confirmation).await?;
        if outcome == DeleteOutcome::Deleted {
            info!(id, "order removed");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, ApiError, Confirmation};
    use crate::models::{OrderDraft, ValidationError};

    fn draft(amount: &str) -> OrderDraft {
        OrderDraft {
            client_id: Some(1),
            car_id: Some(2),
            order_date: "2024-05-01".into(),
            amount: amount.into(),
        }
    }

    #[tokio::test]
    async fn create_posts_order_fields() {
        let api = ApiClient::new(MockTransport::new());

        api.create_order(&draft("1500.5")).await.unwrap();

        let requests = api.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/novo/pedido");
        assert_eq!(
            requests[0].body,
            Some(json!({"idCliente": 1, "idCarro": 2, "dataPedido": "2024-05-01", "valorPedido": 1500.5}))
        );
    }

    #[tokio::test]
    async fn zero_amount_never_reaches_the_server() {
        let api = ApiClient::new(MockTransport::new());

        let err = api.create_order(&draft("0")).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(ValidationError::MissingFields)));
        assert!(api.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_paths() {
        let api = ApiClient::new(MockTransport::new());

        api.update_order(8, &draft("10")).await.unwrap();
        api.delete_order(8, Confirmation::Accepted).await.unwrap();

        let requests = api.transport().requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/atualizar/pedido/8");
        assert_eq!(requests[0].body.as_ref().unwrap()["idPedido"], 8);
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].path, "/delete/pedido/8");
    }
}
