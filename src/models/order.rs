use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;
use super::wire::{lenient_f64, lenient_i64};

/// A sales order joined with its client and car, as `/lista/pedidos` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "idPedido", deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "idCliente", deserialize_with = "lenient_i64")]
    pub client_id: i64,
    #[serde(rename = "nomeCliente", default)]
    pub client_name: String,
    #[serde(rename = "idCarro", deserialize_with = "lenient_i64")]
    pub car_id: i64,
    #[serde(rename = "marcaCarro", default)]
    pub car_brand: String,
    #[serde(rename = "modeloCarro", default)]
    pub car_model: String,
    #[serde(rename = "dataPedido")]
    pub order_date: String,
    #[serde(rename = "valorPedido", deserialize_with = "lenient_f64")]
    pub amount: f64,
}

impl Order {
    /// `YYYY-MM-DD` part of the server timestamp.
    pub fn date_part(&self) -> &str {
        self.order_date.split('T').next().unwrap_or_default()
    }

    pub fn display_date(&self) -> String {
        match NaiveDate::parse_from_str(self.date_part(), "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => self.order_date.clone(),
        }
    }

    pub fn display_amount(&self) -> String {
        format!("R$ {:.2}", self.amount).replace('.', ",")
    }

    pub fn display_car(&self) -> String {
        format!("{} {}", self.car_brand, self.car_model)
    }
}

/// Body of `POST /novo/pedido`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "idCliente")]
    pub client_id: i64,
    #[serde(rename = "idCarro")]
    pub car_id: i64,
    #[serde(rename = "dataPedido")]
    pub order_date: String,
    #[serde(rename = "valorPedido")]
    pub amount: f64,
}

/// Body of `PUT /atualizar/pedido/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(rename = "idPedido")]
    pub id: i64,
    #[serde(flatten)]
    pub order: NewOrder,
}

impl NewOrder {
    pub fn with_id(self, id: i64) -> OrderUpdate {
        OrderUpdate { id, order: self }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub client_id: Option<i64>,
    pub car_id: Option<i64>,
    pub order_date: String,
    pub amount: String,
}

impl OrderDraft {
    pub fn from_existing(order: &Order) -> Self {
        Self {
            client_id: Some(order.client_id),
            car_id: Some(order.car_id),
            order_date: order.date_part().to_string(),
            amount: order.amount.to_string(),
        }
    }

    /// A zero amount counts as a missing field.
    pub fn validate(&self) -> Result<NewOrder, ValidationError> {
        let (Some(client_id), Some(car_id)) = (self.client_id, self.car_id) else {
            return Err(ValidationError::MissingFields);
        };
        let amount = self.amount.trim();
        if self.order_date.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount: f64 = match amount.parse() {
            Ok(value) if f64::is_finite(value) => value,
            _ => return Err(ValidationError::AmountNotNumeric),
        };
        if amount == 0.0 {
            return Err(ValidationError::MissingFields);
        }

        Ok(NewOrder {
            client_id,
            car_id,
            order_date: self.order_date.clone(),
            amount,
        })
    }
}
