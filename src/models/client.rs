use serde::{Deserialize, Serialize};

use super::validation::{MIN_PHONE_DIGITS, TAX_ID_DIGITS, ValidationError};
use super::wire::lenient_i64;
use crate::format::{digits_only, format_phone, format_tax_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "idCliente", deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Body of `POST /novo/cliente`; tax id and phone travel as bare digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClient {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl NewClient {
    pub fn with_id(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            tax_id: self.tax_id,
            phone: self.phone,
        }
    }
}

/// Form contents of the client screens, masked as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub tax_id: String,
    pub phone: String,
}

impl ClientDraft {
    /// Pre-fill from raw server data, re-applying the masks.
    pub fn from_existing(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            tax_id: format_tax_id(&client.tax_id),
            phone: format_phone(&client.phone),
        }
    }

    pub fn validate(&self) -> Result<NewClient, ValidationError> {
        let tax_id = digits_only(&self.tax_id);
        let phone = digits_only(&self.phone);

        if self.name.is_empty() || tax_id.is_empty() || phone.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if tax_id.len() != TAX_ID_DIGITS {
            return Err(ValidationError::InvalidTaxId);
        }
        if phone.len() < MIN_PHONE_DIGITS {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(NewClient {
            name: self.name.clone(),
            tax_id,
            phone,
        })
    }
}
