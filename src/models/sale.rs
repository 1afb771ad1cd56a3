// src/models/sale.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::coerce::{
    deserialize_decimal_or_zero, deserialize_optional_date, deserialize_optional_text, non_empty,
};
use crate::common::date_utils::DateInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sale {
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,

    // Documentos novos usam userId, os migrados do Supabase usam repId
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub rep_id: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub dispensary_name: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub status: Option<String>,

    // "New Customer" | "Re-order"
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub sale_type: Option<String>,

    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub total_amount: Decimal,

    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateInput>,
}

impl Sale {
    /// Receita bruta da venda (`amount`, ou `totalAmount` nos registros antigos).
    pub fn gross(&self) -> Decimal {
        if self.amount.is_zero() {
            self.total_amount
        } else {
            self.amount
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        non_empty(self.user_id.as_deref()).or_else(|| non_empty(self.rep_id.as_deref()))
    }

    pub fn is_paid(&self) -> bool {
        self.status.as_deref() == Some("paid")
    }
}
