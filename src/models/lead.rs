// src/models/lead.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::coerce::{
    deserialize_brand_list, deserialize_decimal_or_zero, deserialize_flag,
    deserialize_optional_date, deserialize_optional_text, non_empty,
};
use crate::common::date_utils::DateInput;

pub const UNASSIGNED_REP: &str = "Unassigned";
pub const UNKNOWN_REP: &str = "Unknown";

/// Um lead de dispensário ou, depois de fechado, uma conta ativa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lead {
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub name: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub dispensary_name: Option<String>,

    // "Sold"/"Sale" = conta fechada; qualquer outro valor é lead em aberto
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub status: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub sale_type: Option<String>,

    // Marcas que a loja carrega hoje
    #[serde(deserialize_with = "deserialize_brand_list")]
    pub active_brands: Option<Vec<String>>,

    // Valores
    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub potential_value: Decimal,
    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub commission_earned: Decimal,
    #[serde(deserialize_with = "deserialize_flag")]
    pub paid_status: bool,

    // Datas
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateInput>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub created_at: Option<DateInput>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub sold_date: Option<DateInput>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub first_sale_date: Option<DateInput>,

    // Responsável
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub rep_assigned: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub rep_id: Option<String>,
}

impl Lead {
    pub fn is_closed(&self) -> bool {
        matches!(self.status.as_deref(), Some("Sold") | Some("Sale"))
    }

    /// `amount` (schema de vendas) ou `potentialValue` (schema de leads).
    pub fn revenue(&self) -> Decimal {
        if self.amount.is_zero() {
            self.potential_value
        } else {
            self.amount
        }
    }

    /// Nome usado para agrupar o ranking.
    pub fn rep_name(&self) -> &str {
        non_empty(self.rep_assigned.as_deref()).unwrap_or(UNASSIGNED_REP)
    }

    /// ID do responsável para comissões a pagar.
    pub fn owner_id(&self) -> &str {
        non_empty(self.user_id.as_deref())
            .or_else(|| non_empty(self.rep_id.as_deref()))
            .unwrap_or(UNKNOWN_REP)
    }
}
