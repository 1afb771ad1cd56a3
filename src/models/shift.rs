// src/models/shift.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::coerce::{
    deserialize_decimal_or_zero, deserialize_optional_date, deserialize_optional_flag,
    deserialize_optional_text,
};
use crate::common::date_utils::{first_present, DateInput};

// --- Enums ---

/// Região de faturamento de um turno.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "NYC")]
    Nyc,
    #[serde(rename = "LI")]
    LongIsland, // Long Island, Downstate e Westchester
    #[serde(rename = "UPSTATE")]
    Upstate,
}

impl Region {
    /// Rótulo exato gravado no registro. Não normaliza caixa.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NYC" => Some(Region::Nyc),
            "LI" => Some(Region::LongIsland),
            "UPSTATE" => Some(Region::Upstate),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Nyc => "NYC",
            Region::LongIsland => "LI",
            Region::Upstate => "UPSTATE",
        }
    }
}

// --- Structs ---

/// Um turno de trabalho de campo registrado pelo embaixador.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shift {
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub user_id: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub dispensary_name: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateInput>,

    // Turnos antigos só têm o horário de início
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub start_time: Option<DateInput>,

    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub hours_worked: Decimal,

    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub miles_traveled: Decimal,

    #[serde(deserialize_with = "deserialize_decimal_or_zero")]
    pub toll_amount: Decimal,

    // Ausente conta como "tem veículo"
    #[serde(deserialize_with = "deserialize_optional_flag")]
    pub has_vehicle: Option<bool>,

    #[serde(deserialize_with = "deserialize_optional_text")]
    pub region: Option<String>,

    // pending -> approved -> paid, controlado pelo fluxo administrativo
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub status: Option<String>,
}

impl Shift {
    /// Região de faturamento; ausente ou desconhecida cai em NYC.
    pub fn billing_region(&self) -> Region {
        self.region
            .as_deref()
            .and_then(Region::from_label)
            .unwrap_or(Region::Nyc)
    }

    pub fn has_vehicle(&self) -> bool {
        self.has_vehicle != Some(false)
    }

    /// Data do turno (`date`, ou `startTime` nos registros antigos).
    pub fn worked_on(&self) -> Option<&DateInput> {
        first_present([self.date.as_ref(), self.start_time.as_ref()])
    }

    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some("pending")
    }
}
