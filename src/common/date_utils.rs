// src/common/date_utils.rs

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Formatos de data aceitos ---

/// Timestamp no formato exportado pelo Firestore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestoreTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds")]
    pub nanoseconds: u32,
}

/// Uma data como ela chega dos registros.
///
/// O Firestore devolve `Timestamp`, formulários antigos gravaram string ISO,
/// algumas importações gravaram epoch em milissegundos. Todos passam por
/// [`normalize_to_instant`] antes de qualquer cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Timestamp(FirestoreTimestamp),
    Millis(f64),
    Instant(DateTime<Utc>),
    Text(String),
}

impl DateInput {
    /// Se o valor seria "truthy" no frontend (`a || b || c`).
    pub fn is_present(&self) -> bool {
        match self {
            DateInput::Text(s) => !s.is_empty(),
            DateInput::Millis(ms) => *ms != 0.0 && !ms.is_nan(),
            DateInput::Timestamp(_) | DateInput::Instant(_) => true,
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

// --- Normalização ---

fn parse_date_text(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc2822(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converte qualquer [`DateInput`] num instante UTC. `None` se for inválido.
pub fn normalize_to_instant(input: &DateInput) -> Option<DateTime<Utc>> {
    match input {
        DateInput::Timestamp(ts) => DateTime::from_timestamp(ts.seconds, ts.nanoseconds),
        DateInput::Millis(ms) if ms.is_finite() => DateTime::from_timestamp_millis(ms.trunc() as i64),
        DateInput::Millis(_) => None,
        DateInput::Instant(dt) => Some(*dt),
        DateInput::Text(text) => parse_date_text(text),
    }
}

/// Primeiro candidato presente, na ordem dada (`a || b || c`).
///
/// Não tenta o próximo se o primeiro presente for inválido.
pub fn first_present<'a, I>(candidates: I) -> Option<&'a DateInput>
where
    I: IntoIterator<Item = Option<&'a DateInput>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_present())
}

// --- Trimestres ---

/// Trimestre (1-4) de um instante.
pub fn quarter_of(instant: DateTime<Utc>) -> u32 {
    instant.month0() / 3 + 1
}

/// Rótulo "Q{n} {ano}" do trimestre de `now`.
pub fn quarter_label(now: DateTime<Utc>) -> String {
    format!("Q{} {}", quarter_of(now), now.year())
}

/// Rótulo do trimestre corrente, pelo relógio do sistema.
pub fn current_quarter_label() -> String {
    quarter_label(Utc::now())
}

/// Se a data cai no mesmo trimestre e ano de `now`.
///
/// Datas ausentes ou inválidas retornam `false` (ficam fora da pontuação).
pub fn is_in_current_quarter_at(input: Option<&DateInput>, now: DateTime<Utc>) -> bool {
    let Some(instant) = input
        .filter(|candidate| candidate.is_present())
        .and_then(normalize_to_instant)
    else {
        return false;
    };

    quarter_of(instant) == quarter_of(now) && instant.year() == now.year()
}

pub fn is_in_current_quarter(input: Option<&DateInput>) -> bool {
    is_in_current_quarter_at(input, Utc::now())
}

// --- Aritmética de calendário ---

/// Soma meses de calendário mantendo o dia e o horário.
///
/// Se o dia não existir no mês de destino, transborda para o mês seguinte
/// (31/05 + 9 meses = 02/03 em ano bissexto).
pub fn add_calendar_months(instant: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    let total = i64::from(instant.year()) * 12 + i64::from(instant.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first_of_month.checked_add_days(Days::new(u64::from(instant.day0())))?;

    Some(date.and_time(instant.time()).and_utc())
}

/// Dias restantes até `target`, arredondados para cima.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    let ms = (target - now).num_milliseconds();
    -(-ms).div_euclid(DAY_MS)
}
