// src/common/coerce.rs

// Os registros chegam do Firestore/Supabase com formatos inconsistentes
// (números como string, null, campos ausentes). Aqui ficam os
// desserializadores tolerantes: nada aqui retorna erro, tudo degrada para
// um valor padrão.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::common::date_utils::DateInput;

/// Equivalente a `parseFloat(x) || 0`: lê o maior prefixo numérico válido.
///
/// `"12.5 miles"` vira `12.5`, `"abc"` vira `None`.
pub fn parse_float_prefix(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            frac_part = &s[frac_start..frac_end];
            pos = frac_end;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    // Expoente só conta se tiver pelo menos um dígito ("1e" é só "1")
    let mut exponent = "";
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp_end = pos + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = &s[pos + 1..exp_end];
        }
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 8);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }

    if exponent.is_empty() {
        Decimal::from_str(&literal).ok()
    } else {
        literal.push('e');
        literal.push_str(exponent);
        Decimal::from_scientific(&literal).ok()
    }
}

fn number_to_decimal(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let f = n.as_f64()?;
    // O Display de f64 devolve a menor representação exata ("0.35" e não 0.34999...)
    Decimal::from_str(&f.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(f))
}

/// Converte um valor JSON qualquer num `Decimal`, se houver número ali.
pub fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Truthiness do JavaScript aplicada a um valor JSON.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Campo numérico: ausente, null ou não numérico vira zero.
pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_decimal(&value).unwrap_or_default())
}

/// Campo booleano opcional: null vira `None`, o resto vira sua truthiness.
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(is_truthy(&other)),
    })
}

/// Campo booleano obrigatório: truthiness do valor, ausente é `false`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

/// Texto opcional. Números viram texto (IDs numéricos de importações antigas).
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Lista de marcas: só os elementos que são texto sobrevivem.
pub fn deserialize_brand_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Data em qualquer um dos formatos aceitos; formatos desconhecidos viram `None`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// `a || b` do JavaScript para textos: string vazia conta como ausente.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
