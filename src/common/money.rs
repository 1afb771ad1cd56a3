// src/common/money.rs

// Valores vêm de registros sem validação; somas e produtos saturam em
// Decimal::MAX / Decimal::MIN em vez de estourar.

use rust_decimal::Decimal;

/// Soma que satura nos limites do `Decimal`.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
