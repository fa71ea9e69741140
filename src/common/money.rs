// src/common/money.rs

use rust_decimal::Decimal;

/// Campo numérico ausente/nulo conta como zero.
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Soma valores opcionais, tratando `None` como zero.
pub fn sum_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values.into_iter().map(or_zero).sum()
}

/// Arredonda para a unidade inteira mais próxima; meio arredonda para cima
/// (2.5 -> 3, -2.5 -> -2), igual ao que o painel sempre exibiu.
pub fn round_currency(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}
