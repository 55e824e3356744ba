// src/common/format.rs
//
// Formatação numérica dos relatórios: Real brasileiro ("R$ 1.234,56"),
// percentuais ("10.0%") e dias ("2.5 dias").

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

fn round_dp(value: f64, dp: u32) -> Decimal {
    let decimal = Decimal::from_f64(value).unwrap_or_else(|| {
        // NaN, infinito ou acima de ~7.9e28
        tracing::warn!("Valor fora da faixa de formatação ({}); usando 0", value);
        Decimal::ZERO
    });
    let rounded = decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);

    // Evita "-0.0"
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// Arredonda para uma casa decimal (meio para longe do zero).
pub fn round1(value: f64) -> f64 {
    round_dp(value, 1).to_f64().unwrap_or(0.0)
}

/// Variação percentual `(atual - anterior) / anterior * 100`, com uma casa.
/// Sem base de comparação (anterior = 0) a variação é 0.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round1((current - previous) / previous * 100.0)
}

pub fn format_brl(value: f64) -> String {
    let rounded = round_dp(value, 2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}R$ {},{fraction}", group_thousands(integer))
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", round_dp(value, 1))
}

pub fn format_days(value: f64) -> String {
    format!("{:.1} dias", round_dp(value, 1))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
