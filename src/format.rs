//! Display formatting: money, masked balance, signed transaction amounts
//! and timestamp normalization. Pure functions so the snapshot of what the
//! user sees is testable.

use crate::model::TxClass;

pub const MASKED: &str = "****";

pub fn format_money(amount: f64) -> String {
    format!("¥ {:.2}", amount)
}

/// What the balance card shows. `None` means the balance has not loaded
/// yet; the privacy flag only affects presentation, never the stored value.
pub fn balance_text(balance: Option<f64>, revealed: bool) -> String {
    match balance {
        None => "--".to_string(),
        Some(_) if !revealed => MASKED.to_string(),
        Some(value) => format_money(value),
    }
}

/// Signed amount for a transaction row, e.g. `+¥ 100.00` / `-¥ 50.00`.
pub fn signed_amount(class: TxClass, amount: f64) -> String {
    let sign = if class.is_credit() { "+" } else { "-" };
    format!("{}{}", sign, format_money(amount.abs()))
}

/// Backend timestamps arrive as `YYYY-MM-DD HH:MM:SS` or ISO-8601 with a
/// `T` separator and optional fraction; normalize to the former.
pub fn format_time(raw: &str) -> String {
    let spaced = raw.replacen('T', " ", 1);
    match spaced.char_indices().nth(19) {
        Some((idx, _)) => spaced[..idx].to_string(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(0.0), "¥ 0.00");
        assert_eq!(format_money(1234.5), "¥ 1234.50");
    }

    #[test]
    fn balance_is_masked_by_default() {
        assert_eq!(balance_text(Some(88.0), false), "****");
        assert_eq!(balance_text(Some(88.0), true), "¥ 88.00");
        assert_eq!(balance_text(None, true), "--");
    }

    #[test]
    fn toggling_twice_restores_the_original_text() {
        let balance = Some(3200.75);
        let mut revealed = false;
        let initial = balance_text(balance, revealed);
        revealed = !revealed;
        revealed = !revealed;
        assert_eq!(balance_text(balance, revealed), initial);
    }

    #[test]
    fn signed_amounts_follow_the_class() {
        assert_eq!(signed_amount(TxClass::Deposit, 100.0), "+¥ 100.00");
        assert_eq!(signed_amount(TxClass::Withdraw, 50.0), "-¥ 50.00");
        assert_eq!(signed_amount(TxClass::TransferIn, -20.0), "+¥ 20.00");
    }

    #[test]
    fn timestamps_are_normalized() {
        assert_eq!(format_time("2024-01-02 03:04:05"), "2024-01-02 03:04:05");
        assert_eq!(
            format_time("2024-01-02T03:04:05.123Z"),
            "2024-01-02 03:04:05"
        );
        assert_eq!(format_time("2024-01-02"), "2024-01-02");
    }
}
