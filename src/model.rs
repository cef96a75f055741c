//! Backend-owned entities as the UI sees them, plus the closed display
//! taxonomy for transaction rows.

use serde::Deserialize;

#[derive(Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub balance_after: f64,
    pub create_time: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    pub fn class(&self) -> TxClass {
        TxClass::classify(&self.kind, self.description.as_deref().unwrap_or(""))
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub is_read: i64,
    pub create_time: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl Message {
    pub fn is_unread(&self) -> bool {
        self.is_read == 0
    }

    pub fn is_transfer_alert(&self) -> bool {
        self.is_unread() && self.kind == "transfer"
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub id_card: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub card_number: String,
    pub balance: f64,
    pub create_time: String,
}

/// Closed set of display categories for a transaction row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TxClass {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
    Open,
}

/// Marker written into descriptions by the old backend before dedicated
/// transfer types existed.
const LEGACY_TRANSFER_MARKER: &str = "转账";

impl TxClass {
    /// Maps raw record fields to a display category. Legacy rows were
    /// stored as plain deposit/withdraw with the transfer marker in the
    /// description; that substring check is the documented fallback rule
    /// for data predating the `tr_in`/`tr_out` types.
    pub fn classify(kind: &str, description: &str) -> TxClass {
        match kind {
            "tr_in" => TxClass::TransferIn,
            "tr_out" => TxClass::TransferOut,
            "open" => TxClass::Open,
            "deposit" if description.contains(LEGACY_TRANSFER_MARKER) => TxClass::TransferIn,
            "withdraw" if description.contains(LEGACY_TRANSFER_MARKER) => TxClass::TransferOut,
            "withdraw" => TxClass::Withdraw,
            _ => TxClass::Deposit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TxClass::Deposit => "存款",
            TxClass::Withdraw => "取款",
            TxClass::TransferIn => "接收转账",
            TxClass::TransferOut => "转出",
            TxClass::Open => "开户",
        }
    }

    pub fn is_credit(self) -> bool {
        matches!(self, TxClass::Deposit | TxClass::TransferIn | TxClass::Open)
    }

    pub fn color_class(self) -> &'static str {
        if self.is_credit() {
            "text-green-600"
        } else {
            "text-red-600"
        }
    }
}

/// How many rows the dashboard preview shows; the history modal always
/// renders the full list.
pub const RECENT_LIMIT: usize = 5;

pub fn recent_transactions(all: &[Transaction]) -> &[Transaction] {
    &all[..all.len().min(RECENT_LIMIT)]
}

pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.is_unread()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: &str, description: &str) -> Transaction {
        Transaction {
            kind: kind.to_string(),
            amount: 100.0,
            balance_after: 100.0,
            create_time: "2024-01-01 00:00:00".to_string(),
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn dedicated_types_classify_directly() {
        assert_eq!(TxClass::classify("deposit", "工资"), TxClass::Deposit);
        assert_eq!(TxClass::classify("withdraw", "购物"), TxClass::Withdraw);
        assert_eq!(TxClass::classify("tr_in", ""), TxClass::TransferIn);
        assert_eq!(TxClass::classify("tr_out", ""), TxClass::TransferOut);
        assert_eq!(TxClass::classify("open", ""), TxClass::Open);
    }

    #[test]
    fn legacy_rows_reclassify_on_the_transfer_marker() {
        assert_eq!(
            TxClass::classify("deposit", "来自张三的转账"),
            TxClass::TransferIn
        );
        assert_eq!(
            TxClass::classify("withdraw", "转账给李四"),
            TxClass::TransferOut
        );
        // The marker only matters for the two legacy types.
        assert_eq!(TxClass::classify("open", "转账"), TxClass::Open);
    }

    #[test]
    fn reclassified_rows_render_the_transfer_label() {
        assert_eq!(tx("deposit", "..转账..").class().label(), "接收转账");
        assert_eq!(tx("deposit", "工资").class().label(), "存款");
    }

    #[test]
    fn credit_sign_follows_the_class() {
        assert!(TxClass::Deposit.is_credit());
        assert!(TxClass::TransferIn.is_credit());
        assert!(TxClass::Open.is_credit());
        assert!(!TxClass::Withdraw.is_credit());
        assert!(!TxClass::TransferOut.is_credit());
    }

    #[test]
    fn recent_view_is_capped_at_five() {
        let all: Vec<Transaction> = (0..7).map(|i| tx("deposit", &i.to_string())).collect();
        assert_eq!(recent_transactions(&all).len(), 5);
        assert_eq!(recent_transactions(&all[..3]).len(), 3);
        assert_eq!(
            recent_transactions(&all)[0].description,
            all[0].description
        );
    }

    #[test]
    fn unread_count_ignores_read_messages() {
        let messages = vec![
            Message {
                id: 1,
                kind: "transfer".to_string(),
                content: "x".to_string(),
                is_read: 0,
                create_time: String::new(),
                sender_name: None,
                amount: Some(5.0),
            },
            Message {
                id: 2,
                kind: "system".to_string(),
                content: "y".to_string(),
                is_read: 1,
                create_time: String::new(),
                sender_name: None,
                amount: None,
            },
        ];
        assert_eq!(unread_count(&messages), 1);
        assert!(messages[0].is_transfer_alert());
        assert!(!messages[1].is_transfer_alert());
    }
}
