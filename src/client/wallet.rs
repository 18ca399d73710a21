use serde::Deserialize;

use crate::client::{Access, ApiClient, ClientError};

/// Wallet balance, used for display only.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WalletBalance {
    pub balance: f64,
}

impl WalletBalance {
    /// Rupee amount with two decimals, e.g. `₹1250.00`.
    /// Rupee amount rounded to whole rupees with Indian digit grouping
    /// (`₹1,25,000`).
    pub fn display(&self) -> String {
        let rounded = self.balance.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!("{sign}₹{}", group_indian(&format!("{:.0}", rounded.abs())))
    }
}

/// Group a string of digits as lakh/crore: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BalancePayload {
    Wallet { wallet: WalletBalance },
    Data { data: WalletBalance },
    Bare(WalletBalance),
}

/// Client for the wallet service.
#[derive(Clone)]
pub struct WalletClient {
    api: ApiClient,
}

impl WalletClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current balance of the logged-in user.
    pub async fn balance(&self) -> Result<WalletBalance, ClientError> {
        let payload: BalancePayload = self.api.get("wallet/balance", Access::Session).await?;
        Ok(match payload {
            BalancePayload::Wallet { wallet } => wallet,
            BalancePayload::Data { data } => data,
            BalancePayload::Bare(balance) => balance,
        })
    }
}
