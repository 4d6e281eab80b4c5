use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// Returned by both `/api/auth/login` and `/api/auth/register`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthResponse {
        /// Opaque bearer token; the client never inspects it.
        pub token: String,
        pub user_id: String,
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccountView {
        /// Server-assigned id; never changes over the account's lifetime.
        pub id: String,
        pub name: String,
        pub balance_minor: i64,
    }

    /// Request body shared by account create and update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountUpsert {
        pub name: String,
        /// Absent on create means "open with zero balance".
        pub balance_minor: Option<i64>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum CategoryKind {
        Income,
        Expense,
    }

    impl CategoryKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "INCOME",
                Self::Expense => "EXPENSE",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: String,
        pub name: String,
        pub kind: CategoryKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub kind: CategoryKind,
    }
}

pub mod transaction {
    use super::*;
    pub use crate::category::CategoryKind as TransactionKind;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub account_id: String,
        pub amount_minor: i64,
        pub note: String,
        /// Category id, not the display label; resolve the name against
        /// the category collection when rendering.
        pub category_id: String,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
        pub kind: TransactionKind,
    }

    /// Request body shared by income registration, expense registration
    /// and transaction edit. The income/expense split lives in the path.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransactionRequest {
        pub account_id: String,
        pub amount_minor: i64,
        pub note: String,
        pub category_id: String,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }
}

pub mod balance {
    use super::*;

    /// Monthly totals as reported by `/api/balances/mensual`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonthlyBalance {
        pub income_minor: i64,
        pub expenses_minor: i64,
        pub balance_minor: i64,
    }
}
