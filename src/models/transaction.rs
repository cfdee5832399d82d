use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted status of a loan record.
///
/// Overdue is not a stored state. Older records written with `"overdue"`
/// are still outstanding loans and load as `Active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    #[serde(alias = "overdue")]
    Active,
    Completed,
}

/// Loan state as seen at a given instant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanState {
    Active,
    Overdue,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub book_id: String,
    pub member_id: String,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.due_date < now
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> LoanState {
        match self.status {
            TransactionStatus::Completed => LoanState::Completed,
            TransactionStatus::Active if self.due_date < now => LoanState::Overdue,
            TransactionStatus::Active => LoanState::Active,
        }
    }
}

/// A transaction paired with its derived state, for read views
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub state: LoanState,
}

impl TransactionView {
    pub fn at(transaction: Transaction, now: DateTime<Utc>) -> Self {
        let state = transaction.state_at(now);
        Self { transaction, state }
    }
}
