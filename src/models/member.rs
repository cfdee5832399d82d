use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Suspended => "suspended",
        }
    }
}

/// A library patron.
///
/// The number of books a member currently holds is not stored here; it is
/// derived from active transactions (see `services::member_service`).
/// Records that still carry a `borrowedBooks` field deserialize fine, the
/// field is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub member_since: NaiveDate,
    #[serde(default)]
    pub status: MemberStatus,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Input for enrolling a new member
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
