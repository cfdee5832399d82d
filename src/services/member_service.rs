//! Member Service - Patron lookup and enrolment without HTTP layer

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::snapshot::next_id;
use crate::domain::{DomainError, Snapshot};
use crate::models::{Member, MemberStatus, NewMember, Transaction};

/// Member with the number of books currently out on loan
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    #[serde(flatten)]
    pub member: Member,
    pub borrowed_books: usize,
}

/// Members whose name or email contains the query (any case), or whose
/// phone number contains it verbatim. An empty query returns everyone.
pub fn filter_members<'a>(members: &'a [Member], search_query: &str) -> Vec<&'a Member> {
    if search_query.is_empty() {
        return members.iter().collect();
    }

    let needle = search_query.to_lowercase();
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.email.to_lowercase().contains(&needle)
                || m.phone.as_deref().is_some_and(|p| p.contains(search_query))
        })
        .collect()
}

/// Active loans held by a member
pub fn borrowed_by<'a>(transactions: &'a [Transaction], member_id: &str) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| t.member_id == member_id && t.is_active())
        .collect()
}

/// Attach derived loan counts to members
pub fn member_summaries<'a>(
    members: impl IntoIterator<Item = &'a Member>,
    transactions: &[Transaction],
) -> Vec<MemberSummary> {
    members
        .into_iter()
        .map(|member| MemberSummary {
            borrowed_books: borrowed_by(transactions, &member.id).len(),
            member: member.clone(),
        })
        .collect()
}

/// Register a new, active member
pub fn enrol_member(
    snapshot: &Snapshot,
    input: NewMember,
    today: NaiveDate,
) -> Result<(Snapshot, Member), DomainError> {
    let name = input.name.trim();
    let email = input.email.trim();

    if name.is_empty() {
        return Err(DomainError::Validation("member name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(DomainError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    if snapshot
        .members
        .iter()
        .any(|m| m.email.eq_ignore_ascii_case(email))
    {
        return Err(DomainError::Validation(format!(
            "a member with email '{}' already exists",
            email
        )));
    }

    let member = Member {
        id: next_id("m", snapshot.members.iter().map(|m| m.id.as_str())),
        name: name.to_string(),
        email: email.to_string(),
        phone: input
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        member_since: today,
        status: MemberStatus::Active,
    };

    let mut next = snapshot.clone();
    next.members.push(member.clone());

    tracing::info!("Enrolled member {} ({})", member.id, member.name);
    Ok((next, member))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 20).unwrap()
    }

    #[test]
    fn test_enrol_assigns_next_id_and_active_status() {
        let (snapshot, member) = enrol_member(
            &Snapshot::default(),
            NewMember {
                name: " Ada Lovelace ".to_string(),
                email: "ada@example.com".to_string(),
                phone: Some(String::new()),
            },
            today(),
        )
        .unwrap();

        assert_eq!(member.id, "m1");
        assert_eq!(member.name, "Ada Lovelace");
        assert_eq!(member.phone, None);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.member_since, today());
        assert_eq!(snapshot.members.len(), 1);
    }

    #[test]
    fn test_enrol_rejects_duplicate_email() {
        let (snapshot, _) = enrol_member(
            &Snapshot::default(),
            NewMember {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            today(),
        )
        .unwrap();

        let err = enrol_member(
            &snapshot,
            NewMember {
                name: "Ada Again".to_string(),
                email: "ADA@example.com".to_string(),
                phone: None,
            },
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_enrol_rejects_blank_name() {
        let err = enrol_member(
            &Snapshot::default(),
            NewMember {
                name: "   ".to_string(),
                email: "x@example.com".to_string(),
                phone: None,
            },
            today(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: member name is required");
    }
}
