//! DTOs for decoding `GET /2/users/by` responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass.

use serde::Deserialize;
use tracing::warn;

use crate::domain::AccountId;
use crate::domain::ports::DirectoryUser;

#[derive(Debug, Deserialize)]
pub(super) struct UsersLookupResponseDto {
    // Absent when none of the requested usernames exist.
    #[serde(default)]
    pub(super) data: Vec<UserDto>,
    #[serde(default)]
    pub(super) errors: Vec<ProblemDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: RawId,
}

/// The live API encodes ids as decimal strings; numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawId {
    Text(String),
    Number(u64),
}

/// Partial-error entry reported alongside (or instead of) `data`.
#[derive(Debug, Deserialize)]
pub(super) struct ProblemDto {
    #[serde(default)]
    pub(super) value: Option<String>,
    #[serde(default)]
    pub(super) detail: Option<String>,
}

impl UsersLookupResponseDto {
    /// Map records into domain users, skipping records whose id is not
    /// numeric.
    ///
    /// Fails only when records were returned and none of them decoded.
    pub(super) fn into_domain_users(self) -> Result<Vec<DirectoryUser>, String> {
        let mut users = Vec::with_capacity(self.data.len());
        let mut rejected = Vec::new();
        for user in self.data {
            match user.into_domain_user() {
                Ok(user) => users.push(user),
                Err(reason) => {
                    warn!(%reason, "skipping undecodable directory record");
                    rejected.push(reason);
                }
            }
        }
        if users.is_empty() && !rejected.is_empty() {
            return Err(rejected.join("; "));
        }
        Ok(users)
    }

    /// One-line summary of the `errors` array for logs.
    pub(super) fn problem_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let parts = self
            .errors
            .iter()
            .map(|problem| {
                let value = problem.value.as_deref().unwrap_or("?");
                let detail = problem.detail.as_deref().unwrap_or("unspecified");
                format!("{value}: {detail}")
            })
            .collect::<Vec<_>>();
        Some(parts.join("; "))
    }
}

impl UserDto {
    fn into_domain_user(self) -> Result<DirectoryUser, String> {
        let id = match self.id {
            RawId::Number(raw) => AccountId::new(raw),
            RawId::Text(raw) => raw
                .parse::<AccountId>()
                .map_err(|error| format!("user id {raw:?} is not numeric: {error}"))?,
        };
        Ok(DirectoryUser { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> UsersLookupResponseDto {
        serde_json::from_str(body).expect("valid payload")
    }

    #[test]
    fn decodes_string_ids() {
        let dto = decode(r#"{"data":[{"id":"2244994945","name":"Twitter Dev","username":"TwitterDev"}]}"#);
        let users = dto.into_domain_users().expect("numeric id");
        assert_eq!(users, vec![DirectoryUser { id: AccountId::new(2_244_994_945) }]);
    }

    #[test]
    fn decodes_numeric_ids() {
        let users = decode(r#"{"data":[{"id":42}]}"#)
            .into_domain_users()
            .expect("numeric id");
        assert_eq!(users, vec![DirectoryUser { id: AccountId::new(42) }]);
    }

    #[test]
    fn missing_data_is_an_empty_result() {
        let dto = decode(
            r#"{"errors":[{"value":"nobody_here","detail":"Could not find user with usernames: [nobody_here].","title":"Not Found Error"}]}"#,
        );
        assert_eq!(
            dto.problem_summary().as_deref(),
            Some("nobody_here: Could not find user with usernames: [nobody_here].")
        );
        assert!(dto.into_domain_users().expect("no records").is_empty());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = decode(r#"{"data":[{"id":"abc"}]}"#)
            .into_domain_users()
            .expect_err("non-numeric id");
        assert!(err.contains("\"abc\""), "unexpected message: {err}");
    }

    #[test]
    fn bad_ids_are_skipped_when_others_decode() {
        let users = decode(r#"{"data":[{"id":"abc"},{"id":"42"},{"id":"7x"}]}"#)
            .into_domain_users()
            .expect("one usable record");
        assert_eq!(users, vec![DirectoryUser { id: AccountId::new(42) }]);
    }

    #[test]
    fn no_problems_means_no_summary() {
        assert!(decode(r#"{"data":[]}"#).problem_summary().is_none());
    }
}
