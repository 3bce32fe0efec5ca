//! Directory user model.
//!
//! # Responsibility
//! - Define the read-only user snapshot consumed by feed filtering, mention
//!   suggestions and the notification inbox.
//!
//! # Invariants
//! - `TeamId` always compares by its string form, whatever the wire type.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Auth-provider user id. Opaque to the core.
pub type UserId = String;

/// Team identifier.
///
/// Upstream documents store team ids either as numbers or strings; both
/// deserialize into the same stringified value so `5` and `"5"` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTeamId", into = "String")]
pub struct TeamId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTeamId {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<RawTeamId> for TeamId {
    fn from(value: RawTeamId) -> Self {
        match value {
            RawTeamId::Signed(number) => Self(number.to_string()),
            RawTeamId::Unsigned(number) => Self(number.to_string()),
            RawTeamId::Float(number) => Self(float_team_id(number)),
            RawTeamId::Text(text) => Self(text),
        }
    }
}

/// Whole floats (`5.0`) map to their integer form so they equal `5` and `"5"`.
fn float_team_id(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

impl From<TeamId> for String {
    fn from(value: TeamId) -> Self {
        value.0
    }
}

impl TeamId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<i64> for TeamId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TeamId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory entry for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: UserId,
    pub display_name: String,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl User {
    pub fn new(uid: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            photo_url: None,
            team_id: None,
            expertise: Vec::new(),
        }
    }

    pub fn with_team(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{TeamId, User};

    #[test]
    fn numeric_and_string_team_ids_compare_equal() {
        let from_number: User =
            serde_json::from_str(r#"{"uid":"u1","displayName":"Ada","teamId":5}"#).unwrap();
        let from_text: User =
            serde_json::from_str(r#"{"uid":"u2","displayName":"Bo","teamId":"5"}"#).unwrap();
        assert_eq!(from_number.team_id, from_text.team_id);
        assert_eq!(from_number.team_id.unwrap().as_str(), "5");
    }

    #[test]
    fn float_and_large_team_ids_deserialize() {
        let whole: User =
            serde_json::from_str(r#"{"uid":"u1","displayName":"Ada","teamId":5.0}"#).unwrap();
        assert_eq!(whole.team_id, Some(TeamId::from(5_i64)));

        let fractional: User =
            serde_json::from_str(r#"{"uid":"u2","displayName":"Bo","teamId":5.5}"#).unwrap();
        assert_eq!(fractional.team_id.unwrap().as_str(), "5.5");

        let large: User = serde_json::from_str(
            r#"{"uid":"u3","displayName":"Cy","teamId":18446744073709551615}"#,
        )
        .unwrap();
        assert_eq!(large.team_id.unwrap().as_str(), "18446744073709551615");
    }

    #[test]
    fn missing_optional_fields_default() {
        let user: User = serde_json::from_str(r#"{"uid":"u1","displayName":"Ada"}"#).unwrap();
        assert_eq!(user.team_id, None);
        assert_eq!(user.photo_url, None);
        assert!(user.expertise.is_empty());
    }

    #[test]
    fn team_id_serializes_as_string() {
        let value = serde_json::to_value(TeamId::from(7_i64)).unwrap();
        assert_eq!(value, serde_json::json!("7"));
    }
}
