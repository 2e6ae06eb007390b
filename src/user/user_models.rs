use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Role assumed when a request does not name one.
pub const DEFAULT_ROLE: &str = "patient";

/// Which side of the conversation a request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }

    /// The counterpart in the two-party conversation.
    pub fn other(self) -> Self {
        match self {
            Role::Patient => Role::Doctor,
            Role::Doctor => Role::Patient,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaticUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// The two fixed participants, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaticUsers {
    pub patient: StaticUser,
    pub doctor: StaticUser,
}

impl StaticUsers {
    pub fn get(&self, role: Role) -> &StaticUser {
        match role {
            Role::Patient => &self.patient,
            Role::Doctor => &self.doctor,
        }
    }
}

impl Default for StaticUsers {
    fn default() -> Self {
        Self {
            patient: StaticUser {
                id: "patient_1".to_string(),
                email: "patient@example.com".to_string(),
                name: "John Patient".to_string(),
                role: Role::Patient,
            },
            doctor: StaticUser {
                id: "doctor_1".to_string(),
                email: "doctor@example.com".to_string(),
                name: "Dr. Sarah Doctor".to_string(),
                role: Role::Doctor,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaticUsersResponse {
    pub users: StaticUsers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("patient".parse::<Role>().unwrap(), Role::Patient);
        assert_eq!("doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert!(matches!("nurse".parse::<Role>(), Err(AppError::InvalidRole(r)) if r == "nurse"));
        assert!("Doctor".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_other() {
        assert_eq!(Role::Patient.other(), Role::Doctor);
        assert_eq!(Role::Doctor.other(), Role::Patient);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Patient.to_string(), "patient");
        assert_eq!(Role::Doctor.to_string(), "doctor");
    }

    #[test]
    fn test_static_users_lookup_by_role() {
        let users = StaticUsers::default();
        assert_eq!(users.get(Role::Doctor).email, "doctor@example.com");
        assert_eq!(users.get(Role::Patient).name, "John Patient");
        assert_eq!(users.get(Role::Patient).role, Role::Patient);
    }

    #[test]
    fn test_static_users_serialize_keyed_by_role() {
        let value = serde_json::to_value(StaticUsersResponse { users: StaticUsers::default() }).unwrap();
        assert_eq!(value["users"]["doctor"]["id"], "doctor_1");
        assert_eq!(value["users"]["patient"]["role"], "patient");
    }
}
