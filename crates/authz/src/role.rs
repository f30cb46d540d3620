//! Shop-scoped role labels.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shopfloor_core::DomainError;

/// Role identifier used for RBAC.
///
/// Roles are immutable labels and are never combined; the single effective
/// authority for a decision is picked by the resolver. The same tag space
/// doubles as the legacy pre-multi-tenant global role (`User::global_role`),
/// which historically held `admin` or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
    Sales,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Staff, Role::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Sales => "sales",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            "sales" => Ok(Role::Sales),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"sales\"").unwrap();
        assert_eq!(role, Role::Sales);
    }

    #[test]
    fn parse_matches_display_for_all_roles() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_fails_validation() {
        assert!(matches!(
            "superuser".parse::<Role>(),
            Err(DomainError::Validation(_))
        ));
    }
}
