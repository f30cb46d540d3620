//! Permission matrix registry: role → resource → allowed actions.
//!
//! The matrix is injected, immutable configuration. Constructing it once and
//! handing it to the evaluator keeps it out of global state, so tests can
//! substitute their own tables and a deploy is the only way to change
//! authorization for live sessions.

use core::str::FromStr;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shopfloor_core::DomainError;

use crate::role::Role;

/// Resources a capability can be requested over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Inventory,
    Sales,
    Customers,
    Reports,
    Staff,
    Settings,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Inventory,
        Resource::Sales,
        Resource::Customers,
        Resource::Reports,
        Resource::Staff,
        Resource::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Inventory => "inventory",
            Resource::Sales => "sales",
            Resource::Customers => "customers",
            Resource::Reports => "reports",
            Resource::Staff => "staff",
            Resource::Settings => "settings",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inventory" => Ok(Resource::Inventory),
            "sales" => Ok(Resource::Sales),
            "customers" => Ok(Resource::Customers),
            "reports" => Ok(Resource::Reports),
            "staff" => Ok(Resource::Staff),
            "settings" => Ok(Resource::Settings),
            other => Err(DomainError::validation(format!("unknown resource: {other}"))),
        }
    }
}

/// Actions a capability can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Read, Action::Write, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "delete" => Ok(Action::Delete),
            other => Err(DomainError::validation(format!("unknown action: {other}"))),
        }
    }
}

/// Allowed actions for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionSet {
    pub read: bool,
    pub write: bool,
    pub delete: bool,
}

impl ActionSet {
    pub const NONE: ActionSet = ActionSet {
        read: false,
        write: false,
        delete: false,
    };

    pub const fn rwd(read: bool, write: bool, delete: bool) -> Self {
        Self { read, write, delete }
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Write => self.write,
            Action::Delete => self.delete,
        }
    }
}

/// Per-role capability table: resource → allowed actions.
///
/// A missing resource entry resolves to all-false, never to an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilityTable {
    entries: HashMap<Resource, ActionSet>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style grant.
    ///
    /// `reports` never carries a delete capability; a delete grant on it is
    /// masked off here so the invariant holds for any table, not just the
    /// builtin one.
    pub fn grant(mut self, resource: Resource, mut actions: ActionSet) -> Self {
        if resource == Resource::Reports {
            actions.delete = false;
        }
        self.entries.insert(resource, actions);
        self
    }

    pub fn actions_for(&self, resource: Resource) -> ActionSet {
        self.entries.get(&resource).copied().unwrap_or(ActionSet::NONE)
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.actions_for(resource).allows(action)
    }
}

/// Static role → capability-table registry.
///
/// Total lookup: a role without an entry resolves to the all-false table.
/// Read-only after construction; nothing in the engine mutates it at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionMatrix {
    roles: HashMap<Role, CapabilityTable>,
}

impl PermissionMatrix {
    /// An empty matrix (every role all-false). Useful as a test fixture.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The production capability tables.
    pub fn builtin() -> Self {
        let admin = CapabilityTable::new()
            .grant(Resource::Inventory, ActionSet::rwd(true, true, true))
            .grant(Resource::Sales, ActionSet::rwd(true, true, true))
            .grant(Resource::Customers, ActionSet::rwd(true, true, true))
            .grant(Resource::Reports, ActionSet::rwd(true, true, false))
            .grant(Resource::Staff, ActionSet::rwd(true, true, true))
            .grant(Resource::Settings, ActionSet::rwd(true, true, true));

        let manager = CapabilityTable::new()
            .grant(Resource::Inventory, ActionSet::rwd(true, true, true))
            .grant(Resource::Sales, ActionSet::rwd(true, true, true))
            .grant(Resource::Customers, ActionSet::rwd(true, true, true))
            .grant(Resource::Reports, ActionSet::rwd(true, true, false))
            .grant(Resource::Staff, ActionSet::rwd(true, true, false))
            .grant(Resource::Settings, ActionSet::rwd(true, false, false));

        let staff = CapabilityTable::new()
            .grant(Resource::Inventory, ActionSet::rwd(true, true, false))
            .grant(Resource::Sales, ActionSet::rwd(true, true, false))
            .grant(Resource::Customers, ActionSet::rwd(true, true, false))
            .grant(Resource::Reports, ActionSet::rwd(true, false, false));

        let sales = CapabilityTable::new()
            .grant(Resource::Inventory, ActionSet::rwd(true, false, false))
            .grant(Resource::Sales, ActionSet::rwd(true, true, false))
            .grant(Resource::Customers, ActionSet::rwd(true, true, false))
            .grant(Resource::Reports, ActionSet::rwd(true, false, false));

        Self::empty()
            .with_role(Role::Admin, admin)
            .with_role(Role::Manager, manager)
            .with_role(Role::Staff, staff)
            .with_role(Role::Sales, sales)
    }

    pub fn with_role(mut self, role: Role, table: CapabilityTable) -> Self {
        self.roles.insert(role, table);
        self
    }

    /// Capability table for a role. Total: a role without an entry yields the
    /// all-false table.
    pub fn table_for(&self, role: Role) -> CapabilityTable {
        self.roles.get(&role).cloned().unwrap_or_default()
    }

    pub fn allows(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.roles
            .get(&role)
            .map(|table| table.allows(resource, action))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_delete_is_false_for_every_role() {
        let matrix = PermissionMatrix::builtin();
        for role in Role::ALL {
            assert!(
                !matrix.allows(role, Resource::Reports, Action::Delete),
                "reports.delete must be denied for {role}"
            );
        }
    }

    #[test]
    fn grant_masks_delete_on_reports() {
        let table =
            CapabilityTable::new().grant(Resource::Reports, ActionSet::rwd(true, true, true));
        assert!(table.allows(Resource::Reports, Action::Read));
        assert!(!table.allows(Resource::Reports, Action::Delete));
    }

    #[test]
    fn role_without_entry_yields_all_false_table() {
        let matrix = PermissionMatrix::empty();
        for role in Role::ALL {
            for resource in Resource::ALL {
                for action in Action::ALL {
                    assert!(!matrix.allows(role, resource, action));
                }
            }
        }
        assert_eq!(
            matrix.table_for(Role::Admin).actions_for(Resource::Sales),
            ActionSet::NONE
        );
    }

    #[test]
    fn missing_resource_entry_resolves_all_false() {
        let matrix = PermissionMatrix::builtin();
        // Sales role has no staff/settings entries at all.
        assert!(!matrix.allows(Role::Sales, Resource::Staff, Action::Read));
        assert!(!matrix.allows(Role::Sales, Resource::Settings, Action::Write));
    }

    #[test]
    fn builtin_sales_role_matches_expected_grants() {
        let matrix = PermissionMatrix::builtin();
        assert!(matrix.allows(Role::Sales, Resource::Sales, Action::Write));
        assert!(matrix.allows(Role::Sales, Resource::Customers, Action::Write));
        assert!(matrix.allows(Role::Sales, Resource::Inventory, Action::Read));
        assert!(!matrix.allows(Role::Sales, Resource::Inventory, Action::Write));
        assert!(!matrix.allows(Role::Sales, Resource::Staff, Action::Write));
    }

    #[test]
    fn unknown_resource_and_action_strings_fail_parse() {
        assert!("inventory".parse::<Resource>().is_ok());
        assert!("warehouse".parse::<Resource>().is_err());
        assert!("delete".parse::<Action>().is_ok());
        assert!("truncate".parse::<Action>().is_err());
    }
}
