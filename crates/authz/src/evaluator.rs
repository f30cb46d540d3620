//! Capability evaluator: turns an effective authority into allow/deny.
//!
//! Decisions are values, never errors. Even a malformed resource or action
//! string coming from the presentation layer yields a deny with a reason code,
//! not a panic or an `Err`.

use serde::{Deserialize, Serialize};

use shopfloor_core::ShopId;
use shopfloor_shops::ShopDirectory;

use crate::matrix::{Action, PermissionMatrix, Resource};
use crate::resolver::{EffectiveAuthority, NoAccessCause, resolve_effective_role};
use crate::user::User;

/// Reason code attached to every decision, for UI messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionReason {
    /// Root-admin or shop-owner override.
    Override,
    MatrixAllow,
    MatrixDeny,
    Blocked,
    NoMembership,
    ShopNotActive,
    UnknownResource,
    UnknownAction,
}

impl DecisionReason {
    /// Human-readable message for the presentation layer.
    pub fn message(&self) -> &'static str {
        match self {
            DecisionReason::Override => "granted by override",
            DecisionReason::MatrixAllow => "granted by role permissions",
            DecisionReason::MatrixDeny => "your role does not permit this",
            DecisionReason::Blocked => "account blocked",
            DecisionReason::NoMembership => "no access to this shop, contact your admin",
            DecisionReason::ShopNotActive => "this shop is not active",
            DecisionReason::UnknownResource => "unknown resource",
            DecisionReason::UnknownAction => "unknown action",
        }
    }
}

impl core::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tag = match self {
            DecisionReason::Override => "override",
            DecisionReason::MatrixAllow => "matrix-allow",
            DecisionReason::MatrixDeny => "matrix-deny",
            DecisionReason::Blocked => "blocked",
            DecisionReason::NoMembership => "no-membership",
            DecisionReason::ShopNotActive => "shop-not-active",
            DecisionReason::UnknownResource => "unknown-resource",
            DecisionReason::UnknownAction => "unknown-action",
        };
        f.write_str(tag)
    }
}

/// Outcome of a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub const fn allow(reason: DecisionReason) -> Self {
        Self { allowed: true, reason }
    }

    pub const fn deny(reason: DecisionReason) -> Self {
        Self { allowed: false, reason }
    }

    pub fn reason_message(&self) -> &'static str {
        self.reason.message()
    }
}

/// The decision engine: injected matrix + shop directory.
///
/// Pure and side-effect-free on the decision path; safe to share across any
/// number of concurrent readers.
#[derive(Debug, Clone)]
pub struct CapabilityEvaluator<D> {
    matrix: PermissionMatrix,
    shops: D,
}

impl<D: ShopDirectory> CapabilityEvaluator<D> {
    pub fn new(matrix: PermissionMatrix, shops: D) -> Self {
        Self { matrix, shops }
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn shops(&self) -> &D {
        &self.shops
    }

    /// Effective authority for `user` targeting `target_shop`.
    pub fn resolve(&self, user: &User, target_shop: Option<ShopId>) -> EffectiveAuthority {
        resolve_effective_role(user, target_shop, &self.shops)
    }

    /// Decide whether `user` may perform `action` on `resource` within
    /// `target_shop` (or in the legacy shop-less context when `None`).
    pub fn can(
        &self,
        user: &User,
        target_shop: Option<ShopId>,
        resource: Resource,
        action: Action,
    ) -> Decision {
        let authority = self.resolve(user, target_shop);
        let decision = match authority {
            EffectiveAuthority::RootAdminOverride
            | EffectiveAuthority::ShopOwnerOverride(_) => {
                Decision::allow(DecisionReason::Override)
            }
            EffectiveAuthority::InactiveShopOwner(_) => {
                // Metadata read only while the shop is not active.
                if resource == Resource::Settings && action == Action::Read {
                    Decision::allow(DecisionReason::Override)
                } else {
                    Decision::deny(DecisionReason::ShopNotActive)
                }
            }
            EffectiveAuthority::ShopRole(role, _)
            | EffectiveAuthority::LegacyGlobalRole(role) => {
                if self.matrix.allows(role, resource, action) {
                    Decision::allow(DecisionReason::MatrixAllow)
                } else {
                    Decision::deny(DecisionReason::MatrixDeny)
                }
            }
            EffectiveAuthority::NoAccess(cause) => Decision::deny(match cause {
                NoAccessCause::Blocked => DecisionReason::Blocked,
                NoAccessCause::NoMembership => DecisionReason::NoMembership,
                NoAccessCause::ShopNotActive => DecisionReason::ShopNotActive,
            }),
        };

        tracing::debug!(
            user = %user.uid,
            shop = ?target_shop,
            resource = %resource,
            action = %action,
            allowed = decision.allowed,
            reason = %decision.reason,
            "capability check"
        );
        decision
    }

    /// String-typed entry point for presentation callers.
    ///
    /// Malformed identifiers deny with `unknown-resource` / `unknown-action`;
    /// they never throw.
    pub fn can_named(
        &self,
        user: &User,
        target_shop: Option<ShopId>,
        resource: &str,
        action: &str,
    ) -> Decision {
        let Ok(resource) = resource.parse::<Resource>() else {
            return Decision::deny(DecisionReason::UnknownResource);
        };
        let Ok(action) = action.parse::<Action>() else {
            return Decision::deny(DecisionReason::UnknownAction);
        };
        self.can(user, target_shop, resource, action)
    }
}
