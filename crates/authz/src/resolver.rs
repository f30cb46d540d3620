//! Role resolver: picks the single effective authority for a request.
//!
//! The precedence order below is the core policy decision and must not be
//! reordered: blocked > root admin > no-shop-context > shop membership.
//! Reordering changes security semantics (e.g. a blocked root admin must
//! still be denied).

use serde::{Deserialize, Serialize};

use shopfloor_core::ShopId;
use shopfloor_shops::{ShopDirectory, ShopStatus};

use crate::role::Role;
use crate::user::User;

/// Why a request resolved to no authority at all.
///
/// Distinguished so the presentation layer can render "contact your admin"
/// vs "account blocked" vs "shop unavailable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoAccessCause {
    /// The account is blocked; denies everything, including root admins.
    Blocked,
    /// No membership backs the request (or no legacy role for a
    /// shop-less request).
    NoMembership,
    /// The target shop is inactive, suspended, or unknown to the directory.
    ShopNotActive,
}

/// The single authority governing one authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveAuthority {
    /// System-wide bypass; every capability check passes.
    RootAdminOverride,
    /// Shop ownership; bypasses the matrix entirely for that shop and is
    /// immune to matrix edits for the nominal role.
    ShopOwnerOverride(ShopId),
    /// Owner of a non-active shop: may only read shop metadata.
    InactiveShopOwner(ShopId),
    /// An ordinary membership; capabilities come from the matrix.
    ShopRole(Role, ShopId),
    /// Pre-multi-tenant caller with no shop context; capabilities come from
    /// the matrix entry of the legacy global role.
    LegacyGlobalRole(Role),
    NoAccess(NoAccessCause),
}

/// Resolve the effective authority for `user` targeting `target_shop`.
///
/// The explicit `target_shop` parameter always wins over `user.current_shop`;
/// the latter is a UI default, never an authorization input. Shop-scoped
/// requests must be backed by an explicit assignment — the legacy global role
/// is deliberately not consulted for them, so a stale global `admin` grants
/// nothing in unrelated tenants.
pub fn resolve_effective_role<D: ShopDirectory>(
    user: &User,
    target_shop: Option<ShopId>,
    shops: &D,
) -> EffectiveAuthority {
    if user.blocked {
        return EffectiveAuthority::NoAccess(NoAccessCause::Blocked);
    }

    if user.is_root_admin {
        return EffectiveAuthority::RootAdminOverride;
    }

    let Some(shop_id) = target_shop else {
        return match user.global_role {
            Some(role) => EffectiveAuthority::LegacyGlobalRole(role),
            None => EffectiveAuthority::NoAccess(NoAccessCause::NoMembership),
        };
    };

    let Some(assignment) = user.assignment_for(shop_id) else {
        return EffectiveAuthority::NoAccess(NoAccessCause::NoMembership);
    };

    // A shop that is not active (or is gone from the directory) grants no
    // effective role; its owner keeps metadata-read access only.
    if shops.status_of(shop_id) != Some(ShopStatus::Active) {
        return if assignment.is_owner {
            EffectiveAuthority::InactiveShopOwner(shop_id)
        } else {
            EffectiveAuthority::NoAccess(NoAccessCause::ShopNotActive)
        };
    }

    if assignment.is_owner {
        EffectiveAuthority::ShopOwnerOverride(shop_id)
    } else {
        EffectiveAuthority::ShopRole(assignment.role, shop_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use shopfloor_core::UserId;
    use shopfloor_shops::{BusinessHours, InMemoryShopDirectory, Shop, ShopSettings};

    use crate::assignment::ShopAssignment;

    fn test_shop(shop_id: ShopId, status: ShopStatus) -> Shop {
        let mut shop = Shop::new(
            shop_id,
            "Resolver Test Shop",
            ShopSettings {
                currency: "USD".into(),
                timezone: "UTC".into(),
                business_hours: BusinessHours::new(
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                )
                .unwrap(),
            },
        );
        shop.status = status;
        shop
    }

    fn directory_with(shop: Shop) -> InMemoryShopDirectory {
        let mut directory = InMemoryShopDirectory::new();
        directory.insert(shop);
        directory
    }

    fn member(uid: UserId, shop_id: ShopId, role: Role, is_owner: bool) -> User {
        let mut user = User::new(uid);
        user.assigned_shops.push(ShopAssignment {
            shop_id,
            shop_name: "Resolver Test Shop".into(),
            role,
            is_owner,
            assigned_at: Utc::now(),
            assigned_by: UserId::new(),
        });
        user
    }

    #[test]
    fn blocked_outranks_root_admin() {
        let mut user = User::new(UserId::new());
        user.is_root_admin = true;
        user.blocked = true;
        let directory = InMemoryShopDirectory::new();

        assert_eq!(
            resolve_effective_role(&user, Some(ShopId::new()), &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::Blocked)
        );
        assert_eq!(
            resolve_effective_role(&user, None, &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::Blocked)
        );
    }

    #[test]
    fn root_admin_bypasses_membership_lookup() {
        let mut user = User::new(UserId::new());
        user.is_root_admin = true;
        let directory = InMemoryShopDirectory::new();

        assert_eq!(
            resolve_effective_role(&user, Some(ShopId::new()), &directory),
            EffectiveAuthority::RootAdminOverride
        );
    }

    #[test]
    fn no_shop_context_falls_back_to_legacy_global_role() {
        let mut user = User::new(UserId::new());
        user.global_role = Some(Role::Admin);
        let directory = InMemoryShopDirectory::new();

        assert_eq!(
            resolve_effective_role(&user, None, &directory),
            EffectiveAuthority::LegacyGlobalRole(Role::Admin)
        );
    }

    #[test]
    fn no_shop_context_and_no_legacy_role_is_no_access() {
        let user = User::new(UserId::new());
        let directory = InMemoryShopDirectory::new();

        assert_eq!(
            resolve_effective_role(&user, None, &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::NoMembership)
        );
    }

    #[test]
    fn legacy_global_admin_gets_nothing_in_unrelated_shops() {
        let shop_id = ShopId::new();
        let directory = directory_with(test_shop(shop_id, ShopStatus::Active));

        let mut user = User::new(UserId::new());
        user.global_role = Some(Role::Admin);

        assert_eq!(
            resolve_effective_role(&user, Some(shop_id), &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::NoMembership)
        );
    }

    #[test]
    fn membership_resolves_to_shop_role() {
        let shop_id = ShopId::new();
        let directory = directory_with(test_shop(shop_id, ShopStatus::Active));
        let user = member(UserId::new(), shop_id, Role::Sales, false);

        assert_eq!(
            resolve_effective_role(&user, Some(shop_id), &directory),
            EffectiveAuthority::ShopRole(Role::Sales, shop_id)
        );
    }

    #[test]
    fn ownership_resolves_to_owner_override() {
        let shop_id = ShopId::new();
        let directory = directory_with(test_shop(shop_id, ShopStatus::Active));
        let user = member(UserId::new(), shop_id, Role::Staff, true);

        assert_eq!(
            resolve_effective_role(&user, Some(shop_id), &directory),
            EffectiveAuthority::ShopOwnerOverride(shop_id)
        );
    }

    #[test]
    fn suspended_shop_denies_members_but_leaves_owner_metadata_access() {
        let shop_id = ShopId::new();
        let directory = directory_with(test_shop(shop_id, ShopStatus::Suspended));

        let staffer = member(UserId::new(), shop_id, Role::Staff, false);
        assert_eq!(
            resolve_effective_role(&staffer, Some(shop_id), &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::ShopNotActive)
        );

        let owner = member(UserId::new(), shop_id, Role::Admin, true);
        assert_eq!(
            resolve_effective_role(&owner, Some(shop_id), &directory),
            EffectiveAuthority::InactiveShopOwner(shop_id)
        );
    }

    #[test]
    fn shop_missing_from_directory_is_treated_as_not_active() {
        let shop_id = ShopId::new();
        let directory = InMemoryShopDirectory::new();
        let user = member(UserId::new(), shop_id, Role::Manager, false);

        assert_eq!(
            resolve_effective_role(&user, Some(shop_id), &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::ShopNotActive)
        );
    }

    #[test]
    fn explicit_target_wins_over_current_shop() {
        let home = ShopId::new();
        let elsewhere = ShopId::new();
        let directory = directory_with(test_shop(home, ShopStatus::Active));

        let mut user = member(UserId::new(), home, Role::Manager, false);
        user.current_shop = Some(home);

        // current_shop points at a shop the user belongs to, but the explicit
        // target is a different shop with no membership behind it.
        assert_eq!(
            resolve_effective_role(&user, Some(elsewhere), &directory),
            EffectiveAuthority::NoAccess(NoAccessCause::NoMembership)
        );
    }
}
