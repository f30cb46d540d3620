//! Shop memberships and the mutation API that guards their invariants.
//!
//! Two invariants are enforced here, and only here:
//! - a user holds at most one assignment per shop;
//! - a shop has at most one owner across the whole system.
//!
//! Every operation runs all invariant checks before touching any state, so a
//! failed call leaves both the user's collection and the owner slots exactly
//! as they were. Callers recover by choosing a different operation or target,
//! never by retrying the same call unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use shopfloor_core::{ShopId, UserId};
use shopfloor_shops::{Shop, ShopDirectory};

use crate::role::Role;
use crate::user::User;

/// A user's membership in one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAssignment {
    pub shop_id: ShopId,

    /// Denormalized snapshot of the shop name at assignment time. May drift
    /// from `Shop::name`; never re-synced.
    pub shop_name: String,

    pub role: Role,

    /// Ownership of the shop. Grants full access there regardless of the
    /// matrix, and is exclusive per shop.
    pub is_owner: bool,

    pub assigned_at: DateTime<Utc>,
    pub assigned_by: UserId,
}

/// Typed failures of the mutation API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// The user already has an assignment for this shop; use
    /// [`AssignmentStore::update_role`] instead.
    #[error("user already assigned to shop {shop_id}")]
    DuplicateAssignment { shop_id: ShopId },

    /// Another user already holds ownership of this shop; ownership moves
    /// only through [`AssignmentStore::transfer_ownership`].
    #[error("shop {shop_id} already has an owner ({owner})")]
    OwnershipConflict { shop_id: ShopId, owner: UserId },

    #[error("no assignment found for shop {shop_id}")]
    AssignmentNotFound { shop_id: ShopId },

    /// The owner's role cannot be changed; transfer ownership first.
    #[error("cannot change the role of the owner of shop {shop_id}")]
    CannotDemoteOwner { shop_id: ShopId },

    /// The owner's assignment cannot be removed; transfer ownership or delete
    /// the shop first.
    #[error("cannot remove the owner assignment for shop {shop_id}")]
    CannotRemoveOwnerAssignment { shop_id: ShopId },

    #[error("user is not the current owner of shop {shop_id}")]
    NotCurrentOwner { shop_id: ShopId },
}

/// In-memory assignment state shared across users: the exclusive owner slot
/// per shop.
///
/// Per-user collections live on the [`User`] record itself; this store tracks
/// the cross-user piece (who owns which shop) and is the single entry point
/// for every mutation. All operations take `&mut self` so a single writer
/// guards both sides, matching the single-writer-per-aggregate discipline the
/// storage collaborator must uphold.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    owners: HashMap<ShopId, UserId>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded owner of a shop, if any.
    pub fn owner_of(&self, shop_id: ShopId) -> Option<UserId> {
        self.owners.get(&shop_id).copied()
    }

    /// Register the owner slots held by an externally supplied user record.
    ///
    /// Identity management hands the engine users whose collections were
    /// populated elsewhere; seeding keeps the owner index consistent with
    /// them. Checks every slot before recording any, so a conflict leaves the
    /// store untouched.
    pub fn adopt(&mut self, user: &User) -> Result<(), AssignmentError> {
        for assignment in user.assigned_shops.iter().filter(|a| a.is_owner) {
            if let Some(owner) = self.owner_of(assignment.shop_id) {
                if owner != user.uid {
                    return Err(AssignmentError::OwnershipConflict {
                        shop_id: assignment.shop_id,
                        owner,
                    });
                }
            }
        }
        for assignment in user.assigned_shops.iter().filter(|a| a.is_owner) {
            self.owners.insert(assignment.shop_id, user.uid);
        }
        Ok(())
    }

    /// Create a membership for `user` in `shop`.
    pub fn assign(
        &mut self,
        user: &mut User,
        shop: &Shop,
        role: Role,
        is_owner: bool,
        assigned_by: UserId,
    ) -> Result<ShopAssignment, AssignmentError> {
        let shop_id = shop.shop_id;

        if user.assignment_for(shop_id).is_some() {
            return Err(AssignmentError::DuplicateAssignment { shop_id });
        }
        if is_owner {
            if let Some(owner) = self.owner_of(shop_id) {
                return Err(AssignmentError::OwnershipConflict { shop_id, owner });
            }
        }

        let assignment = ShopAssignment {
            shop_id,
            shop_name: shop.name.clone(),
            role,
            is_owner,
            assigned_at: Utc::now(),
            assigned_by,
        };
        user.assigned_shops.push(assignment.clone());
        if is_owner {
            self.owners.insert(shop_id, user.uid);
        }

        tracing::debug!(
            user = %user.uid,
            shop = %shop_id,
            role = %role,
            is_owner,
            "shop assignment created"
        );
        Ok(assignment)
    }

    /// Change the role of an existing membership.
    ///
    /// A no-op when the role is unchanged. The owner's role is pinned until
    /// ownership is transferred.
    pub fn update_role(
        &mut self,
        user: &mut User,
        shop_id: ShopId,
        new_role: Role,
    ) -> Result<ShopAssignment, AssignmentError> {
        let assignment = user
            .assignment_for_mut(shop_id)
            .ok_or(AssignmentError::AssignmentNotFound { shop_id })?;

        if assignment.role == new_role {
            return Ok(assignment.clone());
        }
        if assignment.is_owner {
            return Err(AssignmentError::CannotDemoteOwner { shop_id });
        }

        assignment.role = new_role;
        let updated = assignment.clone();

        tracing::debug!(user = %user.uid, shop = %shop_id, role = %new_role, "role updated");
        Ok(updated)
    }

    /// Remove a membership. Owner assignments must be transferred away first.
    pub fn remove(
        &mut self,
        user: &mut User,
        shop_id: ShopId,
    ) -> Result<ShopAssignment, AssignmentError> {
        let index = user
            .assigned_shops
            .iter()
            .position(|a| a.shop_id == shop_id)
            .ok_or(AssignmentError::AssignmentNotFound { shop_id })?;

        if user.assigned_shops[index].is_owner {
            return Err(AssignmentError::CannotRemoveOwnerAssignment { shop_id });
        }

        let removed = user.assigned_shops.remove(index);
        tracing::debug!(user = %user.uid, shop = %shop_id, "shop assignment removed");
        Ok(removed)
    }

    /// Move ownership of `shop_id` from one user to another.
    ///
    /// Atomic: `from` keeps a non-owner `admin` membership, `to` gains the
    /// owner slot (a membership is created for them if absent, role `admin`,
    /// recorded as assigned by `from`).
    pub fn transfer_ownership(
        &mut self,
        from: &mut User,
        to: &mut User,
        shop_id: ShopId,
    ) -> Result<(), AssignmentError> {
        if from.owned_assignment_for(shop_id).is_none() {
            return Err(AssignmentError::NotCurrentOwner { shop_id });
        }
        if let Some(owner) = self.owner_of(shop_id) {
            // Stale record: the index disagrees with the supplied user.
            if owner != from.uid {
                return Err(AssignmentError::NotCurrentOwner { shop_id });
            }
        }

        let shop_name = from
            .assignment_for(shop_id)
            .map(|a| a.shop_name.clone())
            .unwrap_or_default();

        // Checks done; apply both sides.
        let from_assignment = from
            .assignment_for_mut(shop_id)
            .ok_or(AssignmentError::NotCurrentOwner { shop_id })?;
        from_assignment.is_owner = false;
        from_assignment.role = Role::Admin;

        match to.assignment_for_mut(shop_id) {
            Some(assignment) => assignment.is_owner = true,
            None => to.assigned_shops.push(ShopAssignment {
                shop_id,
                shop_name,
                role: Role::Admin,
                is_owner: true,
                assigned_at: Utc::now(),
                assigned_by: from.uid,
            }),
        }
        self.owners.insert(shop_id, to.uid);

        tracing::debug!(
            shop = %shop_id,
            from = %from.uid,
            to = %to.uid,
            "shop ownership transferred"
        );
        Ok(())
    }
}

/// Assignments referencing shops the directory no longer knows.
///
/// Shop deletion never cascades into assignment collections; leftovers are
/// surfaced here for an admin to clean up explicitly.
pub fn orphaned_assignments<'a, D: ShopDirectory>(
    user: &'a User,
    shops: &D,
) -> Vec<&'a ShopAssignment> {
    user.assigned_shops
        .iter()
        .filter(|a| shops.shop(a.shop_id).is_none())
        .collect()
}
