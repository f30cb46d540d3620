//! `shopfloor-authz` — pure permission-resolution engine.
//!
//! Given a user record, a target shop, and a requested (resource, action)
//! pair, this crate deterministically decides allow/deny. It reconciles three
//! overlapping authority sources: the legacy single global role, per-shop role
//! assignments with a permission matrix, and owner/root-admin overrides.
//!
//! This crate is intentionally decoupled from HTTP, storage, and session
//! handling: it never authenticates, never persists, and never enforces at a
//! network boundary.

pub mod assignment;
pub mod evaluator;
pub mod matrix;
pub mod resolver;
pub mod role;
pub mod user;

pub use assignment::{AssignmentError, AssignmentStore, ShopAssignment, orphaned_assignments};
pub use evaluator::{CapabilityEvaluator, Decision, DecisionReason};
pub use matrix::{Action, ActionSet, CapabilityTable, PermissionMatrix, Resource};
pub use resolver::{EffectiveAuthority, NoAccessCause, resolve_effective_role};
pub use role::Role;
pub use user::User;
