//! Ownership and role predicates over (actor, entity) pairs.

use models::{posting, posting_comment};

use crate::identity::Actor;

pub fn owns_posting(actor: &Actor, p: &posting::Model) -> bool {
    p.user_id == actor.id
}

pub fn can_modify_posting(actor: &Actor, p: &posting::Model) -> bool {
    owns_posting(actor, p)
}

pub fn can_delete_posting(actor: &Actor, p: &posting::Model) -> bool {
    owns_posting(actor, p) || actor.is_admin()
}

/// Comments are edited and removed by their author only, admins included.
pub fn can_manage_comment(actor: &Actor, c: &posting_comment::Model) -> bool {
    c.user_id == actor.id
}

/// `used` postings inside the window still leave room under `limit`.
pub fn quota_allows(used: u64, limit: i32) -> bool {
    u64::try_from(limit).map(|l| used < l).unwrap_or(false)
}
