//! The access decision function.

use crate::domain::catalog::{Podcast, Transaction, User};

/// Decides whether `user` may access the full content of `podcast`.
///
/// The rules, in order:
/// 1. no user, no access;
/// 2. a subscription grants everything;
/// 3. a free-flagged episode is accessible while the user's single free
///    slot is unclaimed or already points at this very episode; the free
///    allocation is exclusive and the first claim wins;
/// 4. a settled single-episode purchase of this exact episode grants it;
/// 5. otherwise no access.
///
/// `ledger` is the user's transaction history; passing another user's
/// ledger is a caller bug the resolver cannot detect.
pub fn has_full_access(user: Option<&User>, podcast: &Podcast, ledger: &[Transaction]) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.has_subscription {
        return true;
    }

    if podcast.is_free
        && (user.free_podcast_id.is_none() || user.free_podcast_id == Some(podcast.id))
    {
        return true;
    }

    ledger.iter().any(|txn| txn.is_settled_purchase_of(podcast.id))
}
