// src/ops/notifications.rs

use uuid::Uuid;

use crate::{
    error::{LedgerError, Result},
    ledger::Ledger,
    models::notification::Notification,
};

/// A user's notifications, newest first.
pub fn notifications_for(ledger: &Ledger, user_id: Uuid) -> Vec<&Notification> {
    let mut notifications: Vec<&Notification> = ledger
        .snapshot()
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id)
        .collect();
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications
}

pub fn unread_count(ledger: &Ledger, user_id: Uuid) -> usize {
    ledger
        .snapshot()
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id && !n.read)
        .count()
}

/// Marks a notification read. Already-read notifications are left as-is.
pub fn mark_read(ledger: &mut Ledger, notification_id: Uuid) -> Result<()> {
    let current = ledger
        .snapshot()
        .notifications
        .iter()
        .find(|n| n.id == notification_id)
        .ok_or(LedgerError::NotFound("notification", notification_id))?;
    if current.read {
        return Ok(());
    }

    let mut next = ledger.snapshot().clone();
    if let Some(notification) = next
        .notifications
        .iter_mut()
        .find(|n| n.id == notification_id)
    {
        notification.read = true;
    }
    ledger.commit(next)
}
