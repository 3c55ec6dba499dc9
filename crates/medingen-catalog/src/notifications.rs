//! In-app notifications.

use serde::{Deserialize, Serialize};

use crate::ids::NotificationId;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Offer,
    Reminder,
    Tip,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Offer => "offer",
            NotificationKind::Reminder => "reminder",
            NotificationKind::Tip => "tip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" => Some(NotificationKind::Info),
            "success" => Some(NotificationKind::Success),
            "warning" => Some(NotificationKind::Warning),
            "offer" => Some(NotificationKind::Offer),
            "reminder" => Some(NotificationKind::Reminder),
            "tip" => Some(NotificationKind::Tip),
            _ => None,
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    /// Relative time label, e.g. "2 minutes ago".
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub read: bool,
    /// Call-to-action label.
    #[serde(default)]
    pub action: Option<String>,
}

/// Which notifications to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Kind(NotificationKind),
}

impl NotificationFilter {
    /// Parse a filter id: `all`, `unread` or a kind name. Unknown ids mean `All`.
    pub fn parse(id: &str) -> Self {
        match id {
            "unread" => NotificationFilter::Unread,
            other => NotificationKind::from_str(other)
                .map(NotificationFilter::Kind)
                .unwrap_or(NotificationFilter::All),
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Kind(kind) => notification.kind == *kind,
        }
    }
}

/// Holds notifications and the read/delete actions on them.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn filtered(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| filter.matches(n))
            .collect()
    }

    pub fn count(&self, filter: NotificationFilter) -> usize {
        self.notifications.iter().filter(|n| filter.matches(n)).count()
    }

    pub fn unread_count(&self) -> usize {
        self.count(NotificationFilter::Unread)
    }

    /// Returns false if no notification has that id.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    pub fn delete(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.notifications.iter().position(|n| n.id == id)?;
        Some(self.notifications.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, kind: NotificationKind, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            title: format!("n{}", id),
            message: String::new(),
            kind,
            time: "1 hour ago".to_string(),
            read,
            action: None,
        }
    }

    fn center() -> NotificationCenter {
        NotificationCenter::new(vec![
            note(1, NotificationKind::Info, false),
            note(2, NotificationKind::Success, false),
            note(3, NotificationKind::Info, true),
            note(4, NotificationKind::Offer, false),
        ])
    }

    #[test]
    fn test_filter_counts() {
        let c = center();
        assert_eq!(c.count(NotificationFilter::All), 4);
        assert_eq!(c.unread_count(), 3);
        assert_eq!(c.count(NotificationFilter::Kind(NotificationKind::Info)), 2);
        assert_eq!(c.count(NotificationFilter::parse("offer")), 1);
        assert_eq!(NotificationFilter::parse("bogus"), NotificationFilter::All);
    }

    #[test]
    fn test_mark_read_and_all() {
        let mut c = center();
        assert!(c.mark_read(NotificationId::new(1)));
        assert!(!c.mark_read(NotificationId::new(99)));
        assert_eq!(c.unread_count(), 2);

        c.mark_all_read();
        assert_eq!(c.unread_count(), 0);
    }

    #[test]
    fn test_delete() {
        let mut c = center();
        assert!(c.delete(NotificationId::new(2)).is_some());
        assert!(c.delete(NotificationId::new(2)).is_none());
        assert_eq!(c.count(NotificationFilter::Kind(NotificationKind::Success)), 0);
    }

    #[test]
    fn test_deserialize_type_field() {
        let n: Notification = serde_json::from_str(
            r#"{"id":6,"title":"Exclusive Offer","message":"25% off","type":"offer","time":"2 days ago","read":false,"action":"Use Offer"}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Offer);
        assert_eq!(n.action.as_deref(), Some("Use Offer"));
    }
}
