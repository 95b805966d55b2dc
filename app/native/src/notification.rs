//! Posted notifications and the store that holds them.

use serde::{Deserialize, Serialize};

/// A posted notification, reduced to what coordination needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    /// Opaque identifier.
    pub key: String,
    /// The ranking layer decided this notification should interrupt.
    pub interrupt: bool,
    /// The notification asks to be shown expanded as a heads-up alert.
    pub expanded_hint: bool,
    pub clearable: bool,
    /// Carries a full-screen action (incoming call, alarm).
    pub full_screen_intent: bool,
    /// Hidden notifications stay in the store but are not listed.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

const fn visible_by_default() -> bool { true }

impl Notification {
    /// A visible, clearable notification that does not interrupt.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            clearable: true,
            visible: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn interrupting(mut self) -> Self {
        self.interrupt = true;
        self
    }
}

/// Read access to the notification list plus the updates the coordinator
/// performs on it.
pub trait NotificationStore {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&Notification>;

    fn has_visible_items(&self) -> bool;

    fn has_clearable_items(&self) -> bool;

    /// Inserts or replaces the notification with the same key.
    fn upsert(&mut self, notification: Notification);

    /// Removes the notification with `key`, returning it if present.
    fn remove(&mut self, key: &str) -> Option<Notification>;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn find(&self, key: &str) -> Option<&Notification> {
        (0..self.len()).filter_map(|i| self.get(i)).find(|n| n.key == key)
    }
}

/// Vec-backed [`NotificationStore`].
#[derive(Clone, Debug, Default)]
pub struct NotificationList {
    entries: Vec<Notification>,
}

impl NotificationList {
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> { self.entries.iter() }
}

impl NotificationStore for NotificationList {
    fn len(&self) -> usize { self.entries.len() }

    fn get(&self, index: usize) -> Option<&Notification> { self.entries.get(index) }

    fn has_visible_items(&self) -> bool { self.entries.iter().any(|n| n.visible) }

    fn has_clearable_items(&self) -> bool { self.entries.iter().any(|n| n.visible && n.clearable) }

    fn upsert(&mut self, notification: Notification) {
        if let Some(existing) = self.entries.iter_mut().find(|n| n.key == notification.key) {
            *existing = notification;
        } else {
            self.entries.push(notification);
        }
    }

    fn remove(&mut self, key: &str) -> Option<Notification> {
        let index = self.entries.iter().position(|n| n.key == key)?;
        Some(self.entries.remove(index))
    }
}
