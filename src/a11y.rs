use tokio::sync::broadcast;

/// Urgency of an announcement, matching the `aria-live` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Polite,
    Assertive,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Polite => "polite",
            Priority::Assertive => "assertive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub priority: Priority,
}

/// Announcer
///
/// The channel that surfaces text to assistive technology.
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str, priority: Priority);
}

/// LiveRegion
///
/// Broadcasts announcements to every subscriber, the way a live region is read by whatever
/// screen reader is attached. Announcing with nobody listening is not an error.
#[derive(Debug, Clone)]
pub struct LiveRegion {
    sender: broadcast::Sender<Announcement>,
}

impl LiveRegion {
    /// Keeps up to `capacity` unread announcements per subscriber (at least one).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Announcement> {
        self.sender.subscribe()
    }
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new(32)
    }
}

impl Announcer for LiveRegion {
    fn announce(&self, message: &str, priority: Priority) {
        tracing::debug!(priority = priority.as_str(), message, "announce");
        let _ = self.sender.send(Announcement {
            message: message.to_string(),
            priority,
        });
    }
}
