//! Notification delivery channel identifiers.
//!
//! Stored as strings in `notification_preferences.channels` and on each
//! `notifications` row, so the constants live in `core` where both the
//! repository layer and the notification router can reach them.

/// In-app notification, delivered over WebSocket and listed in the bell menu.
pub const CHANNEL_IN_APP: &str = "in_app";

/// Email delivery via the SMTP relay.
pub const CHANNEL_EMAIL: &str = "email";

/// HTTP POST to a user-configured webhook URL.
pub const CHANNEL_WEBHOOK: &str = "webhook";

/// Deferred delivery: queued until the next digest window.
pub const CHANNEL_DIGEST: &str = "digest";

/// All recognised channel values.
pub const VALID_CHANNELS: &[&str] = &[
    CHANNEL_IN_APP,
    CHANNEL_EMAIL,
    CHANNEL_WEBHOOK,
    CHANNEL_DIGEST,
];

/// Returns `true` if `channel` is a recognised delivery channel.
pub fn is_valid_channel(channel: &str) -> bool {
    VALID_CHANNELS.contains(&channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_channels_are_valid() {
        for c in VALID_CHANNELS {
            assert!(is_valid_channel(c));
        }
    }

    #[test]
    fn unknown_channel_is_rejected() {
        assert!(!is_valid_channel("sms"));
        assert!(!is_valid_channel(""));
    }
}
