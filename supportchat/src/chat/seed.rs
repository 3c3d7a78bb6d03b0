//! Welcome messages shown when a session opens.

use supportchat_proto::message::{Message, Mood, Timestamp};

const MINUTE_MS: u64 = 60_000;

/// The historical messages a new session starts with.
///
/// Timestamps are 5, 4 and 3 minutes before `now`.
#[must_use]
pub fn welcome_messages(now: Timestamp) -> Vec<Message> {
    vec![
        Message::synthetic(
            "Kash-Guest-A12B",
            "Hi everyone, I've been feeling really overwhelmed with career anxiety lately. \
             Anyone else dealing with this?",
            now.minus_millis(5 * MINUTE_MS),
            Some(Mood::Concerned),
        ),
        Message::synthetic(
            "Anon-Helper-X9Y2",
            "You're not alone! I went through similar feelings during placement season. \
             What helps me is breaking things down into small steps.",
            now.minus_millis(4 * MINUTE_MS),
            Some(Mood::Positive),
        ),
        Message::synthetic(
            "Guest-Support-M7N4",
            "That's really good advice. I've found that talking to friends and taking breaks \
             helps too. Remember to be kind to yourself.",
            now.minus_millis(3 * MINUTE_MS),
            Some(Mood::Positive),
        ),
    ]
}
