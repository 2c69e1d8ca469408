use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Immutable once created; the timestamp is a
/// display-only clock label captured at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    text: String,
    sender: Sender,
    timestamp: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: clock_label(Local::now().time()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// 12-hour clock label, e.g. `1:05 PM`.
pub(crate) fn clock_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_label_is_twelve_hour() {
        let t = NaiveTime::from_hms_opt(13, 5, 0).unwrap();
        assert_eq!(clock_label(t), "1:05 PM");
    }

    #[test]
    fn clock_label_midnight_is_twelve_am() {
        let t = NaiveTime::from_hms_opt(0, 30, 59).unwrap();
        assert_eq!(clock_label(t), "12:30 AM");
    }

    #[test]
    fn clock_label_pads_minutes() {
        let t = NaiveTime::from_hms_opt(9, 7, 0).unwrap();
        assert_eq!(clock_label(t), "9:07 AM");
    }

    #[test]
    fn message_records_sender() {
        let msg = ChatMessage::new("hello", Sender::User);
        assert!(msg.is_from_user());
        assert_eq!(msg.text(), "hello");

        let msg = ChatMessage::new("hi", Sender::Bot);
        assert!(!msg.is_from_user());
    }
}
