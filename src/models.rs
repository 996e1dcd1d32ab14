use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub text: String,
}

/// A raw chat message as produced by the source chat system. Field names
/// mirror the wire format, including its mixed casing.
///
/// `receive_At` and `tsDifference` are server-authoritative: whatever a
/// caller sends is discarded and restamped on ingestion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub mid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub msg_type: String,
    pub sender_id: String,
    pub agent_id: i64,
    pub payload: Payload,
    pub content: String,
    pub username: String,
    /// Original message timestamp from the source system, epoch milliseconds.
    pub ts: i64,
    pub paused_diff_seconds: i64,
    /// Caller-supplied primary key. Re-posting an id overwrites silently.
    pub id: i64,
    #[serde(rename = "send_At")]
    pub send_at: i64,
    #[serde(rename = "receive_At", default)]
    pub receive_at: Option<i64>,
    /// `receive_At - send_At`; negative under clock skew, not corrected.
    #[serde(rename = "tsDifference", default)]
    pub ts_difference: Option<i64>,
}
