use serde::{Deserialize, Serialize};

/// One chat line as carried over the signaling channel. The client relays
/// these verbatim; history storage lives behind the room API, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub display_name: String,
    pub message: String,
    pub time: Option<String>,
}
