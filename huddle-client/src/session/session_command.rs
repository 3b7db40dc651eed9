/// User actions dispatched into the session loop.
#[derive(Debug)]
pub enum SessionCommand {
    /// Flip microphone enablement. Never renegotiates.
    ToggleMute,

    /// Flip camera enablement. Never renegotiates.
    ToggleVideo,

    /// Start or stop broadcasting the screen in place of the camera.
    ToggleScreenShare,

    /// Send a chat line to the room.
    SendChat(String),

    /// Relay an opaque whiteboard payload to the room.
    SendDrawing(serde_json::Value),

    /// Tear down every peer link, stop local media, and disconnect.
    Leave,
}
