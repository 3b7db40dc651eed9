mod context;
mod directory;
mod observer;
mod room_session;
mod session_command;
mod session_config;
mod session_handle;

pub use context::*;
pub use directory::*;
pub use observer::*;
pub use room_session::*;
pub use session_command::*;
pub use session_config::*;
pub use session_handle::*;
