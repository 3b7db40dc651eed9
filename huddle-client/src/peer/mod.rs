mod peer_config;
mod peer_event;
mod peer_link;
mod peer_registry;
mod pending_ice;
mod remote_stream;

pub use peer_config::*;
pub use peer_event::*;
pub use peer_link::*;
pub use peer_registry::*;
pub use pending_ice::*;
pub use remote_stream::*;
