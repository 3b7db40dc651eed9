use huddle_core::IceServerConfig;

/// ICE server set applied to every peer link in the room.
#[derive(Clone)]
pub struct PeerConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            ice_servers: IceServerConfig::default_stun(),
        }
    }
}
