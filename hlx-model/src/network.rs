//! Network interface state
//!
//! Observable over the protocol but not mutable by it; the values reflect
//! what the head (or the simulator's configuration) reports.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// The head's Ethernet interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub dhcp_enabled: bool,
    pub sddp_enabled: bool,
    pub ethernet_address: String,
}

impl Network {
    pub(crate) fn private_defaults() -> Self {
        Self {
            address: Ipv4Addr::new(192, 168, 1, 40),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            dhcp_enabled: true,
            sddp_enabled: false,
            ethernet_address: "00:50:C2:00:00:01".to_string(),
        }
    }
}
