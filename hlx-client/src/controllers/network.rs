//! Network controller
//!
//! The network object is read-only on the wire; the routes only keep the
//! mirror current.

use std::time::Duration;

use hlx_codec::network;
use hlx_model::Network;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "network";

pub struct NetworkController {
    context: ControllerContext,
}

impl NetworkController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    /// Sweep the network properties; completes on the terminating echo
    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                network::QueryNetwork {}.encode_request(),
                network::QueryNetwork::response_pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    /// Snapshot of the mirrored network state
    pub fn network(&self) -> Network {
        self.context.model.lock().network().clone()
    }

    fn register_routes(&self) {
        let ctx = &self.context;

        ctx.route(NAME, network::Dhcp::response_pattern(), network::Dhcp::from_captures, |ctx, cmd| {
            let changed = {
                let mut model = ctx.model.lock();
                let network = model.network_mut();
                let changed = network.dhcp_enabled != cmd.enabled;
                network.dhcp_enabled = cmd.enabled;
                changed
            };
            if changed {
                ctx.emit(StateChange::NetworkUpdated);
            }
        });

        ctx.route(NAME, network::Sddp::response_pattern(), network::Sddp::from_captures, |ctx, cmd| {
            let changed = {
                let mut model = ctx.model.lock();
                let network = model.network_mut();
                let changed = network.sddp_enabled != cmd.enabled;
                network.sddp_enabled = cmd.enabled;
                changed
            };
            if changed {
                ctx.emit(StateChange::NetworkUpdated);
            }
        });

        ctx.route(
            NAME,
            network::IpAddress::response_pattern(),
            network::IpAddress::from_captures,
            |ctx, cmd| {
                let changed = {
                    let mut model = ctx.model.lock();
                    let network = model.network_mut();
                    let changed = network.address != cmd.address;
                    network.address = cmd.address;
                    changed
                };
                if changed {
                    ctx.emit(StateChange::NetworkUpdated);
                }
            },
        );

        ctx.route(
            NAME,
            network::Netmask::response_pattern(),
            network::Netmask::from_captures,
            |ctx, cmd| {
                let changed = {
                    let mut model = ctx.model.lock();
                    let network = model.network_mut();
                    let changed = network.netmask != cmd.netmask;
                    network.netmask = cmd.netmask;
                    changed
                };
                if changed {
                    ctx.emit(StateChange::NetworkUpdated);
                }
            },
        );

        ctx.route(
            NAME,
            network::Gateway::response_pattern(),
            network::Gateway::from_captures,
            |ctx, cmd| {
                let changed = {
                    let mut model = ctx.model.lock();
                    let network = model.network_mut();
                    let changed = network.gateway != cmd.gateway;
                    network.gateway = cmd.gateway;
                    changed
                };
                if changed {
                    ctx.emit(StateChange::NetworkUpdated);
                }
            },
        );

        ctx.route(
            NAME,
            network::EthernetAddress::response_pattern(),
            network::EthernetAddress::from_captures,
            |ctx, cmd| {
                let changed = {
                    let mut model = ctx.model.lock();
                    let network = model.network_mut();
                    let changed = network.ethernet_address != cmd.address;
                    network.ethernet_address = cmd.address.clone();
                    changed
                };
                if changed {
                    ctx.emit(StateChange::NetworkUpdated);
                }
            },
        );
    }
}
