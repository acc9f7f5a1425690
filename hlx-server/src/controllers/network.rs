//! Network request handlers
//!
//! The network object is read-only on the wire; the only verb is the query
//! sweep.

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::network;
use hlx_model::HlxModel;
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel) -> Result<Vec<Bytes>> {
    let net = model.network();
    Ok(vec![
        network::Dhcp { enabled: net.dhcp_enabled }.encode_response(),
        network::Sddp { enabled: net.sddp_enabled }.encode_response(),
        network::IpAddress { address: net.address }.encode_response(),
        network::Netmask { netmask: net.netmask }.encode_response(),
        network::Gateway { gateway: net.gateway }.encode_response(),
        network::EthernetAddress { address: net.ethernet_address.clone() }.encode_response(),
    ])
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, network::QueryNetwork, |m, cmd| {
        let mut frames = dump(m)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });
}
