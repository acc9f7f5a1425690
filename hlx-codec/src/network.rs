//! Network commands (object letter `N`)
//!
//! The head's network interface is observable but not mutable over the
//! protocol: `QN` yields one frame per property, ending with the query echo.
//! The property forms exist as responses/notifications only, but requests
//! still parse so the server can reject them uniformly.

use std::net::Ipv4Addr;

use crate::command::parse_bool_digit;
use crate::error::CodecError;

fn parse_ipv4(capture: &str) -> crate::error::Result<Ipv4Addr> {
    capture
        .parse::<Ipv4Addr>()
        .map_err(|_| CodecError::BadCommand(format!("address '{capture}'")))
}

hlx_command! {
    /// Query the network configuration
    pub struct QueryNetwork {}
    pattern = (r"QN", 0);
    build = |_cmd| "QN".to_string();
    parse = |_captures| Ok(Self {});
}

hlx_command! {
    /// DHCP enablement report
    pub struct Dhcp { pub enabled: bool }
    pattern = (r"NDHCP([01])", 1);
    build = |cmd| format!("NDHCP{}", cmd.enabled as u8);
    parse = |captures| Ok(Self { enabled: parse_bool_digit(&captures[0])? });
}

hlx_command! {
    /// SDDP (discovery protocol) enablement report
    pub struct Sddp { pub enabled: bool }
    pattern = (r"NSDDP([01])", 1);
    build = |cmd| format!("NSDDP{}", cmd.enabled as u8);
    parse = |captures| Ok(Self { enabled: parse_bool_digit(&captures[0])? });
}

hlx_command! {
    /// IPv4 address report
    pub struct IpAddress { pub address: Ipv4Addr }
    pattern = (r"NIP,((?:\d{1,3}\.){3}\d{1,3})", 1);
    build = |cmd| format!("NIP,{}", cmd.address);
    parse = |captures| Ok(Self { address: parse_ipv4(&captures[0])? });
}

hlx_command! {
    /// IPv4 netmask report
    pub struct Netmask { pub netmask: Ipv4Addr }
    pattern = (r"NNM,((?:\d{1,3}\.){3}\d{1,3})", 1);
    build = |cmd| format!("NNM,{}", cmd.netmask);
    parse = |captures| Ok(Self { netmask: parse_ipv4(&captures[0])? });
}

hlx_command! {
    /// IPv4 default gateway report
    pub struct Gateway { pub gateway: Ipv4Addr }
    pattern = (r"NGW,((?:\d{1,3}\.){3}\d{1,3})", 1);
    build = |cmd| format!("NGW,{}", cmd.gateway);
    parse = |captures| Ok(Self { gateway: parse_ipv4(&captures[0])? });
}

hlx_command! {
    /// Ethernet (MAC) address report
    pub struct EthernetAddress { pub address: String }
    pattern = (r"NMAC,([0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})", 1);
    build = |cmd| format!("NMAC,{}", cmd.address);
    parse = |captures| Ok(Self { address: captures[0].clone() });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_round_trip() {
        let ip = IpAddress { address: Ipv4Addr::new(192, 168, 1, 40) };
        assert_eq!(&ip.encode_response()[..], b"(NIP,192.168.1.40)\r\n");
        assert_eq!(IpAddress::parse_response(b"(NIP,192.168.1.40)").unwrap().unwrap(), ip);
    }

    #[test]
    fn test_invalid_address_is_bad_command() {
        assert!(matches!(
            IpAddress::parse_response(b"(NIP,300.1.1.1)"),
            Some(Err(CodecError::BadCommand(_)))
        ));
    }

    #[test]
    fn test_mac_address() {
        let mac = EthernetAddress { address: "00:1A:2B:3C:4D:5E".to_string() };
        assert_eq!(&mac.encode_response()[..], b"(NMAC,00:1A:2B:3C:4D:5E)\r\n");
        assert!(EthernetAddress::parse_response(b"(NMAC,00:1A:2B)").is_none());
    }

    #[test]
    fn test_query_network() {
        assert!(QueryNetwork::parse_request(b"QN").is_some());
        assert!(QueryNetwork::parse_request(b"QNX").is_none());
    }
}
