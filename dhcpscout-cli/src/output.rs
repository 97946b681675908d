//! Human-readable rendering of query results

use dhcpscout_core::ServerInfo;
use dhcpscout_iface::{LinkInterface, MacSource, ResolvedMac};
use std::time::Duration;

/// Printed after an error caused by missing privileges
pub const PRIVILEGE_HINT: &str =
    "Hint: binding the DHCP client port (68) needs root or CAP_NET_BIND_SERVICE";

/// All servers, one block each, or a note that nobody answered
pub fn format_servers(servers: &[ServerInfo], timeout: Duration) -> String {
    if servers.is_empty() {
        return format!(
            "No DHCP servers responded within {} s\n",
            timeout.as_secs_f64()
        );
    }

    servers
        .iter()
        .map(format_server)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_server(server: &ServerInfo) -> String {
    let lease = server
        .lease_seconds
        .map(format_lease)
        .unwrap_or_else(|| "-".to_string());

    let lines = [
        format!("DHCP server {}", server.id),
        format!("  Offered address: {}", server.offered_address),
        format!(
            "  Subnet mask:     {}",
            server.subnet_mask.as_deref().unwrap_or("-")
        ),
        format!("  Routers:         {}", join_or_dash(&server.routers)),
        format!("  DNS servers:     {}", join_or_dash(&server.dns_servers)),
        format!("  Lease time:      {}", lease),
        format!(
            "  Vendor:          {}",
            server.vendor.as_deref().unwrap_or("-")
        ),
    ];

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// `3600` becomes `3600s (1h 0m)`
pub fn format_lease(seconds: u32) -> String {
    if seconds == u32::MAX {
        return "infinite".to_string();
    }

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}s ({}d {}h {}m)", seconds, days, hours, minutes)
    } else if hours > 0 {
        format!("{}s ({}h {}m)", seconds, hours, minutes)
    } else {
        format!("{}s", seconds)
    }
}

/// One line per interface: name, MAC, IPv4 addresses, flags
pub fn format_interface(iface: &LinkInterface) -> String {
    let mac = iface
        .hardware_address()
        .map(|mac| mac.to_string())
        .unwrap_or_else(|| "-".to_string());

    let addrs: Vec<String> = iface.ipv4.iter().map(|ip| ip.to_string()).collect();

    let mut flags = vec![if iface.is_up { "UP" } else { "DOWN" }];
    if iface.is_loopback {
        flags.push("LOOPBACK");
    }

    format!(
        "{:<16} {:<17} {:<31} {}",
        iface.name,
        mac,
        join_or_dash(&addrs),
        flags.join(",")
    )
}

pub fn format_resolved(resolved: &ResolvedMac) -> String {
    match (&resolved.source, &resolved.interface) {
        (MacSource::Random, _) => format!(
            "{} (random, locally administered: no interface has a hardware address)",
            resolved.mac
        ),
        (MacSource::DefaultAdapter, Some(name)) => {
            format!("{} (default adapter {})", resolved.mac, name)
        }
        (_, Some(name)) => format!("{} ({})", resolved.mac, name),
        (_, None) => resolved.mac.to_string(),
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
