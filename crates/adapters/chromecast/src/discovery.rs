//! mDNS discovery of cast devices.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};

use crate::config::{DEFAULT_PORT, SERVICE_TYPE};
use crate::error::ChromecastError;

/// A cast device found on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastService {
    /// Friendly name, as shown in the Google Home app.
    pub name: String,
    pub address: IpAddr,
    pub port: u16,
}

/// Browse for cast devices for `timeout` and return each one once, in the
/// order they answered.
///
/// # Errors
///
/// Returns [`ChromecastError::Discovery`] if the mDNS daemon cannot start.
pub fn discover(timeout: Duration) -> Result<Vec<CastService>, ChromecastError> {
    let daemon = ServiceDaemon::new()?;
    let receiver = daemon.browse(SERVICE_TYPE)?;
    let deadline = Instant::now() + timeout;

    let mut found: Vec<CastService> = Vec::new();
    while let Ok(event) = receiver.recv_deadline(deadline) {
        if let ServiceEvent::ServiceResolved(info) = event {
            if let Some(service) = cast_service(&info) {
                if !found.iter().any(|known| known.name == service.name) {
                    tracing::debug!(name = %service.name, address = %service.address, "cast device found");
                    found.push(service);
                }
            }
        }
    }

    if let Err(err) = daemon.stop_browse(SERVICE_TYPE) {
        tracing::debug!(error = %err, "stop browse failed");
    }
    if let Err(err) = daemon.shutdown() {
        tracing::debug!(error = %err, "mDNS daemon shutdown failed");
    }
    Ok(found)
}

fn cast_service(info: &ServiceInfo) -> Option<CastService> {
    let address = info
        .get_addresses()
        .iter()
        .copied()
        .min_by_key(IpAddr::is_ipv6)?;
    let name = info
        .get_property_val_str("fn")
        .map_or_else(|| instance_name(info.get_fullname()).to_string(), str::to_string);
    let port = match info.get_port() {
        0 => DEFAULT_PORT,
        port => port,
    };
    Some(CastService {
        name,
        address,
        port,
    })
}

/// Instance part of an mDNS full name, e.g. `Kitchen-1a2b` for
/// `Kitchen-1a2b._googlecast._tcp.local.`.
pub(crate) fn instance_name(fullname: &str) -> &str {
    fullname
        .strip_suffix(SERVICE_TYPE)
        .map_or(fullname, |instance| instance.trim_end_matches('.'))
}
