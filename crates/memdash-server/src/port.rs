//! Free port discovery.
//!
//! Each candidate is bound and immediately released; the caller binds again
//! for real. Another process can take the port in between. That window is
//! accepted for a local tool: the later bind fails with
//! [`DashboardError::Bind`] and the operator re-runs.

use std::net::{IpAddr, Ipv4Addr, TcpListener};

use memdash_core::{DashboardError, Result};

/// Number of consecutive ports probed.
pub const PORT_SEARCH_SPAN: u16 = 100;

/// First port in `[start, start + 100)` that binds on the IPv4 loopback.
pub fn find_available_port(start: u16) -> Result<u16> {
    find_available_port_on(IpAddr::V4(Ipv4Addr::LOCALHOST), start)
}

/// First port in `[start, start + 100)` that binds on `ip`.
pub fn find_available_port_on(ip: IpAddr, start: u16) -> Result<u16> {
    probe_span(ip, start, PORT_SEARCH_SPAN)
}

pub(crate) fn probe_span(ip: IpAddr, start: u16, span: u16) -> Result<u16> {
    let end = u32::from(start) + u32::from(span);
    let candidates = (u32::from(start)..end)
        .filter_map(|p| u16::try_from(p).ok())
        // Port 0 would ask the OS for an ephemeral port instead of probing.
        .filter(|p| *p != 0);

    for port in candidates {
        match TcpListener::bind((ip, port)) {
            Ok(listener) => {
                drop(listener);
                tracing::debug!(port, "found available port");
                return Ok(port);
            }
            Err(e) => tracing::trace!(port, error = %e, "port unavailable"),
        }
    }

    Err(DashboardError::PortExhausted { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupy() -> (TcpListener, u16) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[test]
    fn returned_port_is_bindable() {
        let (_held, base) = occupy();
        let start = base.saturating_sub(50).max(1024);
        let port = find_available_port(start).unwrap();
        assert!(port >= start);
        assert!(u32::from(port) < u32::from(start) + u32::from(PORT_SEARCH_SPAN));
        assert!(TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok());
    }

    #[test]
    fn skips_occupied_port() {
        let (_held, taken) = occupy();
        let port = find_available_port(taken).unwrap();
        assert!(port > taken);
    }

    #[test]
    fn exhausted_span_is_an_error() {
        let (_held, taken) = occupy();
        let err = probe_span(IpAddr::V4(Ipv4Addr::LOCALHOST), taken, 1).unwrap_err();
        match err {
            DashboardError::PortExhausted { start, end } => {
                assert_eq!(start, taken);
                assert_eq!(end, u32::from(taken) + 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn range_is_clamped_at_top_of_port_space() {
        // Only 65535 is a candidate; either it is free or the span is exhausted.
        match probe_span(IpAddr::V4(Ipv4Addr::LOCALHOST), u16::MAX, PORT_SEARCH_SPAN) {
            Ok(port) => assert_eq!(port, u16::MAX),
            Err(DashboardError::PortExhausted { start, .. }) => assert_eq!(start, u16::MAX),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn probe_releases_the_socket() {
        let (held, base) = occupy();
        drop(held);
        let port = find_available_port(base).unwrap();
        // The probe must not keep the port; binding it again succeeds.
        let _again = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).unwrap();
    }
}
