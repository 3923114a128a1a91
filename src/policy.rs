//! Equivalence rules deciding when a new block event folds into a stored one.

use crate::models::EventRecord;

/// Decides whether `candidate` is a repeat of the already stored `stored`.
pub trait EquivalencePolicy {
    fn matches(stored: &EventRecord, candidate: &EventRecord) -> bool;
}

/// Inbound blocks are keyed on the sending device.
///
/// MAC, source address and protocol must agree, and at least one of the two
/// ports must recur. Destination address is ignored so one device probing
/// several local hosts stays a single entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct InboundPolicy;

impl EquivalencePolicy for InboundPolicy {
    fn matches(stored: &EventRecord, candidate: &EventRecord) -> bool {
        stored.in_iface == candidate.in_iface
            && stored.out_iface == candidate.out_iface
            && stored.mac == candidate.mac
            && stored.src == candidate.src
            && stored.protocol == candidate.protocol
            && (stored.src_port == candidate.src_port || stored.dst_port == candidate.dst_port)
    }
}

/// Outbound blocks are keyed on where the packet was going.
///
/// Source address and source port come from the local stack and are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutboundPolicy;

impl EquivalencePolicy for OutboundPolicy {
    fn matches(stored: &EventRecord, candidate: &EventRecord) -> bool {
        stored.in_iface == candidate.in_iface
            && stored.out_iface == candidate.out_iface
            && stored.dst == candidate.dst
            && stored.protocol == candidate.protocol
            && stored.dst_port == candidate.dst_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(src_port: u16, dst_port: u16) -> EventRecord {
        EventRecord {
            in_iface: "eth0".into(),
            mac: Some("aa".into()),
            src: "10.0.0.1".into(),
            dst: "10.0.0.9".into(),
            protocol: "UDP".into(),
            src_port,
            dst_port,
            ..Default::default()
        }
    }

    fn outbound(src_port: u16, dst_port: u16) -> EventRecord {
        EventRecord {
            out_iface: "eth0".into(),
            src: "1.1.1.1".into(),
            dst: "2.2.2.2".into(),
            protocol: "TCP".into(),
            src_port,
            dst_port,
            ..Default::default()
        }
    }

    // ===========================================
    // InboundPolicy Tests
    // ===========================================

    #[test]
    fn test_inbound_either_port_recurring_matches() {
        let stored = inbound(100, 200);
        assert!(InboundPolicy::matches(&stored, &inbound(100, 200)));
        assert!(InboundPolicy::matches(&stored, &inbound(101, 200)));
        assert!(InboundPolicy::matches(&stored, &inbound(100, 201)));
    }

    #[test]
    fn test_inbound_both_ports_changed_is_new_flow() {
        assert!(!InboundPolicy::matches(&inbound(100, 200), &inbound(101, 201)));
    }

    #[test]
    fn test_inbound_ignores_destination_address() {
        let mut other = inbound(100, 200);
        other.dst = "10.0.0.77".into();
        assert!(InboundPolicy::matches(&inbound(100, 200), &other));
    }

    #[test]
    fn test_inbound_identity_fields_must_agree() {
        let stored = inbound(100, 200);

        let mut other = inbound(100, 200);
        other.mac = Some("bb".into());
        assert!(!InboundPolicy::matches(&stored, &other));

        let mut other = inbound(100, 200);
        other.mac = None;
        assert!(!InboundPolicy::matches(&stored, &other));

        let mut other = inbound(100, 200);
        other.src = "10.0.0.2".into();
        assert!(!InboundPolicy::matches(&stored, &other));

        let mut other = inbound(100, 200);
        other.protocol = "TCP".into();
        assert!(!InboundPolicy::matches(&stored, &other));

        let mut other = inbound(100, 200);
        other.in_iface = "eth1".into();
        assert!(!InboundPolicy::matches(&stored, &other));
    }

    // ===========================================
    // OutboundPolicy Tests
    // ===========================================

    #[test]
    fn test_outbound_ignores_source_port_and_address() {
        let stored = outbound(500, 443);
        assert!(OutboundPolicy::matches(&stored, &outbound(501, 443)));

        let mut other = outbound(500, 443);
        other.src = "1.1.1.2".into();
        assert!(OutboundPolicy::matches(&stored, &other));
    }

    #[test]
    fn test_outbound_destination_port_is_exact() {
        assert!(!OutboundPolicy::matches(&outbound(500, 443), &outbound(500, 80)));
    }

    #[test]
    fn test_outbound_destination_and_protocol_must_agree() {
        let stored = outbound(500, 443);

        let mut other = outbound(500, 443);
        other.dst = "3.3.3.3".into();
        assert!(!OutboundPolicy::matches(&stored, &other));

        let mut other = outbound(500, 443);
        other.protocol = "UDP".into();
        assert!(!OutboundPolicy::matches(&stored, &other));

        let mut other = outbound(500, 443);
        other.out_iface = "wlan0".into();
        assert!(!OutboundPolicy::matches(&stored, &other));
    }
}
