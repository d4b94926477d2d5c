use crate::utils::error::Result;
use crate::utils::validation::validate_ip_address;
use std::net::IpAddr;

/// Address window derived from a start address and a mask.
///
/// Matching is done octet by octet: an address matches when, for every byte,
/// `ip & mask` lies in `[start & mask, (start & mask) + (255 - mask)]`.
/// This is not a CIDR prefix match; a mask such as `255.255.0.128` yields
/// per-octet bounds rather than one contiguous block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRange {
    start: IpAddr,
    mask: IpAddr,
}

fn octets(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

impl AddressRange {
    pub fn new(start: IpAddr, mask: IpAddr) -> Self {
        Self { start, mask }
    }

    pub fn parse(start: &str, mask: &str) -> Result<Self> {
        let start = validate_ip_address("filter.address_start", start)?;
        let mask = validate_ip_address("filter.address_mask", mask)?;
        Ok(Self::new(start, mask))
    }

    pub fn start(&self) -> IpAddr {
        self.start
    }

    pub fn mask(&self) -> IpAddr {
        self.mask
    }

    /// Addresses of a different family than the range never match.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        let ip_bytes = octets(ip);
        let start_bytes = octets(&self.start);
        let mask_bytes = octets(&self.mask);

        if ip_bytes.len() != start_bytes.len() || start_bytes.len() != mask_bytes.len() {
            return false;
        }

        ip_bytes
            .iter()
            .zip(start_bytes.iter())
            .zip(mask_bytes.iter())
            .all(|((&ip, &start), &mask)| {
                let value = u16::from(ip & mask);
                let low = u16::from(start & mask);
                let high = low + u16::from(255 - mask);
                value >= low && value <= high
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_class_c_mask() {
        let range = AddressRange::parse("192.168.0.0", "255.255.255.0").unwrap();
        assert!(range.contains(&ip("192.168.0.5")));
        assert!(range.contains(&ip("192.168.0.255")));
        assert!(!range.contains(&ip("192.168.1.5")));
        assert!(!range.contains(&ip("10.168.0.5")));
    }

    #[test]
    fn test_single_high_bit_mask_is_additive_per_octet() {
        let range = AddressRange::parse("0.0.0.0", "0.0.0.128").unwrap();
        for last in 0..=127u8 {
            assert!(range.contains(&IpAddr::from([0, 0, 0, last])), "0.0.0.{} should match", last);
        }
        for last in 128..=255u8 {
            assert!(!range.contains(&IpAddr::from([0, 0, 0, last])), "0.0.0.{} should not match", last);
        }
        // Octets with a zero mask accept anything.
        assert!(range.contains(&ip("200.1.77.42")));
    }

    #[test]
    fn test_non_canonical_mask_differs_from_cidr() {
        let range = AddressRange::parse("10.20.0.128", "255.255.0.128").unwrap();
        // Fourth octet: low = 128, high = 128 + 127 = 255, so only values with the top bit set.
        assert!(range.contains(&ip("10.20.99.200")));
        assert!(range.contains(&ip("10.20.0.128")));
        assert!(!range.contains(&ip("10.20.99.5")));
        assert!(!range.contains(&ip("10.21.0.200")));
    }

    #[test]
    fn test_family_mismatch_never_matches() {
        let v4 = AddressRange::parse("0.0.0.0", "0.0.0.0").unwrap();
        assert!(!v4.contains(&ip("::1")));

        let v6 = AddressRange::parse("2001:db8::", "ffff:ffff::").unwrap();
        assert!(v6.contains(&ip("2001:db8::42")));
        assert!(!v6.contains(&ip("2001:db9::42")));
        assert!(!v6.contains(&ip("32.1.13.184")));
    }

    #[test]
    fn test_start_and_mask_of_different_families_match_nothing() {
        let range = AddressRange::new(ip("10.0.0.0"), ip("ffff::"));
        assert!(!range.contains(&ip("10.0.0.1")));
        assert!(!range.contains(&ip("ffff::1")));
    }

    #[test]
    fn test_malformed_addresses_are_rejected() {
        assert!(AddressRange::parse("192.168.0", "255.255.255.0").is_err());
        assert!(AddressRange::parse("192.168.0.0", "mask").is_err());
    }
}
