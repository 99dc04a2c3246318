use std::net::Ipv4Addr;

use thiserror::Error;

/// The only failure a scan can report to its caller. Raised before any probe is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSubnetError {
    #[error("invalid subnet `{input}`: expected IPv4 CIDR such as 192.168.1.0/24")]
    Malformed { input: String },
    #[error("invalid subnet `{input}`: prefix length {prefix} is out of range (0-32)")]
    PrefixOutOfRange { input: String, prefix: u32 },
    #[error("invalid netmask {netmask}: mask bits must be contiguous")]
    InvalidNetmask { netmask: Ipv4Addr },
}

impl InvalidSubnetError {
    pub fn malformed(input: &str) -> Self {
        InvalidSubnetError::Malformed { input: input.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let e = InvalidSubnetError::PrefixOutOfRange { input: "10.0.0.0/40".into(), prefix: 40 };
        assert!(e.to_string().contains("10.0.0.0/40"));
        assert!(e.to_string().contains("40"));
        assert!(InvalidSubnetError::malformed("nope").to_string().contains("`nope`"));
    }
}
