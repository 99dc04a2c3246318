//! Camera verdict from the open-port set.
//!
//! Any open port from the configured set is enough. This is a coarse
//! heuristic: a plain web server is flagged too, and no service is
//! identified beyond "something is listening".

pub fn is_possible_camera(open_ports: &[u16]) -> bool {
    !open_ports.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camscan_core::PortSet;

    #[test]
    fn any_subset_of_the_port_set() {
        let set = PortSet::default();
        let ports = set.as_slice();
        // every subset of the 8 default ports
        for mask in 0u32..(1 << ports.len()) {
            let open: Vec<u16> = ports.iter().enumerate().filter(|(i, _)| mask & (1 << i) != 0).map(|(_, p)| *p).collect();
            assert_eq!(is_possible_camera(&open), mask != 0);
        }
    }
}
