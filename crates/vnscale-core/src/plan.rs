//! Pure plan computation: naming, subnet carving, and VLAN allocation.
//!
//! Everything here is deterministic and side-effect free; the provisioner
//! executes a finished plan against the API client. Exhaustion of either
//! resource pool fails up front, before anything is created server-side.

use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

use crate::error::CoreError;
use crate::model::{NetworkPlan, VlanPair};

/// Name of the i-th network under a prefix: `{prefix}-{i}`, i starting at 1.
pub fn network_name(prefix: &str, index: u32) -> String {
    format!("{prefix}-{index}")
}

/// Name of the IP pool bound to a network.
pub fn pool_name(network_name: &str) -> String {
    format!("ip-pool-for-{network_name}")
}

/// Whether a port group name belongs to the naming scheme.
///
/// Containment, not a prefix match: names that merely embed the prefix
/// also count, so renamed or suffixed objects are still caught.
pub fn portgroup_matches(name: &str, prefix: &str) -> bool {
    name.contains(prefix)
}

/// Whether an IP pool name belongs to the naming scheme.
pub fn pool_matches(name: &str, prefix: &str) -> bool {
    name.contains(&format!("ip-pool-for-{prefix}"))
}

/// Ports a group of the given subnet size needs: one per address.
pub fn num_ports(subnet_prefix_len: u8) -> u32 {
    1u32 << (32 - u32::from(subnet_prefix_len))
}

/// First usable host of a subnet, used as the pool gateway.
pub fn gateway(subnet: Ipv4Net) -> Result<Ipv4Addr, CoreError> {
    subnet
        .hosts()
        .next()
        .ok_or_else(|| CoreError::InvalidPrefixLen {
            prefix_len: subnet.prefix_len(),
            reason: "subnet has no usable host address for a gateway".into(),
        })
}

/// Validate the subnet prefix length: within the base CIDR, and in the
/// /2..=/30 range a port group and pool can be sized for.
fn validate_prefix_len(cidr: Ipv4Net, prefix_len: u8) -> Result<(), CoreError> {
    if prefix_len < cidr.prefix_len() {
        return Err(CoreError::InvalidPrefixLen {
            prefix_len,
            reason: format!("shorter than the base CIDR {cidr}"),
        });
    }
    // num_ports is a u32; a /0 or /1 subnet cannot be sized in ports.
    if prefix_len < 2 {
        return Err(CoreError::InvalidPrefixLen {
            prefix_len,
            reason: "subnet too large to size a port group".into(),
        });
    }
    if prefix_len > 30 {
        return Err(CoreError::InvalidPrefixLen {
            prefix_len,
            reason: "a provisioned subnet needs room for network, gateway, and hosts".into(),
        });
    }
    Ok(())
}

/// Compute the full creation plan for `count` networks.
///
/// VLAN pairs are consumed from the END of the provisioned list (reverse of
/// provisioning order); subnets are consumed from the base CIDR in address
/// order. Both pools are checked for coverage before any allocation.
pub fn build_plan(
    provisioned_vlans: &[VlanPair],
    cidr: Ipv4Net,
    subnet_prefix_len: u8,
    name_prefix: &str,
    count: u32,
) -> Result<Vec<NetworkPlan>, CoreError> {
    validate_prefix_len(cidr, subnet_prefix_len)?;

    if (provisioned_vlans.len() as u64) < u64::from(count) {
        return Err(CoreError::VlanPoolExhausted {
            needed: count,
            available: provisioned_vlans.len(),
        });
    }

    let available_subnets = 1u128 << (subnet_prefix_len - cidr.prefix_len());
    if available_subnets < u128::from(count) {
        return Err(CoreError::SubnetSpaceExhausted {
            cidr: cidr.to_string(),
            prefix_len: subnet_prefix_len,
            needed: count,
            available: available_subnets,
        });
    }

    let mut subnets = cidr
        .subnets(subnet_prefix_len)
        .map_err(|_| CoreError::InvalidPrefixLen {
            prefix_len: subnet_prefix_len,
            reason: format!("cannot subdivide {cidr}"),
        })?;

    let mut plan = Vec::with_capacity(count as usize);
    for index in 1..=count {
        // Coverage was checked above; both pools still hold entries here.
        let vlan = provisioned_vlans[provisioned_vlans.len() - index as usize];
        let subnet = subnets.next().ok_or(CoreError::SubnetSpaceExhausted {
            cidr: cidr.to_string(),
            prefix_len: subnet_prefix_len,
            needed: count,
            available: available_subnets,
        })?;
        plan.push(NetworkPlan {
            name: network_name(name_prefix, index),
            vlan,
            subnet,
        });
    }
    Ok(plan)
}
