//! Object type registry
//!
//! Maps the object type named in a definition file (`1-regions.yml` →
//! `regions`) to the NetBox REST endpoint that lists it.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

/// NetBox API applications, used for `app-resource` fallback names
pub const NETBOX_APPS: &[&str] = &[
    "circuits",
    "core",
    "dcim",
    "extras",
    "ipam",
    "tenancy",
    "users",
    "virtualization",
    "vpn",
    "wireless",
];

/// Built-in object types: (object type, app, resource)
const OBJECT_TYPES: &[(&str, &str, &str)] = &[
    // Core / extras
    ("tags", "extras", "tags"),
    ("data-sources", "core", "data-sources"),
    ("webhooks", "extras", "webhooks"),
    ("event-rules", "extras", "event-rules"),
    ("config-templates", "extras", "config-templates"),
    ("export-templates", "extras", "export-templates"),
    // Organization
    ("regions", "dcim", "regions"),
    ("sites", "dcim", "sites"),
    ("site-groups", "dcim", "site-groups"),
    ("locations", "dcim", "locations"),
    ("tenants", "tenancy", "tenants"),
    ("tenant-groups", "tenancy", "tenant-groups"),
    ("contacts", "tenancy", "contacts"),
    ("contact-groups", "tenancy", "contact-groups"),
    ("contact-roles", "tenancy", "contact-roles"),
    ("contact-assignments", "tenancy", "contact-assignments"),
    // Racks
    ("racks", "dcim", "racks"),
    ("rack-types", "dcim", "rack-types"),
    ("rack-roles", "dcim", "rack-roles"),
    ("reservations", "dcim", "rack-reservations"),
    // Device types
    ("manufacturers", "dcim", "manufacturers"),
    ("device-types", "dcim", "device-types"),
    ("device-roles", "dcim", "device-roles"),
    ("module-type-profiles", "dcim", "module-type-profiles"),
    ("module-types", "dcim", "module-types"),
    ("platforms", "dcim", "platforms"),
    // Devices
    ("devices", "dcim", "devices"),
    ("virtual-chassis", "dcim", "virtual-chassis"),
    ("virtual-device-contexts", "dcim", "virtual-device-contexts"),
    ("modules", "dcim", "modules"),
    ("inventory-item-roles", "dcim", "inventory-item-roles"),
    ("inventory-items", "dcim", "inventory-items"),
    // Device components
    ("rear-ports", "dcim", "rear-ports"),
    ("front-ports", "dcim", "front-ports"),
    ("console-ports", "dcim", "console-ports"),
    ("console-server-ports", "dcim", "console-server-ports"),
    ("power-ports", "dcim", "power-ports"),
    ("power-outlets", "dcim", "power-outlets"),
    ("module-bays", "dcim", "module-bays"),
    ("device-bays", "dcim", "device-bays"),
    ("interfaces", "dcim", "interfaces"),
    ("mac-addresses", "dcim", "mac-addresses"),
    // Connections and power
    ("cables", "dcim", "cables"),
    ("power-panels", "dcim", "power-panels"),
    ("power-feeds", "dcim", "power-feeds"),
    // Wireless
    ("wireless-links", "wireless", "wireless-links"),
    ("wireless-lan-groups", "wireless", "wireless-lan-groups"),
    ("wireless-lans", "wireless", "wireless-lans"),
    // VPN
    ("vpn-tunnel-groups", "vpn", "tunnel-groups"),
    ("vpn-tunnels", "vpn", "tunnels"),
    ("tunnel-terminations", "vpn", "tunnel-terminations"),
    ("l2vpn", "vpn", "l2vpns"),
    ("l2vpn-terminations", "vpn", "l2vpn-terminations"),
    ("ike-proposals", "vpn", "ike-proposals"),
    ("ike-policies", "vpn", "ike-policies"),
    ("ipsec-proposals", "vpn", "ipsec-proposals"),
    ("ipsec-policies", "vpn", "ipsec-policies"),
    ("ipsec-profiles", "vpn", "ipsec-profiles"),
    // Virtualization
    ("cluster-groups", "virtualization", "cluster-groups"),
    ("cluster-types", "virtualization", "cluster-types"),
    ("clusters", "virtualization", "clusters"),
    ("virtual-machines", "virtualization", "virtual-machines"),
    ("vm-interfaces", "virtualization", "interfaces"),
    ("virtual-disks", "virtualization", "virtual-disks"),
    // Circuits
    ("circuits", "circuits", "circuits"),
    ("providers", "circuits", "providers"),
    ("circuit-providers", "circuits", "providers"),
    ("circuit-provider-accounts", "circuits", "provider-accounts"),
    ("circuit-groups", "circuits", "circuit-groups"),
    ("circuit-types", "circuits", "circuit-types"),
    ("circuit-terminations", "circuits", "circuit-terminations"),
    ("circuit-assignments", "circuits", "circuit-group-assignments"),
    ("provider-networks", "circuits", "provider-networks"),
    ("virtual-circuits", "circuits", "virtual-circuits"),
    (
        "virtual-circuit-terminations",
        "circuits",
        "virtual-circuit-terminations",
    ),
    // IPAM
    ("vlan-groups", "ipam", "vlan-groups"),
    ("vlans", "ipam", "vlans"),
    ("vlan-translation-policies", "ipam", "vlan-translation-policies"),
    ("vlan-translation-rules", "ipam", "vlan-translation-rules"),
    ("vrfs", "ipam", "vrfs"),
    ("route-targets", "ipam", "route-targets"),
    ("prefixes", "ipam", "prefixes"),
    ("roles", "ipam", "roles"),
    ("ip-addresses", "ipam", "ip-addresses"),
    ("ip-ranges", "ipam", "ip-ranges"),
    ("fhrp-groups", "ipam", "fhrp-groups"),
    ("service-templates", "ipam", "service-templates"),
    ("services", "ipam", "services"),
    ("asns", "ipam", "asns"),
    ("asn-ranges", "ipam", "asn-ranges"),
    ("rirs", "ipam", "rirs"),
    ("aggregates", "ipam", "aggregates"),
];

static REGISTRY: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> =
    LazyLock::new(|| {
        OBJECT_TYPES
            .iter()
            .map(|&(name, app, resource)| (name, (app, resource)))
            .collect()
    });

/// A NetBox list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// API application (`dcim`, `ipam`, ...)
    pub app: String,
    /// Resource within the application (`device-types`)
    pub resource: String,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(app: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            resource: resource.into(),
        }
    }

    /// Path of the list endpoint, relative to the server root
    pub fn list_path(&self) -> String {
        format!("/api/{}/{}/", self.app, self.resource)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app, self.resource)
    }
}

/// Resolve an object type to its list endpoint
///
/// Tries the name as given, then lower-cased with `_` → `-`, then an
/// `app-resource` split when the first part names a NetBox application.
pub fn resolve_endpoint(object_type: &str) -> Result<Endpoint> {
    if let Some(&(app, resource)) = REGISTRY.get(object_type) {
        return Ok(Endpoint::new(app, resource));
    }

    let normalized = object_type.trim().to_lowercase().replace('_', "-");
    if let Some(&(app, resource)) = REGISTRY.get(normalized.as_str()) {
        return Ok(Endpoint::new(app, resource));
    }

    let parts: Vec<&str> = normalized.split('-').collect();
    if let [app, resource] = parts.as_slice() {
        if NETBOX_APPS.contains(app) && !resource.is_empty() {
            return Ok(Endpoint::new(*app, *resource));
        }
    }

    Err(Error::unknown_type(object_type))
}

/// Check if an object type is in the built-in table
pub fn is_known(object_type: &str) -> bool {
    REGISTRY.contains_key(object_type)
}

/// List all built-in object types with their endpoints, sorted by name
pub fn known_object_types() -> Vec<(&'static str, Endpoint)> {
    let mut types: Vec<_> = OBJECT_TYPES
        .iter()
        .map(|&(name, app, resource)| (name, Endpoint::new(app, resource)))
        .collect();
    types.sort_by_key(|(name, _)| *name);
    types
}
