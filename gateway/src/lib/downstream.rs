//! Closed set of downstream services reachable through the gateway.
//!
//! Targets are resolved once from configuration; request handling only
//! ever selects a variant, never looks a service up by name.

use std::fmt;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownstreamService {
    Orders,
    Inventory,
    Payments,
}

impl DownstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownstreamService::Orders => "orders",
            DownstreamService::Inventory => "inventory",
            DownstreamService::Payments => "payments",
        }
    }
}

impl fmt::Display for DownstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how long to wait for one downstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamTarget {
    pub base_url: Url,
    pub timeout: Duration,
}

impl DownstreamTarget {
    /// Build the upstream URL for a gateway request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone)]
pub struct DownstreamTargets {
    orders: DownstreamTarget,
    inventory: DownstreamTarget,
    payments: DownstreamTarget,
}

impl DownstreamTargets {
    pub fn new(
        orders: DownstreamTarget,
        inventory: DownstreamTarget,
        payments: DownstreamTarget,
    ) -> Self {
        Self {
            orders,
            inventory,
            payments,
        }
    }

    pub fn get(&self, service: DownstreamService) -> &DownstreamTarget {
        match service {
            DownstreamService::Orders => &self.orders,
            DownstreamService::Inventory => &self.inventory,
            DownstreamService::Payments => &self.payments,
        }
    }
}
