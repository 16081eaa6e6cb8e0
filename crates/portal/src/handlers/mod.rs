pub mod servers;

use std::sync::Arc;

use crate::service::DiscoveryService;

/// Shared handler state
pub type AppState = Arc<DiscoveryService>;
