pub mod discovery;
pub mod fallback;
pub mod features;
pub mod icons;
pub mod record_builder;
pub mod snippets;

pub use discovery::DiscoveryService;
