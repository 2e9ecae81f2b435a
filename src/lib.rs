pub mod cache;
pub mod catalog;
pub mod config;
pub mod context;
pub mod credential;
pub mod discovery;
pub mod endpoints;
pub mod error;
pub mod model_registry;
pub mod normalize;
pub mod token;
pub mod upstream;

pub use cache::ModelCache;
pub use catalog::{ModelCatalog, StaticCatalog};
pub use config::DiscoveryConfig;
pub use context::CallContext;
pub use credential::Credential;
pub use discovery::ModelDiscovery;
pub use error::DiscoveryError;
pub use model_registry::{ModelInfo, ThinkingSupport};
