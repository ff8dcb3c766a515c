pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Operation};

pub use adapters::{HttpCarrier, HttpCatalog, HttpOrderStore};
pub use app::{LabelService, QuoteService};
pub use config::StoreProfile;
pub use utils::error::{Result, ShipError};
