// Adapters layer: reqwest-backed implementations of the domain ports.

pub mod carrier;
pub mod catalog;
pub mod orders;

pub use carrier::HttpCarrier;
pub use catalog::HttpCatalog;
pub use orders::HttpOrderStore;
