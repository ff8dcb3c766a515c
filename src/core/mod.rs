pub mod packer;
pub mod resolver;

pub use crate::domain::model::{CarrierLimits, PackMode, ResolvedItem, UnitDefaults, Volume};
pub use crate::domain::ports::{CarrierApi, OrderStore, ProductCatalog, ShippingConfig};
pub use crate::utils::error::Result;
