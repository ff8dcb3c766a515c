pub mod store_profile;

pub use store_profile::StoreProfile;

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::ports::ShippingConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_postal_code, validate_url, Validate,
    };
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "ship-split")]
    #[command(about = "Storefront shipping: volume packing, rate quotes and label generation")]
    pub struct CliConfig {
        /// Base URL of the product/order REST store.
        #[arg(long)]
        pub catalog_url: String,

        /// Service key for the REST store (sent as apikey + bearer).
        #[arg(long)]
        pub catalog_key: String,

        /// Carrier API bearer token.
        #[arg(long)]
        pub carrier_token: String,

        /// Origin postal code shipments leave from.
        #[arg(long)]
        pub origin_postal_code: String,

        /// Use the carrier sandbox environment.
        #[arg(long)]
        pub sandbox: bool,

        /// Rate options whose name contains this keyword are dropped.
        #[arg(long, default_value = "centralizado")]
        pub excluded_service: String,

        /// Ceiling for the declared shipment insurance value.
        #[arg(long, default_value = "1000")]
        pub insurance_cap: f64,

        /// TOML file with the store's sender identity.
        #[arg(long)]
        pub store_profile: Option<PathBuf>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Operation,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Operation {
        /// Quote shipping rates for a cart.
        Quote {
            /// Destination postal code.
            #[arg(long)]
            zip: String,
            /// JSON file with the cart line items (`-` for stdin).
            #[arg(long, default_value = "-")]
            items: String,
        },
        /// Generate a shipping label for a placed order.
        Label {
            #[arg(long)]
            order_id: String,
        },
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("catalog_url", &self.catalog_url)?;
            validate_non_empty_string("catalog_key", &self.catalog_key)?;
            validate_non_empty_string("carrier_token", &self.carrier_token)?;
            validate_postal_code("origin_postal_code", &self.origin_postal_code)?;
            Ok(())
        }
    }

    impl ShippingConfig for CliConfig {
        fn origin_postal_code(&self) -> &str {
            &self.origin_postal_code
        }

        fn excluded_service_keyword(&self) -> &str {
            &self.excluded_service
        }

        fn insurance_cap(&self) -> f64 {
            self.insurance_cap
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Operation};
