use clap::Parser;
use ship_split::domain::model::{LabelRequest, LineItem, QuoteRequest};
use ship_split::utils::{logger, validation::Validate};
use ship_split::{
    CliConfig, HttpCarrier, HttpCatalog, HttpOrderStore, LabelService, Operation, QuoteService,
    StoreProfile,
};
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ship-split CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = match &config.store_profile {
        Some(path) => StoreProfile::from_file(path)?,
        None => StoreProfile::default(),
    };

    let catalog = HttpCatalog::new(&config.catalog_url, &config.catalog_key);
    let carrier = HttpCarrier::for_environment(config.sandbox, &config.carrier_token);

    let outcome: ship_split::Result<String> = match config.command.clone() {
        Operation::Quote { zip, items } => {
            let raw = read_input(&items)?;
            let items: Vec<LineItem> = serde_json::from_str(&raw)
                .map_err(ship_split::ShipError::SerializationError)?;
            let service = QuoteService::new(catalog, carrier, config.clone());
            match service.handle(&QuoteRequest { zip, items }).await {
                Ok(response) => serde_json::to_string_pretty(&response)
                    .map_err(ship_split::ShipError::SerializationError),
                Err(e) => Err(e),
            }
        }
        Operation::Label { order_id } => {
            let orders = HttpOrderStore::new(&config.catalog_url, &config.catalog_key);
            let service = LabelService::new(orders, catalog, carrier, config.clone(), store);
            match service.handle(&LabelRequest { order_id }).await {
                Ok(response) => serde_json::to_string_pretty(&response)
                    .map_err(ship_split::ShipError::SerializationError),
                Err(e) => Err(e),
            }
        }
    };

    match outcome {
        Ok(body) => {
            tracing::info!("✅ Operation completed successfully");
            println!("{}", body);
        }
        Err(e) => {
            tracing::error!("❌ Operation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn read_input(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source)
    }
}
