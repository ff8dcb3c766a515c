use crate::domain::model::CartParty;
use crate::utils::error::{Result, ShipError};
use crate::utils::validation::only_digits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sender identity stamped on every label: the store's legal/contact data
/// and pickup address. Loaded from a TOML file; defaults are placeholders
/// that only make sense against the carrier sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProfile {
    #[serde(default = "defaults::name")]
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "defaults::email")]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

mod defaults {
    pub fn name() -> String {
        "Storefront".to_string()
    }

    pub fn email() -> String {
        "contact@example.com".to_string()
    }
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: defaults::name(),
            document: String::new(),
            phone: String::new(),
            email: defaults::email(),
            address: String::new(),
            number: String::new(),
            complement: String::new(),
            district: String::new(),
            city: String::new(),
            state: String::new(),
        }
    }
}

impl StoreProfile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ShipError::ConfigError {
            message: format!("Failed to parse store profile {}: {}", path.display(), e),
        })
    }

    /// Carrier-facing sender block. Phone, document and postal code go out
    /// digits-only.
    pub fn sender_party(&self, origin_postal_code: &str) -> CartParty {
        CartParty {
            name: self.name.clone(),
            phone: only_digits(&self.phone),
            email: self.email.clone(),
            document: only_digits(&self.document),
            address: self.address.clone(),
            number: self.number.clone(),
            complement: self.complement.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            state_abbr: self.state.clone(),
            postal_code: only_digits(origin_postal_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_profile_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "Noble Finishes"
document = "32.514.476/0001-37"
phone = "(48) 98879-9001"
email = "store@example.com"
address = "Rua Principal"
number = "658"
district = "Centro"
city = "Cocal do Sul"
state = "SC"
"#
        )
        .unwrap();

        let profile = StoreProfile::from_file(file.path()).unwrap();
        assert_eq!(profile.name, "Noble Finishes");
        assert_eq!(profile.state, "SC");
        assert_eq!(profile.complement, "");
    }

    #[test]
    fn sender_party_strips_to_digits() {
        let profile = StoreProfile {
            phone: "(48) 98879-9001".to_string(),
            document: "32.514.476/0001-37".to_string(),
            ..StoreProfile::default()
        };
        let party = profile.sender_party("88845-000");
        assert_eq!(party.phone, "48988799001");
        assert_eq!(party.document, "32514476000137");
        assert_eq!(party.postal_code, "88845000");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = [not toml").unwrap();
        let err = StoreProfile::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ShipError::ConfigError { .. }));
    }
}
