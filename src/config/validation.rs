//! Configuration validation.
//!
//! # Responsibilities
//! - Check that the address manager and both endpoints are present, in that order
//! - Check that present values have the right shape (URL, 20-byte address)
//!
//! # Design Decisions
//! - Stops at the first violation; errors are never batched
//! - Presence is checked for every required field before any shape check
//! - Runs before any credential or network client is touched

use alloy::primitives::Address;
use url::Url;

use crate::config::schema::{ResolvedConfig, ADDRESS_MANAGER_ADDRESS, L1_NODE_WEB3_URL, L2_NODE_WEB3_URL};
use crate::error::{BootstrapError, BootstrapResult};

/// Required base settings, parsed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEndpoints {
    pub l1_rpc_url: Url,
    pub l2_rpc_url: Url,
    pub address_manager: Address,
}

/// Validate the required base fields of a resolved configuration.
pub fn validate_config(config: &ResolvedConfig) -> BootstrapResult<ValidatedEndpoints> {
    let address_manager = require(ADDRESS_MANAGER_ADDRESS.name(), &config.address_manager_address)?;
    let l1 = require(L1_NODE_WEB3_URL.name(), &config.l1_node_web3_url)?;
    let l2 = require(L2_NODE_WEB3_URL.name(), &config.l2_node_web3_url)?;

    let address_manager = parse_address(ADDRESS_MANAGER_ADDRESS.name(), address_manager)?;
    let l1_rpc_url = parse_rpc_url(L1_NODE_WEB3_URL.name(), l1)?;
    let l2_rpc_url = parse_rpc_url(L2_NODE_WEB3_URL.name(), l2)?;

    Ok(ValidatedEndpoints {
        l1_rpc_url,
        l2_rpc_url,
        address_manager,
    })
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> BootstrapResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(BootstrapError::MissingRequiredConfig(field))
}

fn parse_rpc_url(field: &'static str, value: &str) -> BootstrapResult<Url> {
    let url: Url = value.parse().map_err(|e: url::ParseError| BootstrapError::InvalidConfig {
        field,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BootstrapError::InvalidConfig {
            field,
            reason: format!("unsupported scheme '{}', expected http or https", other),
        }),
    }
}

fn parse_address(field: &'static str, value: &str) -> BootstrapResult<Address> {
    value.parse().map_err(|e| BootstrapError::InvalidConfig {
        field,
        reason: format!("not a 20-byte hex address: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn valid_config() -> ResolvedConfig {
        ResolvedConfig {
            l1_node_web3_url: Some("http://localhost:9545".into()),
            l2_node_web3_url: Some("http://localhost:8545".into()),
            address_manager_address: Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".into()),
            ..ResolvedConfig::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let validated = validate_config(&valid_config()).unwrap();
        assert_eq!(validated.l1_rpc_url.as_str(), "http://localhost:9545/");
        assert_eq!(validated.l2_rpc_url.port(), Some(8545));
        assert_eq!(
            validated.address_manager,
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let cases: [(fn(&mut ResolvedConfig), &str); 3] = [
            (|c| c.l1_node_web3_url = None, "l1-node-web3-url"),
            (|c| c.l2_node_web3_url = None, "l2-node-web3-url"),
            (|c| c.address_manager_address = None, "address-manager-address"),
        ];

        for (omit, field) in cases {
            let mut config = valid_config();
            omit(&mut config);
            match validate_config(&config) {
                Err(BootstrapError::MissingRequiredConfig(name)) => assert_eq!(name, field),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let config = ResolvedConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::MissingRequiredConfig("address-manager-address"))
        ));

        let only_l2 = ResolvedConfig {
            l2_node_web3_url: Some("http://localhost:8545".into()),
            ..ResolvedConfig::default()
        };
        assert!(matches!(
            validate_config(&only_l2),
            Err(BootstrapError::MissingRequiredConfig("address-manager-address"))
        ));

        let only_address = ResolvedConfig {
            address_manager_address: Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".into()),
            ..ResolvedConfig::default()
        };
        assert!(matches!(
            validate_config(&only_address),
            Err(BootstrapError::MissingRequiredConfig("l1-node-web3-url"))
        ));
    }

    #[test]
    fn test_presence_checked_before_shape() {
        let mut config = valid_config();
        config.address_manager_address = Some("0x1234".into());
        config.l2_node_web3_url = None;
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::MissingRequiredConfig("l2-node-web3-url"))
        ));
    }

    #[test]
    fn test_shape_checked_in_field_order() {
        let mut config = valid_config();
        config.address_manager_address = Some("0x1234".into());
        config.l1_node_web3_url = Some("not a url".into());
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::InvalidConfig { field: "address-manager-address", .. })
        ));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut config = valid_config();
        config.l2_node_web3_url = Some("  ".into());
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::MissingRequiredConfig("l2-node-web3-url"))
        ));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = valid_config();
        config.l2_node_web3_url = Some("localhost".into());
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::InvalidConfig { field: "l2-node-web3-url", .. })
        ));
    }

    #[test]
    fn test_unsupported_scheme() {
        let mut config = valid_config();
        config.l1_node_web3_url = Some("ftp://localhost:9545".into());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_invalid_address() {
        let mut config = valid_config();
        config.address_manager_address = Some("0x1234".into());
        assert!(matches!(
            validate_config(&config),
            Err(BootstrapError::InvalidConfig { field: "address-manager-address", .. })
        ));
    }
}
