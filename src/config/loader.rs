//! Configuration loading from the command line and the environment.
//!
//! Each option is looked up in two layers, command line first, then the
//! environment; when neither holds a non-empty value the declared default is
//! used. Raw text is then coerced to the option's type.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::schema::{self, ConfigOption, OptionInfo, ResolvedConfig};

/// Raw option text from one source, keyed by lookup name.
///
/// The command-line layer is keyed by option name (`relay-gas-limit`), the
/// environment layer by variable name (`RELAY_GAS_LIMIT`).
#[derive(Debug, Clone, Default)]
pub struct SourceLayer {
    values: HashMap<String, String>,
}

impl SourceLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        std::env::vars().collect()
    }

    /// Add a value, replacing any previous one for the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a value, treating empty or whitespace-only text as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceLayer {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Coercion from raw option text to a typed value.
///
/// Implemented on the type of an option's declared default.
pub trait OptionValue: Copy {
    /// Resolved value type.
    type Output;

    /// Coerce `raw` (the highest-precedence text found, if any), falling back
    /// to `default`.
    fn coerce(info: &OptionInfo, raw: Option<&str>, default: Self) -> Self::Output;
}

impl OptionValue for Option<&'static str> {
    type Output = Option<String>;

    fn coerce(_info: &OptionInfo, raw: Option<&str>, default: Self) -> Self::Output {
        raw.or(default).map(str::to_string)
    }
}

impl OptionValue for u64 {
    type Output = u64;

    fn coerce(info: &OptionInfo, raw: Option<&str>, default: Self) -> Self::Output {
        match raw {
            None => default,
            Some(text) => text.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    option = info.name,
                    default = default,
                    "Ignoring non-numeric value, using default"
                );
                default
            }),
        }
    }
}

impl OptionValue for f64 {
    type Output = f64;

    fn coerce(info: &OptionInfo, raw: Option<&str>, default: Self) -> Self::Output {
        match raw.map(str::parse::<f64>) {
            None => default,
            Some(Ok(value)) if value.is_finite() && value >= 0.0 => value,
            Some(_) => {
                tracing::warn!(
                    option = info.name,
                    default = default,
                    "Ignoring value that is not a non-negative number, using default"
                );
                default
            }
        }
    }
}

impl OptionValue for bool {
    type Output = bool;

    fn coerce(_info: &OptionInfo, raw: Option<&str>, default: Self) -> Self::Output {
        raw.map(is_truthy).unwrap_or(default)
    }
}

/// Whether present option text reads as "on".
///
/// Stricter than plain string truthiness: `SPREADSHEET_MODE=false` is off.
fn is_truthy(text: &str) -> bool {
    !matches!(
        text.to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

/// Merges the command-line and environment layers with fixed precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    args: SourceLayer,
    env: SourceLayer,
}

impl ConfigResolver {
    /// Create a resolver over explicit layers.
    pub fn new(args: SourceLayer, env: SourceLayer) -> Self {
        Self { args, env }
    }

    /// Create a resolver over the given arguments and a snapshot of the
    /// current process environment.
    pub fn from_process(args: SourceLayer) -> Self {
        Self::new(args, SourceLayer::from_env())
    }

    /// Highest-precedence raw text for an option.
    fn raw(&self, info: &OptionInfo) -> Option<&str> {
        self.args
            .get(info.name)
            .or_else(|| info.env.iter().find_map(|key| self.env.get(key)))
    }

    /// Resolve a single option.
    pub fn resolve<T: OptionValue>(&self, option: &ConfigOption<T>) -> T::Output {
        T::coerce(&option.info, self.raw(&option.info), option.default)
    }

    /// Resolve every declared option into an immutable configuration.
    pub fn resolve_all(&self) -> ResolvedConfig {
        let config = ResolvedConfig {
            l2_node_web3_url: self.resolve(&schema::L2_NODE_WEB3_URL),
            l1_node_web3_url: self.resolve(&schema::L1_NODE_WEB3_URL),
            address_manager_address: self.resolve(&schema::ADDRESS_MANAGER_ADDRESS),
            l1_wallet_key: self.resolve(&schema::L1_WALLET_KEY),
            mnemonic: self.resolve(&schema::MNEMONIC),
            hd_path: self.resolve(&schema::HD_PATH),
            relay_gas_limit: self.resolve(&schema::RELAY_GAS_LIMIT),
            polling_interval: self.resolve(&schema::POLLING_INTERVAL),
            get_logs_interval: self.resolve(&schema::GET_LOGS_INTERVAL),
            l2_start_offset: self.resolve(&schema::L2_START_OFFSET),
            l1_start_offset: self.resolve(&schema::L1_START_OFFSET),
            from_l2_transaction_index: self.resolve(&schema::FROM_L2_TRANSACTION_INDEX),
            spreadsheet_mode: self.resolve(&schema::SPREADSHEET_MODE),
            sheet_id: self.resolve(&schema::SHEET_ID),
            client_email: self.resolve(&schema::CLIENT_EMAIL),
            client_private_key: self.resolve(&schema::CLIENT_PRIVATE_KEY),
        };

        tracing::info!(
            relay_gas_limit = config.relay_gas_limit,
            polling_interval_ms = config.polling_interval,
            get_logs_interval = config.get_logs_interval,
            from_l2_transaction_index = config.from_l2_transaction_index,
            spreadsheet_mode = config.spreadsheet_mode,
            "Configuration loaded"
        );

        config
    }
}

/// Load variables from an env file into the process environment.
///
/// Variables already set in the environment are left untouched. A missing
/// default `.env` is not an error; a missing explicitly requested file is.
/// Returns the path that was loaded, if any.
pub fn hydrate_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(loaded) => {
            tracing::debug!(path = %loaded.display(), "Loaded env file");
            Ok(Some(loaded))
        }
        Err(dotenvy::Error::Io(err)) if path.is_none() && err.kind() == ErrorKind::NotFound => {
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
