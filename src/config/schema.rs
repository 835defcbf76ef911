//! Configuration schema definitions.
//!
//! Every option the relayer understands is declared here once, with its
//! command-line name, the environment variables it can be read from, its type
//! and its default. [`ResolvedConfig`] holds one typed field per option.

use std::fmt;

/// Value type of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Free-form text.
    Str,
    /// Unsigned decimal integer.
    Uint,
    /// Flag; true when present and truthy.
    Bool,
    /// Non-negative decimal number.
    UFloat,
}

/// Static description of an option, independent of its default's type.
#[derive(Debug, Clone, Copy)]
pub struct OptionInfo {
    /// Command-line name, accepted as `--<name>`.
    pub name: &'static str,
    /// Environment variables consulted in order; the first one present wins.
    pub env: &'static [&'static str],
    /// One-line help shown by `--help`.
    pub help: &'static str,
    /// Declared value type.
    pub kind: OptionType,
}

/// A declared option together with its typed default.
#[derive(Debug, Clone, Copy)]
pub struct ConfigOption<T> {
    pub info: OptionInfo,
    pub default: T,
}

impl<T> ConfigOption<T> {
    pub const fn name(&self) -> &'static str {
        self.info.name
    }
}

const fn option<T>(
    name: &'static str,
    env: &'static [&'static str],
    help: &'static str,
    kind: OptionType,
    default: T,
) -> ConfigOption<T> {
    ConfigOption {
        info: OptionInfo { name, env, help, kind },
        default,
    }
}

pub const L2_NODE_WEB3_URL: ConfigOption<Option<&str>> = option(
    "l2-node-web3-url",
    &["L2_NODE_WEB3_URL"],
    "JSON-RPC endpoint of the L2 node",
    OptionType::Str,
    None,
);

pub const L1_NODE_WEB3_URL: ConfigOption<Option<&str>> = option(
    "l1-node-web3-url",
    &["L1_NODE_WEB3_URL"],
    "JSON-RPC endpoint of the L1 node",
    OptionType::Str,
    None,
);

pub const ADDRESS_MANAGER_ADDRESS: ConfigOption<Option<&str>> = option(
    "address-manager-address",
    &["ADDRESS_MANAGER_ADDRESS"],
    "Address of the on-chain address manager",
    OptionType::Str,
    None,
);

pub const L1_WALLET_KEY: ConfigOption<Option<&str>> = option(
    "l1-wallet-key",
    &["L1_WALLET_KEY"],
    "Hex private key of the L1 relay wallet",
    OptionType::Str,
    None,
);

pub const MNEMONIC: ConfigOption<Option<&str>> = option(
    "mnemonic",
    &["MNEMONIC"],
    "BIP-39 phrase of the L1 relay wallet (used when no key is given)",
    OptionType::Str,
    None,
);

pub const HD_PATH: ConfigOption<Option<&str>> = option(
    "hd-path",
    &["HD_PATH"],
    "Derivation path applied to the mnemonic",
    OptionType::Str,
    None,
);

pub const RELAY_GAS_LIMIT: ConfigOption<u64> = option(
    "relay-gas-limit",
    &["RELAY_GAS_LIMIT"],
    "Gas limit for each relay transaction",
    OptionType::Uint,
    4_000_000,
);

pub const POLLING_INTERVAL: ConfigOption<u64> = option(
    "polling-interval",
    &["POLLING_INTERVAL"],
    "Milliseconds between polls for new messages",
    OptionType::Uint,
    5_000,
);

pub const GET_LOGS_INTERVAL: ConfigOption<u64> = option(
    "get-logs-interval",
    &["GET_LOGS_INTERVAL"],
    "Block span of each eth_getLogs query",
    OptionType::Uint,
    2_000,
);

pub const L2_START_OFFSET: ConfigOption<u64> = option(
    "l2-start-offset",
    &["L2_START_OFFSET", "L2_BLOCK_OFFSET"],
    "Block offset applied when scanning L2",
    OptionType::Uint,
    1,
);

pub const L1_START_OFFSET: ConfigOption<u64> = option(
    "l1-start-offset",
    &["L1_START_OFFSET", "L1_BLOCK_OFFSET"],
    "Block offset applied when scanning L1",
    OptionType::Uint,
    1,
);

pub const FROM_L2_TRANSACTION_INDEX: ConfigOption<u64> = option(
    "from-l2-transaction-index",
    &["FROM_L2_TRANSACTION_INDEX"],
    "First L2 transaction index to relay",
    OptionType::Uint,
    0,
);

pub const SPREADSHEET_MODE: ConfigOption<bool> = option(
    "spreadsheet-mode",
    &["SPREADSHEET_MODE"],
    "Record relay activity to a Google spreadsheet",
    OptionType::Bool,
    false,
);

pub const SHEET_ID: ConfigOption<Option<&str>> = option(
    "sheet-id",
    &["SHEET_ID"],
    "Spreadsheet id used in spreadsheet mode",
    OptionType::Str,
    None,
);

pub const CLIENT_EMAIL: ConfigOption<Option<&str>> = option(
    "client-email",
    &["CLIENT_EMAIL"],
    "Service-account email used in spreadsheet mode",
    OptionType::Str,
    None,
);

pub const CLIENT_PRIVATE_KEY: ConfigOption<Option<&str>> = option(
    "client-private-key",
    &["CLIENT_PRIVATE_KEY"],
    "Service-account PEM key used in spreadsheet mode (\\n escapes allowed)",
    OptionType::Str,
    None,
);

/// Every declared option, in `--help` order.
pub const ALL_OPTIONS: [OptionInfo; 16] = [
    L1_NODE_WEB3_URL.info,
    L2_NODE_WEB3_URL.info,
    ADDRESS_MANAGER_ADDRESS.info,
    L1_WALLET_KEY.info,
    MNEMONIC.info,
    HD_PATH.info,
    RELAY_GAS_LIMIT.info,
    POLLING_INTERVAL.info,
    GET_LOGS_INTERVAL.info,
    L2_START_OFFSET.info,
    L1_START_OFFSET.info,
    FROM_L2_TRANSACTION_INDEX.info,
    SPREADSHEET_MODE.info,
    SHEET_ID.info,
    CLIENT_EMAIL.info,
    CLIENT_PRIVATE_KEY.info,
];

/// Fully resolved relayer configuration.
///
/// Produced once by [`ConfigResolver`](crate::config::loader::ConfigResolver)
/// and read-only afterwards. String options are `None` when no source supplied
/// a non-empty value.
#[derive(Clone, PartialEq)]
pub struct ResolvedConfig {
    pub l2_node_web3_url: Option<String>,
    pub l1_node_web3_url: Option<String>,
    pub address_manager_address: Option<String>,
    pub l1_wallet_key: Option<String>,
    pub mnemonic: Option<String>,
    pub hd_path: Option<String>,
    pub relay_gas_limit: u64,
    /// Milliseconds.
    pub polling_interval: u64,
    pub get_logs_interval: u64,
    pub l2_start_offset: u64,
    pub l1_start_offset: u64,
    pub from_l2_transaction_index: u64,
    pub spreadsheet_mode: bool,
    pub sheet_id: Option<String>,
    pub client_email: Option<String>,
    pub client_private_key: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let text = |default: Option<&str>| default.map(str::to_string);
        Self {
            l2_node_web3_url: text(L2_NODE_WEB3_URL.default),
            l1_node_web3_url: text(L1_NODE_WEB3_URL.default),
            address_manager_address: text(ADDRESS_MANAGER_ADDRESS.default),
            l1_wallet_key: text(L1_WALLET_KEY.default),
            mnemonic: text(MNEMONIC.default),
            hd_path: text(HD_PATH.default),
            relay_gas_limit: RELAY_GAS_LIMIT.default,
            polling_interval: POLLING_INTERVAL.default,
            get_logs_interval: GET_LOGS_INTERVAL.default,
            l2_start_offset: L2_START_OFFSET.default,
            l1_start_offset: L1_START_OFFSET.default,
            from_l2_transaction_index: FROM_L2_TRANSACTION_INDEX.default,
            spreadsheet_mode: SPREADSHEET_MODE.default,
            sheet_id: text(SHEET_ID.default),
            client_email: text(CLIENT_EMAIL.default),
            client_private_key: text(CLIENT_PRIVATE_KEY.default),
        }
    }
}

// Secrets must never reach the logs.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ResolvedConfig")
            .field("l2_node_web3_url", &self.l2_node_web3_url)
            .field("l1_node_web3_url", &self.l1_node_web3_url)
            .field("address_manager_address", &self.address_manager_address)
            .field("l1_wallet_key", &redact(&self.l1_wallet_key))
            .field("mnemonic", &redact(&self.mnemonic))
            .field("hd_path", &self.hd_path)
            .field("relay_gas_limit", &self.relay_gas_limit)
            .field("polling_interval", &self.polling_interval)
            .field("get_logs_interval", &self.get_logs_interval)
            .field("l2_start_offset", &self.l2_start_offset)
            .field("l1_start_offset", &self.l1_start_offset)
            .field("from_l2_transaction_index", &self.from_l2_transaction_index)
            .field("spreadsheet_mode", &self.spreadsheet_mode)
            .field("sheet_id", &self.sheet_id)
            .field("client_email", &self.client_email)
            .field("client_private_key", &redact(&self.client_private_key))
            .finish()
    }
}
