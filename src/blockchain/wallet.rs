//! Signing identity for the L1 relay wallet.
//!
//! # Security
//! - Keys and phrases are never logged or included in error messages
//! - `Debug` output shows the address and the credential kind only

use std::fmt;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use url::Url;

use crate::error::{BootstrapError, BootstrapResult};

/// Derivation path used when a mnemonic is given without one.
pub const DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0/0";

/// Credential the signing identity is derived from.
///
/// A private key takes priority over a mnemonic; supplying both is allowed.
#[derive(Clone, PartialEq, Eq)]
pub enum SigningIdentitySource {
    /// Hex-encoded secp256k1 key, with or without `0x`.
    PrivateKey(String),
    /// BIP-39 phrase plus an optional derivation path.
    Mnemonic {
        phrase: String,
        derivation_path: Option<String>,
    },
}

impl SigningIdentitySource {
    /// Pick the credential to use from the resolved options.
    pub fn select(
        private_key: Option<&str>,
        mnemonic: Option<&str>,
        hd_path: Option<&str>,
    ) -> BootstrapResult<Self> {
        match (present(private_key), present(mnemonic)) {
            (Some(key), ignored) => {
                if ignored.is_some() {
                    tracing::debug!("Both l1-wallet-key and mnemonic set, using l1-wallet-key");
                }
                Ok(Self::PrivateKey(key.to_string()))
            }
            (None, Some(phrase)) => Ok(Self::Mnemonic {
                phrase: phrase.to_string(),
                derivation_path: present(hd_path).map(str::to_string),
            }),
            (None, None) => Err(BootstrapError::MissingSigningCredential),
        }
    }
}

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for SigningIdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            Self::Mnemonic { derivation_path, .. } => f
                .debug_struct("Mnemonic")
                .field("phrase", &"<redacted>")
                .field("derivation_path", derivation_path)
                .finish(),
        }
    }
}

/// Which kind of credential produced an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKind {
    PrivateKey,
    MnemonicDerived { derivation_path: String },
}

/// The relay wallet: a local signer bound to the L1 endpoint.
#[derive(Clone)]
pub struct SigningIdentity {
    signer: PrivateKeySigner,
    kind: IdentityKind,
    endpoint: Url,
}

impl SigningIdentity {
    /// Build the signer described by `source` and bind it to `endpoint`.
    pub fn derive(source: SigningIdentitySource, endpoint: Url) -> BootstrapResult<Self> {
        let (signer, kind) = match source {
            SigningIdentitySource::PrivateKey(key) => (from_private_key(&key)?, IdentityKind::PrivateKey),
            SigningIdentitySource::Mnemonic { phrase, derivation_path } => {
                let path = derivation_path.unwrap_or_else(|| DEFAULT_HD_PATH.to_string());
                let signer = from_mnemonic(&phrase, &path)?;
                (signer, IdentityKind::MnemonicDerived { derivation_path: path })
            }
        };

        tracing::info!(
            address = %signer.address(),
            kind = ?kind,
            endpoint = %endpoint,
            "Signing identity initialized"
        );

        Ok(Self { signer, kind, endpoint })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the credential kind this identity was derived from.
    pub fn kind(&self) -> &IdentityKind {
        &self.kind
    }

    /// Get the endpoint this identity is bound to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the underlying signer.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// A provider on the bound endpoint that signs outgoing transactions with
    /// this identity.
    pub fn provider(&self) -> DynProvider {
        ProviderBuilder::new()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .connect_http(self.endpoint.clone())
            .erased()
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.signer.address())
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Derive the relay wallet from whichever credential is present.
///
/// A private key wins over a mnemonic; with neither, fails with
/// [`BootstrapError::MissingSigningCredential`].
pub fn derive_identity(
    private_key: Option<&str>,
    mnemonic: Option<&str>,
    hd_path: Option<&str>,
    endpoint: &Url,
) -> BootstrapResult<SigningIdentity> {
    let source = SigningIdentitySource::select(private_key, mnemonic, hd_path)?;
    SigningIdentity::derive(source, endpoint.clone())
}

fn from_private_key(private_key_hex: &str) -> BootstrapResult<PrivateKeySigner> {
    let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

    // The parse error never echoes the key.
    key_hex.parse().map_err(|_| {
        BootstrapError::InvalidSigningCredential(
            "l1-wallet-key is not a 32-byte hex private key".to_string(),
        )
    })
}

fn from_mnemonic(phrase: &str, derivation_path: &str) -> BootstrapResult<PrivateKeySigner> {
    MnemonicBuilder::<English>::default()
        .phrase(phrase)
        .derivation_path(derivation_path)
        .map_err(|e| {
            BootstrapError::InvalidSigningCredential(format!(
                "invalid hd-path '{}': {}",
                derivation_path, e
            ))
        })?
        .build()
        .map_err(|_| {
            BootstrapError::InvalidSigningCredential(
                "mnemonic is not a valid BIP-39 English phrase".to_string(),
            )
        })
}
