// Path: crates/types/src/config/mod.rs
//! Parameters of the links module and the service capability flags.

use crate::error::ConfigError;
use crate::oracle::Coin;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Parameters used to build oracle request packets.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OracleParams {
    /// The oracle script that verifies application accounts.
    pub script_id: u64,
    /// The number of validators asked to report.
    pub ask_count: u64,
    /// The minimum number of reports for a result.
    pub min_count: u64,
    /// Gas for the prepare phase of the script.
    pub prepare_gas: u64,
    /// Gas for the execute phase of the script.
    pub execute_gas: u64,
    /// The maximum fee paid to data sources.
    pub fee_limit: Vec<Coin>,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            script_id: 32,
            ask_count: 10,
            min_count: 6,
            prepare_gas: 50_000,
            execute_gas: 200_000,
            fee_limit: vec![Coin::new("band", 10)],
        }
    }
}

impl OracleParams {
    /// Checks the parameters describe a request the oracle can satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script_id == 0 {
            return Err(ConfigError::Invalid("oracle script id must be positive".into()));
        }
        if self.min_count == 0 {
            return Err(ConfigError::Invalid("oracle min count must be positive".into()));
        }
        if self.ask_count < self.min_count {
            return Err(ConfigError::Invalid(format!(
                "oracle ask count ({}) must be at least min count ({})",
                self.ask_count, self.min_count
            )));
        }
        if self.prepare_gas == 0 || self.execute_gas == 0 {
            return Err(ConfigError::Invalid("oracle gas limits must be positive".into()));
        }
        if let Some(coin) = self.fee_limit.iter().find(|c| c.denom.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("invalid fee limit coin: {}", coin)));
        }
        Ok(())
    }
}

/// Parameters governing application links.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppLinksParams {
    /// Blocks after creation at which an unfinished verification expires.
    pub expiry_interval: u64,
}

impl Default for AppLinksParams {
    fn default() -> Self {
        Self {
            expiry_interval: 5_256_000, // ~1 year at 6s/block
        }
    }
}

/// All parameters of the links module.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LinksParams {
    /// Oracle request parameters.
    pub oracle: OracleParams,
    /// Application link parameters.
    pub app_links: AppLinksParams,
}

impl LinksParams {
    /// Validates every parameter group.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oracle.validate()?;
        if self.app_links.expiry_interval == 0 {
            return Err(ConfigError::Invalid("expiry interval must be positive".into()));
        }
        Ok(())
    }

    /// Parses and validates parameters from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

bitflags::bitflags! {
    /// A bitmask representing the lifecycle hooks a service exposes.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(transparent)]
    pub struct Capabilities: u32 {
        /// Implements the OnEndBlock trait and its `on_end_block` hook.
        const ON_END_BLOCK = 0b0001;
        /// Implements the PacketModule trait and receives channel callbacks.
        const PACKET_MODULE = 0b0010;
    }
}

impl Encode for Capabilities {
    fn encode_to<T: parity_scale_codec::Output + ?Sized>(&self, dest: &mut T) {
        self.bits().encode_to(dest)
    }
}

impl Decode for Capabilities {
    fn decode<I: parity_scale_codec::Input>(
        input: &mut I,
    ) -> Result<Self, parity_scale_codec::Error> {
        let bits = u32::decode(input)?;
        Self::from_bits(bits).ok_or_else(|| "Invalid bits for Capabilities".into())
    }
}

impl Capabilities {
    /// Parses a list of capability names into a bitmask.
    pub fn from_strings(strings: &[String]) -> Result<Self, ConfigError> {
        let mut caps = Capabilities::empty();
        for s in strings {
            match s.as_str() {
                "OnEndBlock" => caps |= Capabilities::ON_END_BLOCK,
                "PacketModule" => caps |= Capabilities::PACKET_MODULE,
                _ => return Err(ConfigError::Invalid(format!("Unknown capability: {}", s))),
            }
        }
        Ok(caps)
    }
}
