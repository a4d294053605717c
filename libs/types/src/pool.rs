//! Pool reserve snapshots keyed by asset symbol
//!
//! The data layer hands over loosely-typed [`RawPoolRecord`]s on every
//! refresh. They are validated here, once, into immutable
//! [`PoolReserveSnapshot`]s so the calculators never see a partial record.
//! Records that fail validation are dropped from the map and reported back,
//! which turns a half-populated refresh into `PoolNotFound` for the affected
//! assets instead of a failure for every quote.

use crate::common::errors::SnapshotError;
use crate::common::fixed_point::FixedPointAmount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Upper-cased asset symbol, e.g. `BNB` or `LOK-3C0`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AssetSymbol(String);

impl AssetSymbol {
    /// Parse a symbol, rejecting empty input
    pub fn parse(symbol: &str) -> Result<Self, SnapshotError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(SnapshotError::EmptySymbol);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetSymbol {
    fn from(symbol: &str) -> Self {
        Self(symbol.trim().to_ascii_uppercase())
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pool lifecycle status as reported by the pool index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    /// Open for swaps and liquidity
    Enabled,
    /// Accepting liquidity, not yet open for swaps
    Bootstrapped,
}

impl FromStr for PoolStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enabled" => Ok(Self::Enabled),
            "bootstrapped" | "bootstrap" => Ok(Self::Bootstrapped),
            _ => Err(()),
        }
    }
}

/// Immutable view of one pool's reserves
///
/// Serialize-only: decoding goes through [`RawPoolRecord`] so every
/// snapshot read from the wire has passed depth validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolReserveSnapshot {
    pub asset: AssetSymbol,
    /// Hub-asset (rune) side of the pool
    pub rune_depth: FixedPointAmount,
    /// Non-hub side of the pool
    pub asset_depth: FixedPointAmount,
    pub pool_units: FixedPointAmount,
    pub status: PoolStatus,
    /// Pool-specific vault; falls back to the map-level vault when absent
    pub pool_address: Option<String>,
}

impl PoolReserveSnapshot {
    pub fn new(
        asset: AssetSymbol,
        rune_depth: FixedPointAmount,
        asset_depth: FixedPointAmount,
        pool_units: FixedPointAmount,
        status: PoolStatus,
    ) -> Self {
        Self {
            asset,
            rune_depth,
            asset_depth,
            pool_units,
            status,
            pool_address: None,
        }
    }

    pub fn with_pool_address(mut self, address: impl Into<String>) -> Self {
        self.pool_address = Some(address.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status == PoolStatus::Enabled
    }

    /// Both sides empty, i.e. the next depositor creates the pool
    pub fn is_empty(&self) -> bool {
        self.rune_depth.is_zero() && self.asset_depth.is_zero()
    }
}

/// Pool record as served by the pool index, before validation
///
/// Depths and units are base-unit integers encoded as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPoolRecord {
    pub asset: Option<String>,
    pub rune_depth: Option<String>,
    pub asset_depth: Option<String>,
    pub pool_units: Option<String>,
    pub status: Option<String>,
    pub pool_address: Option<String>,
}

impl TryFrom<RawPoolRecord> for PoolReserveSnapshot {
    type Error = SnapshotError;

    fn try_from(record: RawPoolRecord) -> Result<Self, Self::Error> {
        let asset = AssetSymbol::parse(record.asset.as_deref().unwrap_or_default())?;
        let name = asset.as_str();

        let rune_depth = parse_base_units(name, "runeDepth", record.rune_depth.as_deref())?;
        let asset_depth = parse_base_units(name, "assetDepth", record.asset_depth.as_deref())?;
        let pool_units = parse_base_units(name, "poolUnits", record.pool_units.as_deref())?;

        let raw_status = record.status.ok_or_else(|| SnapshotError::MissingField {
            asset: name.to_string(),
            field: "status",
        })?;
        let status = raw_status
            .parse::<PoolStatus>()
            .map_err(|_| SnapshotError::UnknownStatus {
                asset: name.to_string(),
                status: raw_status.clone(),
            })?;

        let pool_address = record
            .pool_address
            .map(|address| address.trim().to_string())
            .filter(|address| !address.is_empty());

        Ok(Self {
            asset,
            rune_depth,
            asset_depth,
            pool_units,
            status,
            pool_address,
        })
    }
}

fn parse_base_units(
    asset: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<FixedPointAmount, SnapshotError> {
    let value = value.ok_or_else(|| SnapshotError::MissingField {
        asset: asset.to_string(),
        field,
    })?;

    value
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|units| i64::try_from(units).ok())
        .map(FixedPointAmount::from_base_units)
        .ok_or_else(|| SnapshotError::InvalidDepth {
            asset: asset.to_string(),
            field,
            value: value.to_string(),
        })
}

/// Snapshot map for one refresh of the pool index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSnapshots {
    pools: HashMap<AssetSymbol, PoolReserveSnapshot>,
    vault_address: Option<String>,
}

/// Outcome of building a snapshot map from raw records
#[derive(Debug, Clone)]
pub struct SnapshotLoad {
    pub pools: PoolSnapshots,
    pub rejected: Vec<SnapshotError>,
}

impl PoolSnapshots {
    pub fn new(vault_address: Option<String>) -> Self {
        Self {
            pools: HashMap::new(),
            vault_address: vault_address.filter(|address| !address.trim().is_empty()),
        }
    }

    /// Validate raw records into a snapshot map, keeping the valid ones
    pub fn from_records<I>(records: I, vault_address: Option<String>) -> SnapshotLoad
    where
        I: IntoIterator<Item = RawPoolRecord>,
    {
        let mut pools = Self::new(vault_address);
        let mut rejected = Vec::new();

        for record in records {
            match PoolReserveSnapshot::try_from(record) {
                Ok(snapshot) => pools.insert(snapshot),
                Err(e) => {
                    warn!(error = %e, "Rejected pool record");
                    rejected.push(e);
                }
            }
        }

        debug!(
            accepted = pools.len(),
            rejected = rejected.len(),
            "Built pool snapshot map"
        );

        SnapshotLoad { pools, rejected }
    }

    /// Add or replace the snapshot for its asset
    pub fn insert(&mut self, snapshot: PoolReserveSnapshot) {
        if let Some(previous) = self.pools.insert(snapshot.asset.clone(), snapshot) {
            warn!(asset = %previous.asset, "Replaced duplicate pool snapshot");
        }
    }

    /// Builder-style insert
    pub fn with_pool(mut self, snapshot: PoolReserveSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    pub fn get(&self, asset: &AssetSymbol) -> Option<&PoolReserveSnapshot> {
        self.pools.get(asset)
    }

    pub fn contains(&self, asset: &AssetSymbol) -> bool {
        self.pools.contains_key(asset)
    }

    pub fn vault_address(&self) -> Option<&str> {
        self.vault_address.as_deref()
    }

    /// Address deposits for `asset` go to: the pool's own, else the vault's
    pub fn pool_address(&self, asset: &AssetSymbol) -> Option<&str> {
        self.pools
            .get(asset)
            .and_then(|pool| pool.pool_address.as_deref())
            .or_else(|| self.vault_address())
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
