// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::BlocksConfig;
use bblocks_core::BlocksError;
use bblocks_fitness::Prior;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub type UnknownFields = Map<String, Value>;

pub fn validate_schema_version(schema_version: u32, context: &str) -> Result<(), BlocksError> {
    if schema_version == 0 || schema_version > CURRENT_SCHEMA_VERSION {
        return Err(BlocksError::configuration(format!(
            "{context} schema_version={schema_version} is unsupported; expected 1..={CURRENT_SCHEMA_VERSION}"
        )));
    }
    Ok(())
}

/// Wire format for versioned Bayesian Blocks config payloads.
///
/// The fitness model travels as its name tag and is resolved on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlocksConfigWire {
    pub schema_version: u32,
    pub fitness: String,
    #[serde(default)]
    pub prior: Prior,
    #[serde(default, flatten)]
    pub unknown_fields: UnknownFields,
}

impl BlocksConfigWire {
    pub fn from_runtime(config: BlocksConfig) -> Self {
        Self::from_runtime_with_unknown(config, CURRENT_SCHEMA_VERSION, UnknownFields::new())
    }

    pub fn from_runtime_with_unknown(
        config: BlocksConfig,
        schema_version: u32,
        unknown_fields: UnknownFields,
    ) -> Self {
        Self {
            schema_version,
            fitness: config.fitness.name().to_string(),
            prior: config.prior,
            unknown_fields,
        }
    }

    pub fn into_runtime_parts(self) -> Result<(BlocksConfig, UnknownFields), BlocksError> {
        validate_schema_version(self.schema_version, "BlocksConfig")?;
        let config = BlocksConfig::from_tag(&self.fitness, self.prior)?;
        Ok((config, self.unknown_fields))
    }

    pub fn to_runtime(self) -> Result<BlocksConfig, BlocksError> {
        let (config, _) = self.into_runtime_parts()?;
        Ok(config)
    }
}
