use crate::{minimax::DEFAULT_DEPTH, Agent, MinimaxAgent, RandomAgent};
use derive_more::{Display, Error, From};
use ron::error::SpannedError;
use ron::extensions::Extensions;
use ron::Options;
use serde::Deserialize;
use std::str::FromStr;

/// Runtime configuration for an [`Agent`].
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum AgentConfig {
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    Minimax {
        #[serde(default = "default_depth")]
        #[cfg_attr(test, strategy(1u8..=4))]
        depth: u8,
    },
}

fn default_depth() -> u8 {
    DEFAULT_DEPTH
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig::Minimax {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// The reason why parsing [`AgentConfig`] failed.
#[derive(Debug, Display, Error, From)]
#[display(fmt = "failed to parse agent configuration")]
pub struct ParseAgentConfigError(SpannedError);

impl FromStr for AgentConfig {
    type Err = ParseAgentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(s)?)
    }
}

impl AgentConfig {
    /// Creates the configured agent.
    pub fn build(self) -> Box<dyn Agent> {
        match self {
            AgentConfig::Random { seed: Some(seed) } => Box::new(RandomAgent::with_seed(seed)),
            AgentConfig::Random { seed: None } => Box::new(RandomAgent::new()),
            AgentConfig::Minimax { depth } => Box::new(MinimaxAgent::new(depth)),
        }
    }
}
