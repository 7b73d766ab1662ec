use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use lucid_core::{ExhaustionPolicy, TestMode};
use lucid_system_bootstrap::EngineConfig;

/// Exhaustion policy as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    /// End the run when a tier is exhausted.
    EndRun,
    /// Restart exhausted tiers from their first entry.
    Wrap,
    /// Generate anomaly-free rooms once a tier is exhausted.
    Stop,
}

impl From<PolicyArg> for ExhaustionPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::EndRun => Self::EndRun,
            PolicyArg::Wrap => Self::Wrap,
            PolicyArg::Stop => Self::StopOffering,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) stages: Option<u32>,
    pub(crate) anomaly_chance: Option<f64>,
    pub(crate) test_anomaly: Option<usize>,
    pub(crate) test_hard: bool,
    pub(crate) policy: Option<PolicyArg>,
}

/// Reads an engine config file, falling back to defaults without a path.
pub(crate) fn load(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read engine config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid engine config at {}", path.display()))
}

fn parse(contents: &str) -> Result<EngineConfig> {
    toml::from_str(contents).context("failed to parse engine config toml contents")
}

/// Applies command-line overrides on top of `config`.
pub(crate) fn apply(mut config: EngineConfig, overrides: Overrides) -> Result<EngineConfig> {
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(stages) = overrides.stages {
        if stages == 0 {
            bail!("--stages must be at least 1");
        }
        config.progression.final_stage = stages;
    }
    if let Some(chance) = overrides.anomaly_chance {
        config.progression.anomaly_chance = chance;
    }
    if let Some(policy) = overrides.policy {
        config.exhaustion = policy.into();
    }
    match (overrides.test_anomaly, overrides.test_hard) {
        (Some(index), true) => config.test_mode = TestMode::hard(index),
        (Some(index), false) => config.test_mode = TestMode::easy(index),
        (None, true) => bail!("--test-hard requires --test-anomaly"),
        (None, false) => {}
    }
    Ok(config)
}
