//! configuration for the demo runner.
//!
//! every value comes from a `--flag value` argument, then an environment
//! variable, then the default.

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use unroller::{Advance, Compare, LoopDescriptor, LoopError, ParseOpError};

/// errors produced while building a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {flag}: {value:?}")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("unknown scenario: {0:?}")]
    UnknownScenario(String),

    #[error("no scenarios selected")]
    NoScenarios,

    #[error(transparent)]
    Operation(#[from] ParseOpError),

    #[error("runtime loop rejected: {0}")]
    Loop(#[from] LoopError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// one demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// descending `>` loop driving a `Body` with a forwarded multiplier.
    Functor,
    /// ascending `<=` loop with an inline body.
    Lambda,
    /// `1..=64` advancing by multiplication.
    Powers,
    /// 10x10 nested loop, outer ascending, inner descending.
    Nested,
    /// loop described on the command line, iterated at run time.
    Runtime,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Functor,
        Scenario::Lambda,
        Scenario::Powers,
        Scenario::Nested,
        Scenario::Runtime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Functor => "functor",
            Scenario::Lambda => "lambda",
            Scenario::Powers => "powers",
            Scenario::Nested => "nested",
            Scenario::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownScenario(name.to_string()))
    }
}

/// descriptor parameters for the runtime scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeLoop {
    pub start: i64,
    pub end: i64,
    pub step: i64,
    pub compare: Compare,
    pub advance: Advance,
    /// iterations allowed before the loop is rejected.
    pub limit: usize,
}

impl RuntimeLoop {
    pub fn descriptor(&self) -> LoopDescriptor {
        LoopDescriptor::new(self.start, self.end, self.step, self.compare, self.advance)
    }
}

impl Default for RuntimeLoop {
    fn default() -> Self {
        Self {
            start: 0,
            end: 10,
            step: 1,
            compare: Compare::Less,
            advance: Advance::Add,
            limit: 4096,
        }
    }
}

/// demo runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// scenarios to run, in order.
    pub scenarios: Vec<Scenario>,
    /// multiplier forwarded to the functor scenario.
    pub scale: i64,
    /// label printed before each power of two.
    pub prefix: String,
    /// loop for the runtime scenario.
    pub runtime: RuntimeLoop,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenarios: Scenario::ALL.to_vec(),
            scale: 5,
            prefix: "Power of 2: ".into(),
            runtime: RuntimeLoop::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// set the scenarios to run.
    pub fn with_scenarios(mut self, scenarios: impl Into<Vec<Scenario>>) -> Self {
        self.scenarios = scenarios.into();
        self
    }

    /// set the functor multiplier.
    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = scale;
        self
    }

    /// set the powers label.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// set the runtime loop.
    pub fn with_runtime_loop(mut self, runtime: RuntimeLoop) -> Self {
        self.runtime = runtime;
        self
    }

    /// reject empty runs and runtime loops that would not terminate.
    pub fn validate(&self) -> Result<()> {
        if self.scenarios.is_empty() {
            return Err(ConfigError::NoScenarios);
        }
        if self.scenarios.contains(&Scenario::Runtime) {
            self.runtime.descriptor().validate(self.runtime.limit)?;
        }
        Ok(())
    }

    /// read process arguments and environment.
    pub fn from_env_args() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        Self::from_sources(&args, |key| env::var(key).ok())
    }

    /// build from `--flag value` arguments, falling back to `lookup(ENV_VAR)`.
    pub fn from_sources<F>(args: &[String], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |flag: &str, var: &str| arg_value(args, flag).or_else(|| lookup(var));
        let mut config = Config::default();

        if let Some(list) = value("--scenarios", "UNROLL_SCENARIOS") {
            config.scenarios = list
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(scale) = value("--scale", "UNROLL_SCALE") {
            config.scale = parse_number("--scale", &scale)?;
        }
        if let Some(prefix) = value("--prefix", "UNROLL_PREFIX") {
            config.prefix = prefix;
        }

        let runtime = &mut config.runtime;
        if let Some(start) = value("--start", "UNROLL_START") {
            runtime.start = parse_number("--start", &start)?;
        }
        if let Some(end) = value("--end", "UNROLL_END") {
            runtime.end = parse_number("--end", &end)?;
        }
        if let Some(compare) = value("--cmp", "UNROLL_CMP") {
            runtime.compare = compare.parse()?;
            // named comparators count in their own direction unless told otherwise
            runtime.step = runtime.compare.default_step();
        }
        if let Some(step) = value("--step", "UNROLL_STEP") {
            runtime.step = parse_number("--step", &step)?;
        }
        if let Some(advance) = value("--advance", "UNROLL_ADVANCE") {
            runtime.advance = advance.parse()?;
        }
        if let Some(limit) = value("--limit", "UNROLL_LIMIT") {
            runtime.limit = parse_number("--limit", &limit)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_number<T: FromStr>(flag: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            flag,
            value: value.to_string(),
        })
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("unroller")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenarios.len(), 5);
        assert_eq!(config.scale, 5);
        assert_eq!(config.prefix, "Power of 2: ");
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::new()
            .with_scenarios([Scenario::Powers])
            .with_scale(3)
            .with_prefix("2^k = ");

        assert_eq!(config.scenarios, [Scenario::Powers]);
        assert_eq!(config.scale, 3);
        assert_eq!(config.prefix, "2^k = ");
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_sources(
            &args(&[
                "--scenarios", "runtime,Powers", "--start", "1", "--end", "64", "--step", "2",
                "--cmp", "le", "--advance", "mul",
            ]),
            no_env,
        )
        .unwrap();

        assert_eq!(config.scenarios, [Scenario::Runtime, Scenario::Powers]);
        let desc = config.runtime.descriptor();
        assert_eq!(desc.iter().collect::<Vec<_>>(), [1, 2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_env_fallback() {
        let config = Config::from_sources(&args(&["--scale", "7"]), |key| match key {
            "UNROLL_SCALE" => Some("9".into()),
            "UNROLL_PREFIX" => Some("p=".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.scale, 7);
        assert_eq!(config.prefix, "p=");
    }

    #[test]
    fn test_comparator_sets_direction() {
        let config = Config::from_sources(
            &args(&["--start", "10", "--end", "1", "--cmp", ">"]),
            no_env,
        )
        .unwrap();
        assert_eq!(config.runtime.step, -1);
        assert_eq!(config.runtime.descriptor().iter().count(), 9);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_sources(&args(&["--scale", "five"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { flag: "--scale", .. }));

        let err = Config::from_sources(&args(&["--scenarios", "matrix"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScenario(ref name) if name == "matrix"));

        let err = Config::from_sources(&args(&["--cmp", "<>"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Operation(_)));

        let err = Config::from_sources(&args(&["--scenarios", ","]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::NoScenarios));
    }

    #[test]
    fn test_non_terminating_runtime_loop() {
        let err =
            Config::from_sources(&args(&["--step", "-1", "--limit", "100"]), no_env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Loop(LoopError::ExceedsLimit { limit: 100 })
        ));

        let err = Config::from_sources(&args(&["--step", "0"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Loop(LoopError::Stalled { index: 0 })));

        // only checked when the runtime scenario is selected
        let config = Config::from_sources(&args(&["--scenarios", "lambda", "--step", "0"]), no_env);
        assert!(config.is_ok());
    }
}
