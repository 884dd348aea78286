//! unroller demo runner.
//!
//! thin orchestration over the `unroller` crate:
//! - **config**: flags and environment into a validated [`Config`]
//! - **scenarios**: compile-time unrolled loops plus one runtime loop
//!
//! # scenarios
//!
//! ```text
//! functor  for (i = 10; i >  1; i += -1)  Body + forwarded scale
//! lambda   for (i =  1; i <= 20; i += 1)  inline body
//! powers   for (i =  1; i <= 64; i *= 2)  index sizes an array
//! nested   outer 0..10 x inner 10..0      100 calls, outer-major
//! runtime  from --start/--end/--step/--cmp/--advance
//! ```

pub mod config;
pub mod scenarios;

pub use config::{Config, ConfigError, RuntimeLoop, Scenario};
