//! demo scenarios.
//!
//! each scenario returns the lines it produced so the runner decides where
//! they go. all but [`Scenario::Runtime`] are unrolled at compile time.

use crate::config::{Config, Scenario};
use unroller::{
    for_loop, static_for, static_for_le, static_for_nested, Advance, Body, Compare, Index,
    LoopDescriptor, LoopError,
};

/// 1, 2, 4 .. 64.
pub const POWERS: LoopDescriptor = LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul);

/// prints `index * scale` for every tagged index.
struct ScaledFunctor {
    lines: Vec<String>,
}

impl Body<i64> for ScaledFunctor {
    fn call<const I: i64>(&mut self, _: Index<I>, scale: &mut i64) {
        self.lines.push(format!("Functor {}", I * *scale));
    }
}

/// run one scenario.
pub fn run(scenario: Scenario, config: &Config) -> Result<Vec<String>, LoopError> {
    log::info!("running scenario {}", scenario);
    let lines = match scenario {
        Scenario::Functor => functor(config.scale),
        Scenario::Lambda => lambda(),
        Scenario::Powers => powers(&config.prefix),
        Scenario::Nested => nested(),
        Scenario::Runtime => runtime(config)?,
    };
    log::debug!("scenario {} produced {} lines", scenario, lines.len());
    Ok(lines)
}

/// run every configured scenario, stopping at the first failure.
pub fn run_all(config: &Config) -> Result<Vec<(Scenario, Vec<String>)>, LoopError> {
    config
        .scenarios
        .iter()
        .map(|&scenario| run(scenario, config).map(|lines| (scenario, lines)))
        .collect()
}

/// `10 > i`, counting down, through a [`Body`] with the scale forwarded.
pub fn functor(scale: i64) -> Vec<String> {
    let mut functor = ScaledFunctor { lines: Vec::new() };
    let mut scale = scale;
    static_for!(LoopDescriptor::greater_than(10, 1), functor, &mut scale);
    functor.lines
}

/// `1 <= i <= 20` with an inline body.
pub fn lambda() -> Vec<String> {
    let mut lines = Vec::new();
    static_for_le!(1, 20, |i| lines.push(format!("Lambda {}", i)));
    lines
}

/// powers of two; each index also sizes a square block at compile time.
pub fn powers(prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    static_for!(POWERS, |n| {
        let diagonal = [1u64; n as usize];
        let trace: u64 = diagonal.iter().sum();
        log::trace!("{}x{} block, trace {}", n, n, trace);
        lines.push(format!("{}{}", prefix, n));
    });
    lines
}

/// outer `0..10` ascending, inner `10 > i > 0` descending.
pub fn nested() -> Vec<String> {
    let mut rows: Vec<Vec<i64>> = Vec::new();
    static_for_nested!(
        LoopDescriptor::less_than(0, 10),
        LoopDescriptor::greater_than(10, 0),
        |i, o| {
            if rows.len() as i64 == o {
                rows.push(Vec::new());
            }
            rows[o as usize].push(i * o);
        }
    );
    rows.iter()
        .enumerate()
        .map(|(o, row)| {
            let cells: Vec<String> = row.iter().map(i64::to_string).collect();
            format!("Nested {}: {}", o, cells.join(" "))
        })
        .collect()
}

/// command-line loop, validated then iterated at run time.
pub fn runtime(config: &Config) -> Result<Vec<String>, LoopError> {
    let desc = config.runtime.descriptor();
    let trips = desc.validate(config.runtime.limit)?;
    log::debug!("runtime loop {} runs {} times", desc, trips);

    let mut lines = Vec::with_capacity(trips);
    for_loop(desc, |i, lines: &mut Vec<String>| lines.push(format!("Runtime {}", i)), &mut lines);
    Ok(lines)
}
