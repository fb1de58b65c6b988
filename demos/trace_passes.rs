//! Demonstrates plan logging and per-pass tracing.
//!
//! Run with `MIXFFT_TRACE_PASSES=1` to dump every intermediate row.
use mixfft::{Complex64, FftDirection, FftPlanner, PlanOptions};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let options = PlanOptions::from_env();
    let mut planner = FftPlanner::<f64>::with_options(options);
    let mut plan = planner.plan(6, FftDirection::Forward).unwrap();

    let mut input = vec![Complex64::zero(); 6];
    input[0] = Complex64::new(1.0, 0.0);
    let mut output = vec![Complex64::zero(); 6];
    plan.execute(&input, &mut output).unwrap();
}
