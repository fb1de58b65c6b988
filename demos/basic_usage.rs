//! Basic usage example for mixfft
//!
//! Plans a composite-length transform, inspects the decomposition, runs it
//! forward and back, and releases the plan.

use mixfft::{normalize, Complex32, FftDirection, FftPlanner, MixedRadix, PlanOptions};

fn main() {
    println!("=== mixfft Basic Usage Example ===\n");

    // 1. Planner-built transform
    println!("1. Forward and inverse transform (N = 12)");
    let mut planner = FftPlanner::<f32>::new();
    let mut forward = planner.plan(12, FftDirection::Forward).unwrap();
    let mut inverse = planner.plan(12, FftDirection::Inverse).unwrap();
    println!("   Algorithm: {:?}", forward.algorithm());

    let input: Vec<Complex32> = (0..12).map(|i| Complex32::new(i as f32, 0.0)).collect();
    let mut spectrum = vec![Complex32::zero(); 12];
    forward.execute(&input, &mut spectrum).unwrap();
    println!(
        "   Spectrum: {:?}",
        spectrum
            .iter()
            .map(|c| format!("{:.2}+{:.2}i", c.re, c.im))
            .collect::<Vec<_>>()
    );

    let mut back = vec![Complex32::zero(); 12];
    inverse.execute(&spectrum, &mut back).unwrap();
    normalize(&mut back).unwrap();
    println!("   Round trip: {:?}", back.iter().map(|c| c.re).collect::<Vec<_>>());
    println!();

    // 2. Explicit mixed-radix plan
    println!("2. Mixed-radix decomposition");
    for n in [6usize, 35, 60, 64, 97] {
        match MixedRadix::<f32>::new(n, FftDirection::Forward, PlanOptions::default(), &mut planner)
        {
            Ok(plan) => {
                let (p, q) = plan.factors();
                let (sub_p, sub_q) = plan.sub_plans();
                println!(
                    "   N = {:3}: P = {:2} ({:?}), Q = {} ({:?})",
                    n,
                    p,
                    sub_p.algorithm(),
                    q,
                    sub_q.algorithm()
                );
                plan.destroy();
            }
            Err(e) => println!("   N = {:3}: {}", n, e),
        }
    }
    println!();

    println!("   Cached direct-DFT tables: {}", planner.cached_tables());
}
