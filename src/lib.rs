//! # mixfft - mixed-radix FFT plans for Rust
//!
//! Discrete Fourier transforms of any length, computed by recursive
//! Cooley–Tukey decomposition. A length `N = P·Q` transform is split into
//! `Q` transforms of length `P` and `P` transforms of length `Q`, with `Q`
//! the smallest divisor of `N`; small lengths run on fixed kernels and
//! primes on a direct DFT.
//!
//! ## Features
//!
//! - **Plan once, execute many times**: plans own their scratch space and
//!   twiddle tables, so execution performs no allocation
//! - **Any length**: composite lengths are decomposed, primes fall back to
//!   an O(n²) DFT
//! - **Generic precision**: `f32` and `f64` through the [`Float`] trait
//! - **`no_std` + `alloc`**: trigonometry comes from `libm`
//! - **Fallible construction**: allocation failure is reported as
//!   [`FftError::AllocationFailed`] rather than aborting
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` for [`FftError`] and
//!   [`PlanOptions::from_env`]
//!
//! ## Logging
//!
//! Plan construction and release are reported at `debug` level through the
//! [`log`](https://docs.rs/log) facade. With
//! [`PlanOptions::trace_passes`] set, every intermediate row of the
//! mixed-radix passes is emitted at `trace` level.
//!
//! ## Example
//!
//! ```
//! use mixfft::{Complex64, FftDirection, FftPlanner, Transform};
//!
//! let mut planner = FftPlanner::<f64>::new();
//! let mut plan = planner.plan(12, FftDirection::Forward).unwrap();
//!
//! let input = vec![Complex64::new(1.0, 0.0); 12];
//! let mut output = vec![Complex64::zero(); 12];
//! plan.execute(&input, &mut output).unwrap();
//!
//! assert!((output[0].re - 12.0).abs() < 1e-9);
//! assert!(output[1..].iter().all(|c| c.norm_sqr() < 1e-18));
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Fallible buffer allocation
pub mod buffer;

/// Direct O(n²) DFT
///
/// Used for prime lengths and as a reference transform.
pub mod dft;

/// Plans, the plan factory and the error type
pub mod fft;

/// Fixed-size kernels for lengths 2, 3 and 4
pub mod fft_kernels;

/// Mixed-radix Cooley–Tukey plan
///
/// Builds, executes and releases the recursive `N = P·Q` decomposition.
pub mod mixed_radix;

pub mod num;

pub use fft::{
    normalize, transform, Algorithm, FftDirection, FftError, FftPlanner, PlanFactory, PlanOptions,
    Transform,
};
pub use mixed_radix::MixedRadix;
pub use num::{Complex, Complex32, Complex64, Float};
