//! Transform plans and the planner that dispatches between them.
//!
//! Every algorithm in this crate is exposed as a plan implementing
//! [`Transform`]: a value built once for a fixed length and direction and then
//! executed any number of times. [`FftPlanner`] is the default
//! [`PlanFactory`]; it routes composite lengths to the
//! [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! [`MixedRadix`] plan, small lengths to fixed kernels and primes to a direct
//! DFT. Mixed-radix plans ask the same factory for their sub-plans, so a plan
//! is a tree whose leaves are base-case kernels.
//!
//! Inverse plans are not normalised; see [`normalize`].

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use hashbrown::HashMap;

use crate::dft::{self, Dft};
use crate::fft_kernels::Butterfly;
use crate::mixed_radix::{smallest_factor, MixedRadix};

pub use crate::num::{Complex, Complex32, Complex64, Float};

/// Largest length served by a fixed-size kernel.
const MAX_BUTTERFLY_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// A transform of length zero was requested.
    EmptyInput,
    /// The length has no factorisation `P * Q` with `P, Q >= 2`.
    NotComposite(usize),
    /// A working buffer of `len` samples could not be allocated.
    AllocationFailed { len: usize },
    /// The length (or an index below it) is not exactly representable in
    /// the sample's float type.
    LengthOverflow,
    /// The buffers passed to `execute` do not match the plan length.
    MismatchedLengths,
    /// The plan type has no kernel for this length.
    UnsupportedLength(usize),
    /// A factory returned a sub-plan of the wrong length.
    SubPlanMismatch { expected: usize, found: usize },
    /// A factory returned a sub-plan running in the wrong direction.
    SubPlanDirectionMismatch {
        expected: FftDirection,
        found: FftDirection,
    },
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "transform length must be non-zero"),
            FftError::NotComposite(n) => {
                write!(f, "length {} has no mixed-radix factorisation", n)
            }
            FftError::AllocationFailed { len } => {
                write!(f, "failed to allocate a buffer of {} samples", len)
            }
            FftError::LengthOverflow => {
                write!(f, "length is not exactly representable in the float type")
            }
            FftError::MismatchedLengths => write!(f, "buffer length does not match plan length"),
            FftError::UnsupportedLength(n) => write!(f, "no kernel for length {}", n),
            FftError::SubPlanMismatch { expected, found } => write!(
                f,
                "factory returned a sub-plan of length {} (expected {})",
                found, expected
            ),
            FftError::SubPlanDirectionMismatch { expected, found } => write!(
                f,
                "factory returned a sub-plan with direction {:?} (expected {:?})",
                found, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Sign convention of the transform exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FftDirection {
    /// `exp(-2πi·jk/N)`
    #[default]
    Forward,
    /// `exp(+2πi·jk/N)`, without the `1/N` factor.
    Inverse,
}

impl FftDirection {
    pub fn sign<T: Float>(self) -> T {
        match self {
            FftDirection::Forward => -T::one(),
            FftDirection::Inverse => T::one(),
        }
    }

    pub fn is_forward(self) -> bool {
        self == FftDirection::Forward
    }

    pub fn opposite(self) -> Self {
        match self {
            FftDirection::Forward => FftDirection::Inverse,
            FftDirection::Inverse => FftDirection::Forward,
        }
    }
}

/// Options passed to a factory and inherited by every sub-plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanOptions {
    /// Emit every intermediate row of the mixed-radix passes at `trace`
    /// level through the `log` facade.
    pub trace_passes: bool,
}

impl PlanOptions {
    pub fn with_trace_passes(mut self, enabled: bool) -> Self {
        self.trace_passes = enabled;
        self
    }

    /// Read options from the environment.
    ///
    /// `MIXFFT_TRACE_PASSES` accepts `1`, `true`, `yes` or `on`
    /// (case-insensitive); anything else leaves tracing off.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let trace_passes = std::env::var("MIXFFT_TRACE_PASSES")
            .map(|v| {
                let v = v.trim();
                ["1", "true", "yes", "on"]
                    .iter()
                    .any(|accepted| v.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false);
        Self { trace_passes }
    }
}

/// Concrete algorithm behind a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Identity,
    Butterfly,
    Dft,
    MixedRadix { p: usize, q: usize },
}

/// A prepared transform of fixed length and direction.
///
/// `execute` reads `input` and writes the transform into `output`; both must
/// hold exactly [`len`](Transform::len) samples. `input` is never modified.
/// Execution borrows the plan mutably because plans own their scratch space,
/// so one plan cannot run on two threads at once; separate plans can.
pub trait Transform<T: Float> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn direction(&self) -> FftDirection;
    fn algorithm(&self) -> Algorithm;
    fn execute(
        &mut self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError>;
}

/// Builds plans by length. Sub-plans of a [`MixedRadix`] plan are requested
/// from the factory that built the parent.
pub trait PlanFactory<T: Float> {
    fn create_plan(
        &mut self,
        n: usize,
        direction: FftDirection,
        options: PlanOptions,
    ) -> Result<Box<dyn Transform<T> + Send>, FftError>;
}

/// Validate that both buffers hold exactly `n` samples.
#[inline]
pub fn check_lengths<T: Float>(
    n: usize,
    input: &[Complex<T>],
    output: &[Complex<T>],
) -> Result<(), FftError> {
    if input.len() != n || output.len() != n {
        return Err(FftError::MismatchedLengths);
    }
    Ok(())
}

/// Twiddle factor `exp(sign·2πi·k/n)` for the given direction.
pub fn compute_twiddle<T: Float>(
    k: usize,
    n: usize,
    direction: FftDirection,
) -> Result<Complex<T>, FftError> {
    let k = T::from_usize(k).ok_or(FftError::LengthOverflow)?;
    let n = T::from_usize(n).ok_or(FftError::LengthOverflow)?;
    let two_pi = T::from_f32(2.0) * T::pi();
    Ok(Complex::expi(direction.sign::<T>() * two_pi * k / n))
}

/// Length-one transform: the output is the input.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    direction: FftDirection,
}

impl Identity {
    pub fn new(direction: FftDirection) -> Self {
        Self { direction }
    }
}

impl<T: Float> Transform<T> for Identity {
    fn len(&self) -> usize {
        1
    }
    fn direction(&self) -> FftDirection {
        self.direction
    }
    fn algorithm(&self) -> Algorithm {
        Algorithm::Identity
    }
    fn execute(
        &mut self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        check_lengths(1, input, output)?;
        output[0] = input[0];
        Ok(())
    }
}

type DftTable<T> = Arc<[Complex<T>]>;

/// Default plan factory.
///
/// Keeps a cache of direct-DFT twiddle tables so that repeated prime-length
/// sub-plans inside one decomposition share a single table.
pub struct FftPlanner<T: Float> {
    dft_cache: HashMap<(usize, FftDirection), DftTable<T>>,
    options: PlanOptions,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self::with_options(PlanOptions::default())
    }

    pub fn with_options(options: PlanOptions) -> Self {
        Self {
            dft_cache: HashMap::new(),
            options,
        }
    }

    /// Which algorithm [`plan`](Self::plan) will pick for length `n`.
    pub fn algorithm_for(n: usize) -> Result<Algorithm, FftError> {
        match n {
            0 => Err(FftError::EmptyInput),
            1 => Ok(Algorithm::Identity),
            2..=MAX_BUTTERFLY_LEN => Ok(Algorithm::Butterfly),
            _ => Ok(match smallest_factor(n) {
                Some(q) => Algorithm::MixedRadix { p: n / q, q },
                None => Algorithm::Dft,
            }),
        }
    }

    /// Build a plan for length `n` using the planner's own options.
    pub fn plan(
        &mut self,
        n: usize,
        direction: FftDirection,
    ) -> Result<Box<dyn Transform<T> + Send>, FftError> {
        self.create_plan(n, direction, self.options)
    }

    /// Build a direct O(n²) DFT plan regardless of `n`.
    pub fn plan_dft(&mut self, n: usize, direction: FftDirection) -> Result<Dft<T>, FftError> {
        let twiddles = self.get_dft_twiddles(n, direction)?;
        Ok(Dft::with_twiddles(twiddles, direction))
    }

    /// Retrieve (or build and cache) the length-`n` direct-DFT table
    /// `exp(sign·2πi·k/n)` for `k = 0..n`.
    pub fn get_dft_twiddles(
        &mut self,
        n: usize,
        direction: FftDirection,
    ) -> Result<DftTable<T>, FftError> {
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if let Some(table) = self.dft_cache.get(&(n, direction)) {
            return Ok(Arc::clone(table));
        }
        let table: DftTable<T> = Arc::from(dft::generate_twiddles::<T>(n, direction)?);
        self.dft_cache.insert((n, direction), Arc::clone(&table));
        Ok(table)
    }

    /// Number of cached direct-DFT tables.
    pub fn cached_tables(&self) -> usize {
        self.dft_cache.len()
    }
}

impl<T: Float> PlanFactory<T> for FftPlanner<T> {
    fn create_plan(
        &mut self,
        n: usize,
        direction: FftDirection,
        options: PlanOptions,
    ) -> Result<Box<dyn Transform<T> + Send>, FftError> {
        match Self::algorithm_for(n)? {
            Algorithm::Identity => Ok(Box::new(Identity::new(direction))),
            Algorithm::Butterfly => Ok(Box::new(Butterfly::new(n, direction)?)),
            Algorithm::Dft => Ok(Box::new(self.plan_dft(n, direction)?)),
            Algorithm::MixedRadix { .. } => {
                Ok(Box::new(MixedRadix::new(n, direction, options, self)?))
            }
        }
    }
}

/// One-shot transform: plan, execute once and release the plan.
pub fn transform<T: Float>(
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    direction: FftDirection,
) -> Result<(), FftError> {
    if input.len() != output.len() {
        return Err(FftError::MismatchedLengths);
    }
    let mut planner = FftPlanner::<T>::new();
    let mut plan = planner.plan(input.len(), direction)?;
    plan.execute(input, output)
}

/// Scale `data` by `1/len`, turning an inverse transform into a true inverse.
pub fn normalize<T: Float>(data: &mut [Complex<T>]) -> Result<(), FftError> {
    if data.is_empty() {
        return Err(FftError::EmptyInput);
    }
    let scale = T::one() / T::from_usize(data.len()).ok_or(FftError::LengthOverflow)?;
    for c in data.iter_mut() {
        *c = c.scale(scale);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_algorithm_dispatch() {
        assert_eq!(
            FftPlanner::<f32>::algorithm_for(0),
            Err(FftError::EmptyInput)
        );
        assert_eq!(FftPlanner::<f32>::algorithm_for(1), Ok(Algorithm::Identity));
        for n in 2..=4 {
            assert_eq!(FftPlanner::<f32>::algorithm_for(n), Ok(Algorithm::Butterfly));
        }
        assert_eq!(FftPlanner::<f32>::algorithm_for(7), Ok(Algorithm::Dft));
        assert_eq!(
            FftPlanner::<f32>::algorithm_for(12),
            Ok(Algorithm::MixedRadix { p: 6, q: 2 })
        );
        assert_eq!(
            FftPlanner::<f32>::algorithm_for(35),
            Ok(Algorithm::MixedRadix { p: 7, q: 5 })
        );
    }

    #[test]
    fn test_plan_lengths_and_direction() {
        let mut planner = FftPlanner::<f64>::new();
        for n in [1usize, 2, 3, 4, 5, 6, 9, 13, 16] {
            let plan = planner.plan(n, FftDirection::Inverse).unwrap();
            assert_eq!(plan.len(), n);
            assert_eq!(plan.direction(), FftDirection::Inverse);
        }
    }

    #[test]
    fn test_dft_twiddles_cached() {
        let mut planner = FftPlanner::<f32>::new();
        let a = planner.get_dft_twiddles(7, FftDirection::Forward).unwrap();
        let b = planner.get_dft_twiddles(7, FftDirection::Forward).unwrap();
        assert_eq!(a.as_ptr(), b.as_ptr());
        let c = planner.get_dft_twiddles(7, FftDirection::Inverse).unwrap();
        assert_ne!(a.as_ptr(), c.as_ptr());
        assert_eq!(planner.cached_tables(), 2);
    }

    #[test]
    fn test_twiddle_sign_convention() {
        let fwd = compute_twiddle::<f64>(1, 4, FftDirection::Forward).unwrap();
        assert!(fwd.re.abs() < 1e-15);
        assert!((fwd.im + 1.0).abs() < 1e-15);
        let inv = compute_twiddle::<f64>(1, 4, FftDirection::Inverse).unwrap();
        assert!((inv.im - 1.0).abs() < 1e-15);
        assert_eq!(
            compute_twiddle::<f32>(1 << 24, 1 << 25, FftDirection::Forward),
            Err(FftError::LengthOverflow)
        );
    }

    #[test]
    fn test_transform_impulse() {
        let mut input = vec![Complex32::zero(); 6];
        input[0] = Complex32::new(1.0, 0.0);
        let mut output = vec![Complex32::zero(); 6];
        transform(&input, &mut output, FftDirection::Forward).unwrap();
        for c in &output {
            assert!((c.re - 1.0).abs() < 1e-6, "re = {}", c.re);
            assert!(c.im.abs() < 1e-6, "im = {}", c.im);
        }
    }

    #[test]
    fn test_transform_mismatched_lengths() {
        let input = vec![Complex32::zero(); 4];
        let mut output = vec![Complex32::zero(); 3];
        assert_eq!(
            transform(&input, &mut output, FftDirection::Forward),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn test_normalize() {
        let mut data: Vec<Complex64> = (0..4).map(|i| Complex64::new(i as f64, 4.0)).collect();
        normalize(&mut data).unwrap();
        assert_eq!(data[3], Complex64::new(0.75, 1.0));
        let mut empty: Vec<Complex64> = Vec::new();
        assert_eq!(normalize(&mut empty), Err(FftError::EmptyInput));
    }

    #[test]
    fn test_identity_plan() {
        let mut plan = Identity::new(FftDirection::Forward);
        let input = [Complex64::new(2.0, -3.0)];
        let mut output = [Complex64::zero()];
        plan.execute(&input, &mut output).unwrap();
        assert_eq!(output, input);
        let mut long = [Complex64::zero(); 2];
        assert_eq!(
            plan.execute(&input, &mut long),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn test_error_display() {
        use alloc::string::ToString;
        assert_eq!(
            FftError::NotComposite(7).to_string(),
            "length 7 has no mixed-radix factorisation"
        );
        assert_eq!(
            FftError::AllocationFailed { len: 3 }.to_string(),
            "failed to allocate a buffer of 3 samples"
        );
        assert_eq!(
            FftError::SubPlanMismatch {
                expected: 5,
                found: 1
            }
            .to_string(),
            "factory returned a sub-plan of length 1 (expected 5)"
        );
        assert_eq!(
            FftError::SubPlanDirectionMismatch {
                expected: FftDirection::Forward,
                found: FftDirection::Inverse
            }
            .to_string(),
            "factory returned a sub-plan with direction Inverse (expected Forward)"
        );
    }
}
