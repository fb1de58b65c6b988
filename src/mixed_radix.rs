//! Mixed-radix Cooley–Tukey plan.
//!
//! A length `n = p * q` transform is computed as `q` transforms of length `p`
//! over the decimated columns `x[q*k + i]`, a twiddle correction
//! `exp(sign·2πi·i·k/n)`, then `p` transforms of length `q` over the
//! contiguous rows whose results are written transposed (`y[k*p + i]`).
//! `q` is the smallest divisor of `n`, so the outer pass count stays small
//! and the `p` sub-plan is decomposed further by the factory when composite.
//!
//! # Example
//! ```
//! use mixfft::fft::{FftDirection, FftPlanner, PlanOptions};
//! use mixfft::mixed_radix::MixedRadix;
//! use mixfft::{Complex32, Transform};
//!
//! let mut planner = FftPlanner::<f32>::new();
//! let mut plan =
//!     MixedRadix::new(6, FftDirection::Forward, PlanOptions::default(), &mut planner).unwrap();
//! assert_eq!(plan.factors(), (3, 2));
//!
//! let mut input = vec![Complex32::zero(); 6];
//! input[0] = Complex32::new(1.0, 0.0);
//! let mut output = vec![Complex32::zero(); 6];
//! plan.execute(&input, &mut output).unwrap();
//! assert!(output.iter().all(|c| (c.re - 1.0).abs() < 1e-6 && c.im.abs() < 1e-6));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::buffer::try_vec;
use crate::fft::{
    check_lengths, compute_twiddle, Algorithm, FftDirection, FftError, PlanFactory, PlanOptions,
    Transform,
};
use crate::num::{Complex, Float};

/// Smallest divisor `q` of `n` with `2 <= q < n`, or `None` when `n` is
/// prime or below 4.
///
/// Divisors are scanned upward from 2; the scan ends at `sqrt(n)` since a
/// composite `n` always has a divisor no larger than that.
pub fn smallest_factor(n: usize) -> Option<usize> {
    (2..n)
        .take_while(|d| d.checked_mul(*d).is_some_and(|sq| sq <= n))
        .find(|d| n % d == 0)
}

pub struct MixedRadix<T: Float> {
    // Fields drop in declaration order: sub-plans are released before the
    // buffers they were sized against.
    sub_p: Box<dyn Transform<T> + Send>,
    sub_q: Box<dyn Transform<T> + Send>,
    scratch_a: Vec<Complex<T>>,
    scratch_b: Vec<Complex<T>>,
    staging: Vec<Complex<T>>,
    twiddles: Vec<Complex<T>>,
    len: usize,
    p: usize,
    q: usize,
    direction: FftDirection,
    options: PlanOptions,
}

impl<T: Float> MixedRadix<T> {
    /// Build a plan for composite `n`, requesting the length-`p` and
    /// length-`q` sub-plans from `factory`.
    ///
    /// Fails with [`FftError::NotComposite`] before allocating anything when
    /// `n` has no factorisation. Any later failure (allocation, a factory
    /// error, a sub-plan of the wrong shape) releases everything built so
    /// far before the error is returned.
    pub fn new<F>(
        n: usize,
        direction: FftDirection,
        options: PlanOptions,
        factory: &mut F,
    ) -> Result<Self, FftError>
    where
        F: PlanFactory<T> + ?Sized,
    {
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        let q = smallest_factor(n).ok_or(FftError::NotComposite(n))?;
        let p = n / q;
        T::from_usize(n).ok_or(FftError::LengthOverflow)?;

        let scratch_len = p.max(q);
        let scratch_a = try_vec(Complex::zero(), scratch_len)?;
        let scratch_b = try_vec(Complex::zero(), scratch_len)?;
        let staging = try_vec(Complex::zero(), n)?;
        let mut twiddles = try_vec(Complex::zero(), n)?;

        let sub_p = factory.create_plan(p, direction, options)?;
        check_sub_plan(sub_p.as_ref(), p, direction)?;
        let sub_q = factory.create_plan(q, direction, options)?;
        check_sub_plan(sub_q.as_ref(), q, direction)?;

        for (i, w) in twiddles.iter_mut().enumerate() {
            *w = compute_twiddle(i, n, direction)?;
        }

        log::debug!(
            "mixed-radix plan n={} p={} q={} direction={:?} (sub-plans {:?}, {:?})",
            n,
            p,
            q,
            direction,
            sub_p.algorithm(),
            sub_q.algorithm()
        );

        Ok(Self {
            sub_p,
            sub_q,
            scratch_a,
            scratch_b,
            staging,
            twiddles,
            len: n,
            p,
            q,
            direction,
            options,
        })
    }

    /// `(p, q)` with `p * q == len` and `q` the smallest divisor.
    pub fn factors(&self) -> (usize, usize) {
        (self.p, self.q)
    }

    /// Options this plan was built with; also passed to both sub-plans.
    pub fn options(&self) -> PlanOptions {
        self.options
    }

    /// The precomputed table `exp(sign·2πi·i/n)` for `i = 0..n`.
    pub fn twiddles(&self) -> &[Complex<T>] {
        &self.twiddles
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch_a.len()
    }

    /// The length-`p` and length-`q` sub-plans.
    pub fn sub_plans(&self) -> (&(dyn Transform<T> + Send), &(dyn Transform<T> + Send)) {
        (self.sub_p.as_ref(), self.sub_q.as_ref())
    }

    pub fn sub_plans_mut(
        &mut self,
    ) -> (
        &mut (dyn Transform<T> + Send),
        &mut (dyn Transform<T> + Send),
    ) {
        (self.sub_p.as_mut(), self.sub_q.as_mut())
    }

    /// Release the plan and, depth-first, every sub-plan it owns.
    pub fn destroy(self) {
        drop(self);
    }
}

fn check_sub_plan<T: Float>(
    plan: &(dyn Transform<T> + Send),
    expected: usize,
    direction: FftDirection,
) -> Result<(), FftError> {
    if plan.len() != expected {
        return Err(FftError::SubPlanMismatch {
            expected,
            found: plan.len(),
        });
    }
    if plan.direction() != direction {
        return Err(FftError::SubPlanDirectionMismatch {
            expected: direction,
            found: plan.direction(),
        });
    }
    Ok(())
}

impl<T: Float> Transform<T> for MixedRadix<T> {
    fn len(&self) -> usize {
        self.len
    }
    fn direction(&self) -> FftDirection {
        self.direction
    }
    fn algorithm(&self) -> Algorithm {
        Algorithm::MixedRadix {
            p: self.p,
            q: self.q,
        }
    }

    fn execute(
        &mut self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        check_lengths(self.len, input, output)?;
        let (n, p, q) = (self.len, self.p, self.q);
        debug_assert!(self.scratch_a.len() >= p.max(q));
        debug_assert_eq!(self.staging.len(), n);

        self.staging.copy_from_slice(input);

        // q transforms of length p over the decimated columns, then twiddle.
        for i in 0..q {
            for (dst, src) in self.scratch_a[..p]
                .iter_mut()
                .zip(self.staging.iter().skip(i).step_by(q))
            {
                *dst = *src;
            }
            self.sub_p
                .execute(&self.scratch_a[..p], &mut self.scratch_b[..p])?;
            for (k, (dst, src)) in self
                .staging
                .iter_mut()
                .skip(i)
                .step_by(q)
                .zip(&self.scratch_b[..p])
                .enumerate()
            {
                *dst = src.mul(self.twiddles[(i * k) % n]);
            }
            if self.options.trace_passes {
                log::trace!(
                    "n={} pass 1 column {}/{}: {:?}",
                    n,
                    i,
                    q,
                    Strided::new(&self.staging, i, q)
                );
            }
        }

        // p transforms of length q over the rows, written transposed.
        for i in 0..p {
            self.scratch_a[..q].copy_from_slice(&self.staging[q * i..q * (i + 1)]);
            self.sub_q
                .execute(&self.scratch_a[..q], &mut self.scratch_b[..q])?;
            for (dst, src) in output
                .iter_mut()
                .skip(i)
                .step_by(p)
                .zip(&self.scratch_b[..q])
            {
                *dst = *src;
            }
            if self.options.trace_passes {
                log::trace!(
                    "n={} pass 2 row {}/{}: {:?}",
                    n,
                    i,
                    p,
                    Strided::new(output, i, p)
                );
            }
        }
        Ok(())
    }
}

impl<T: Float> Drop for MixedRadix<T> {
    fn drop(&mut self) {
        log::debug!(
            "releasing mixed-radix plan n={} p={} q={}",
            self.len,
            self.p,
            self.q
        );
    }
}

impl<T: Float> fmt::Debug for MixedRadix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixedRadix")
            .field("len", &self.len)
            .field("p", &self.p)
            .field("q", &self.q)
            .field("direction", &self.direction)
            .field("options", &self.options)
            .field("sub_p", &self.sub_p.algorithm())
            .field("sub_q", &self.sub_q.algorithm())
            .finish()
    }
}

/// Lazily formatted strided view, so trace output costs nothing when the
/// `trace` level is disabled.
struct Strided<'a, T: Float> {
    data: &'a [Complex<T>],
    start: usize,
    step: usize,
}

impl<'a, T: Float> Strided<'a, T> {
    fn new(data: &'a [Complex<T>], start: usize, step: usize) -> Self {
        Self { data, start, step }
    }
}

impl<T: Float> fmt::Debug for Strided<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.data
                    .iter()
                    .skip(self.start)
                    .step_by(self.step)
                    .map(|c| (c.re, c.im)),
            )
            .finish()
    }
}
