//! Direct O(n²) DFT.
//!
//! Serves prime lengths that have no mixed-radix factorisation and doubles as
//! the reference transform in tests.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::buffer::try_vec;
use crate::fft::{check_lengths, compute_twiddle, Algorithm, FftDirection, FftError, Transform};
use crate::num::{Complex, Float};

/// Table of `exp(sign·2πi·k/n)` for `k = 0..n`.
pub fn generate_twiddles<T: Float>(
    n: usize,
    direction: FftDirection,
) -> Result<Vec<Complex<T>>, FftError> {
    let mut twiddles = try_vec(Complex::zero(), n)?;
    for (k, w) in twiddles.iter_mut().enumerate() {
        *w = compute_twiddle(k, n, direction)?;
    }
    Ok(twiddles)
}

pub struct Dft<T: Float> {
    twiddles: Arc<[Complex<T>]>,
    direction: FftDirection,
}

impl<T: Float> Dft<T> {
    pub fn new(n: usize, direction: FftDirection) -> Result<Self, FftError> {
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        let twiddles = generate_twiddles(n, direction)?;
        Ok(Self::with_twiddles(Arc::from(twiddles), direction))
    }

    /// Build around a table produced by [`generate_twiddles`]; the plan
    /// length is the table length.
    pub fn with_twiddles(twiddles: Arc<[Complex<T>]>, direction: FftDirection) -> Self {
        Self {
            twiddles,
            direction,
        }
    }
}

impl<T: Float> Transform<T> for Dft<T> {
    fn len(&self) -> usize {
        self.twiddles.len()
    }
    fn direction(&self) -> FftDirection {
        self.direction
    }
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dft
    }
    fn execute(
        &mut self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        let n = self.twiddles.len();
        check_lengths(n, input, output)?;
        for (k, dst) in output.iter_mut().enumerate() {
            let mut sum = Complex::zero();
            // (j * k) mod n, advanced without multiplying
            let mut idx = 0usize;
            for x in input {
                sum = sum.add(x.mul(self.twiddles[idx]));
                idx += k;
                if idx >= n {
                    idx -= n;
                }
            }
            *dst = sum;
        }
        Ok(())
    }
}

/// Allocate a plan, run it once on `input` and return the spectrum.
pub fn dft<T: Float>(
    input: &[Complex<T>],
    direction: FftDirection,
) -> Result<Vec<Complex<T>>, FftError> {
    let mut plan = Dft::new(input.len(), direction)?;
    let mut output = try_vec(Complex::zero(), input.len())?;
    plan.execute(input, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;
    use alloc::vec;

    #[test]
    fn test_dft_of_constant_is_dc_spike() {
        let input = vec![Complex64::new(1.0, 0.0); 5];
        let out = dft(&input, FftDirection::Forward).unwrap();
        assert!((out[0].re - 5.0).abs() < 1e-12);
        for c in &out[1..] {
            assert!(c.re.abs() < 1e-12 && c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_dft_single_tone_lands_in_bin() {
        let n = 7;
        let input: Vec<Complex64> = (0..n)
            .map(|j| compute_twiddle(2 * j, n, FftDirection::Inverse).unwrap())
            .collect();
        let out = dft(&input, FftDirection::Forward).unwrap();
        for (k, c) in out.iter().enumerate() {
            let expected = if k == 2 { n as f64 } else { 0.0 };
            assert!((c.re - expected).abs() < 1e-9, "bin {} re {}", k, c.re);
            assert!(c.im.abs() < 1e-9, "bin {} im {}", k, c.im);
        }
    }

    #[test]
    fn test_dft_rejects_empty_and_mismatched() {
        assert!(matches!(
            Dft::<f32>::new(0, FftDirection::Forward),
            Err(FftError::EmptyInput)
        ));
        let mut plan = Dft::<f64>::new(3, FftDirection::Forward).unwrap();
        let input = [Complex64::zero(); 3];
        let mut output = [Complex64::zero(); 4];
        assert_eq!(
            plan.execute(&input, &mut output),
            Err(FftError::MismatchedLengths)
        );
    }
}
