//! Fixed-size in-place kernels used as leaves of a plan tree.

use crate::fft::{check_lengths, Algorithm, FftDirection, FftError, Transform};
use crate::num::{Complex, Float};

/// sqrt(3)/2
const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

#[inline(always)]
pub fn fft2<T: Float>(input: &mut [Complex<T>]) {
    debug_assert_eq!(input.len(), 2);
    let a = input[0];
    let b = input[1];
    input[0] = a.add(b);
    input[1] = a.sub(b);
}

#[inline(always)]
pub fn fft3<T: Float>(input: &mut [Complex<T>], direction: FftDirection) {
    debug_assert_eq!(input.len(), 3);
    let a = input[0];
    let b = input[1];
    let c = input[2];
    let sum = b.add(c);
    let mid = a.sub(sum.scale(T::from_f32(0.5)));
    // sign·i·(sqrt(3)/2)·(b - c)
    let rot = b
        .sub(c)
        .scale(T::from_f64(HALF_SQRT_3))
        .rotate_quarter(direction.is_forward());
    input[0] = a.add(sum);
    input[1] = mid.add(rot);
    input[2] = mid.sub(rot);
}

#[inline(always)]
pub fn fft4<T: Float>(input: &mut [Complex<T>], direction: FftDirection) {
    debug_assert_eq!(input.len(), 4);
    let a0 = input[0];
    let a1 = input[1];
    let a2 = input[2];
    let a3 = input[3];
    let even0 = a0.add(a2);
    let even1 = a0.sub(a2);
    let odd0 = a1.add(a3);
    let odd1 = a1.sub(a3);
    let t1 = odd1.rotate_quarter(direction.is_forward());
    input[0] = even0.add(odd0);
    input[2] = even0.sub(odd0);
    input[1] = even1.add(t1);
    input[3] = even1.sub(t1);
}

/// Plan wrapping one of the fixed kernels (lengths 2, 3 and 4).
#[derive(Debug, Clone, Copy)]
pub struct Butterfly {
    len: usize,
    direction: FftDirection,
}

impl Butterfly {
    pub fn new(len: usize, direction: FftDirection) -> Result<Self, FftError> {
        match len {
            0 => Err(FftError::EmptyInput),
            2..=4 => Ok(Self { len, direction }),
            _ => Err(FftError::UnsupportedLength(len)),
        }
    }
}

impl<T: Float> Transform<T> for Butterfly {
    fn len(&self) -> usize {
        self.len
    }
    fn direction(&self) -> FftDirection {
        self.direction
    }
    fn algorithm(&self) -> Algorithm {
        Algorithm::Butterfly
    }
    fn execute(
        &mut self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        check_lengths(self.len, input, output)?;
        output.copy_from_slice(input);
        match self.len {
            2 => fft2(output),
            3 => fft3(output, self.direction),
            4 => fft4(output, self.direction),
            _ => unreachable!("butterfly length is validated at construction"),
        }
        Ok(())
    }
}
