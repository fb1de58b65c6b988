//! Scalar and complex sample types shared by every plan.

// Minimal float trait for generic transforms (no_std, libm for trig)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f32(x: f32) -> Self;
    fn from_f64(x: f64) -> Self;
    /// Attempt to convert a `usize` into the floating-point type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn sin_cos(self) -> (Self, Self);
    fn pi() -> Self;
    fn abs(self) -> Self;
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x < MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        libm::fmaf(self, a, b)
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: u64 = 1u64 << 53;
        if (x as u64) < MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        libm::fma(self, a, b)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Default for Complex<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    /// `cos(theta) + i·sin(theta)`
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }
    /// Multiply by `-i` (`forward == true`) or `+i`.
    #[inline(always)]
    pub fn rotate_quarter(self, forward: bool) -> Self {
        if forward {
            Self {
                re: self.im,
                im: -self.re,
            }
        } else {
            Self {
                re: -self.im,
                im: self.re,
            }
        }
    }
    /// Squared magnitude.
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re.mul_add(other.re, -(self.im * other.im)),
            im: self.re.mul_add(other.im, self.im * other.re),
        }
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let c = a.mul(b);
        assert!((c.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((c.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
    }

    #[test]
    fn test_expi_quadrants() {
        let half_pi = <f64 as Float>::pi() / 2.0;
        let e = Complex64::expi(half_pi);
        assert!(e.re.abs() < 1e-15);
        assert!((e.im - 1.0).abs() < 1e-15);
        let e = Complex32::expi(-<f32 as Float>::pi());
        assert!((e.re + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_matches_mul() {
        let z = Complex64::new(0.25, -3.0);
        let minus_i = Complex64::new(0.0, -1.0);
        let plus_i = Complex64::new(0.0, 1.0);
        assert_eq!(z.rotate_quarter(true), z.mul(minus_i));
        assert_eq!(z.rotate_quarter(false), z.mul(plus_i));
    }

    #[test]
    fn test_from_usize_exactness_limits() {
        assert_eq!(<f32 as Float>::from_usize(12), Some(12.0));
        assert_eq!(<f32 as Float>::from_usize(1 << 24), None);
        assert_eq!(<f64 as Float>::from_usize(1 << 40), Some((1u64 << 40) as f64));
    }
}
