use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use log::debug;

use crate::error::{check_len, SliceLengthError};
use crate::matrix::Matrix3;
use crate::number_traits::{Float, One, Zero};
use crate::vector::Vector3;

/// A quaternion `v.x·i + v.y·j + v.z·k + w`.
///
/// In mixed arithmetic a bare scalar `n` stands for the real quaternion
/// `(0, n)` and a bare [`Vector3`] `u` for the pure imaginary quaternion
/// `(u, 0)`.
///
/// Nothing keeps a quaternion normalized: rotation helpers expect the caller
/// to have called [`Quaternion::normalize`] first.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quaternion<T = f32> {
    pub v: Vector3<T>,
    pub w: T,
}

unsafe impl<T: Zeroable> Zeroable for Quaternion<T> {}
unsafe impl<T: Pod> Pod for Quaternion<T> {}

impl<T> Quaternion<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            v: Vector3::new(x, y, z),
            w,
        }
    }

    pub const fn from_parts(v: Vector3<T>, w: T) -> Self {
        Self { v, w }
    }
}

impl<T> Quaternion<T>
where
    T: Zero,
{
    /// `(0, 0, 0, w)`
    pub fn from_real(w: T) -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), w)
    }

    /// `(v, 0)`
    pub fn from_imaginary(v: Vector3<T>) -> Self {
        Self::from_parts(v, T::zero())
    }
}

impl<T> Quaternion<T>
where
    T: Zero + One,
{
    pub fn identity() -> Self {
        Self::from_real(T::one())
    }
}

impl<T> Quaternion<T>
where
    T: Copy + Neg<Output = T>,
{
    pub fn conjugate(&self) -> Self {
        Self::from_parts(-self.v, self.w)
    }
}

impl<T> Quaternion<T>
where
    T: Float,
{
    /// Rotation of `angle` radians around `axis`, which must be of unit
    /// length.
    pub fn from_axis_angle(axis: &Vector3<T>, angle: T) -> Self {
        let half_angle = angle.half();
        Self::from_parts(*axis * half_angle.sin(), half_angle.cos())
    }

    /// Squared magnitude, `v·v + w²`.
    pub fn norm(&self) -> T {
        self.v.dot(&self.v) + self.w.squared()
    }

    pub fn magnitude(&self) -> T {
        self.norm().sqrt()
    }

    /// Divides every component by [`Self::magnitude`] so that the norm
    /// becomes 1.
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude.is_zero() {
            debug!("Normalizing a zero-magnitude quaternion");
        }
        *self /= magnitude;
    }

    pub fn normalized(&self) -> Self {
        let mut normalized = *self;
        normalized.normalize();
        normalized
    }

    /// `conjugate / norm`. For unit quaternions this is the conjugate.
    pub fn inverse(&self) -> Self {
        let norm = self.norm();
        if norm.is_zero() {
            debug!("Inverting a zero-magnitude quaternion");
        }
        self.conjugate() / norm
    }

    /// Imaginary part of `q * (v, 0) * q⁻¹`. Only a rotation when `self` is
    /// normalized.
    pub fn rotate_vector(&self, v: &Vector3<T>) -> Vector3<T> {
        let u = self.v;
        let s = self.w;
        u * u.dot(v) * T::two() + *v * (s * s - u.dot(&u)) + u.cross(v) * T::two() * s
    }

    /// Rotation matrix for column vectors, so that
    /// `q.rotation_matrix() * v == q.rotate_vector(&v)` for a normalized `q`.
    #[rustfmt::skip]
    #[allow(clippy::similar_names)]
    pub fn rotation_matrix(&self) -> Matrix3<T> {
        let (x, y, z, w) = (self.v.x, self.v.y, self.v.z, self.w);
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let w2 = w + w;
        let xx2 = x2 * x;
        let xy2 = x2 * y;
        let xz2 = x2 * z;
        let yy2 = y2 * y;
        let yz2 = y2 * z;
        let zz2 = z2 * z;
        let wx2 = w2 * x;
        let wy2 = w2 * y;
        let wz2 = w2 * z;

        Matrix3::with_values([
            T::one() - yy2 - zz2, xy2 - wz2, xz2 + wy2,
            xy2 + wz2, T::one() - xx2 - zz2, yz2 - wx2,
            xz2 - wy2, yz2 + wx2, T::one() - xx2 - yy2,
        ])
    }
}

impl<T> Quaternion<T>
where
    T: Pod,
{
    /// `[v.x, v.y, v.z, w]`
    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(std::slice::from_mut(self))
    }
}

/// The zero quaternion. Use [`Quaternion::identity`] for the identity
/// rotation.
impl<T> Default for Quaternion<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self::from_real(T::zero())
    }
}

impl<T> Display for Quaternion<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.v.x, self.v.y, self.v.z, self.w)
    }
}

impl<T> Add for Quaternion<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_parts(self.v + rhs.v, self.w + rhs.w)
    }
}

impl<T> Add<Vector3<T>> for Quaternion<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Vector3<T>) -> Self::Output {
        Self::from_parts(self.v + rhs, self.w)
    }
}

impl<T> Add<T> for Quaternion<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: T) -> Self::Output {
        Self::from_parts(self.v, self.w + rhs)
    }
}

impl<T> Sub for Quaternion<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_parts(self.v - rhs.v, self.w - rhs.w)
    }
}

impl<T> Sub<Vector3<T>> for Quaternion<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Vector3<T>) -> Self::Output {
        Self::from_parts(self.v - rhs, self.w)
    }
}

impl<T> Sub<T> for Quaternion<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: T) -> Self::Output {
        Self::from_parts(self.v, self.w - rhs)
    }
}

/// Hamilton product:
/// `(v1, w1)(v2, w2) = (v1 × v2 + w1·v2 + w2·v1, w1·w2 − v1·v2)`.
impl<T> Mul for Quaternion<T>
where
    T: Copy + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_parts(
            self.v.cross(&rhs.v) + rhs.v * self.w + self.v * rhs.w,
            self.w * rhs.w - self.v.dot(&rhs.v),
        )
    }
}

impl<T> Mul<Vector3<T>> for Quaternion<T>
where
    T: Copy + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self * Self::from_imaginary(rhs)
    }
}

impl<T> Mul<T> for Quaternion<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self::from_parts(self.v * rhs, self.w * rhs)
    }
}

impl<T> Div<T> for Quaternion<T>
where
    T: Copy + Div<Output = T>,
{
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Self::from_parts(self.v / rhs, self.w / rhs)
    }
}

impl<T> Neg for Quaternion<T>
where
    T: Copy + Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_parts(-self.v, -self.w)
    }
}

macro_rules! impl_assign_op {
    ($assign_trait:ident, $assign_fn:ident, $op:tt, $rhs:ty, ($($bound:tt)*)) => {
        impl<T> $assign_trait<$rhs> for Quaternion<T>
        where
            T: $($bound)*,
        {
            fn $assign_fn(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +, Quaternion<T>, (Copy + Add<Output = T>));
impl_assign_op!(AddAssign, add_assign, +, Vector3<T>, (Copy + Add<Output = T>));
impl_assign_op!(AddAssign, add_assign, +, T, (Copy + Add<Output = T>));
impl_assign_op!(SubAssign, sub_assign, -, Quaternion<T>, (Copy + Sub<Output = T>));
impl_assign_op!(SubAssign, sub_assign, -, Vector3<T>, (Copy + Sub<Output = T>));
impl_assign_op!(SubAssign, sub_assign, -, T, (Copy + Sub<Output = T>));
impl_assign_op!(
    MulAssign, mul_assign, *, Quaternion<T>,
    (Copy + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>)
);
impl_assign_op!(
    MulAssign, mul_assign, *, Vector3<T>,
    (Copy + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>)
);
impl_assign_op!(MulAssign, mul_assign, *, T, (Copy + Mul<Output = T>));
impl_assign_op!(DivAssign, div_assign, /, T, (Copy + Div<Output = T>));

impl<T> Add<Quaternion<T>> for Vector3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Quaternion<T>;

    fn add(self, rhs: Quaternion<T>) -> Self::Output {
        rhs + self
    }
}

impl<T> Sub<Quaternion<T>> for Vector3<T>
where
    T: Copy + Zero + Sub<Output = T>,
{
    type Output = Quaternion<T>;

    fn sub(self, rhs: Quaternion<T>) -> Self::Output {
        Quaternion::from_imaginary(self) - rhs
    }
}

impl<T> Mul<Quaternion<T>> for Vector3<T>
where
    T: Copy + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    type Output = Quaternion<T>;

    fn mul(self, rhs: Quaternion<T>) -> Self::Output {
        Quaternion::from_imaginary(self) * rhs
    }
}

macro_rules! impl_scalar_lhs_ops {
    ($($scalar:ty),*) => {
        $(
            impl Add<Quaternion<$scalar>> for $scalar {
                type Output = Quaternion<$scalar>;

                fn add(self, rhs: Quaternion<$scalar>) -> Self::Output {
                    rhs + self
                }
            }

            impl Sub<Quaternion<$scalar>> for $scalar {
                type Output = Quaternion<$scalar>;

                fn sub(self, rhs: Quaternion<$scalar>) -> Self::Output {
                    Quaternion::from_real(self) - rhs
                }
            }

            impl Mul<Quaternion<$scalar>> for $scalar {
                type Output = Quaternion<$scalar>;

                fn mul(self, rhs: Quaternion<$scalar>) -> Self::Output {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_ops!(f32, f64);

impl<T> From<[T; 4]> for Quaternion<T>
where
    T: Copy,
{
    fn from(value: [T; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl<T> From<Quaternion<T>> for [T; 4] {
    fn from(value: Quaternion<T>) -> Self {
        [value.v.x, value.v.y, value.v.z, value.w]
    }
}

impl<'a, T> TryFrom<&'a [T]> for Quaternion<T>
where
    T: Copy,
{
    type Error = SliceLengthError;

    fn try_from(slice: &'a [T]) -> Result<Self, Self::Error> {
        check_len(slice, 4)?;
        Ok(Self::new(slice[0], slice[1], slice[2], slice[3]))
    }
}
