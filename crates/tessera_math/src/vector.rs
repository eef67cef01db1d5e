use std::fmt::{Display, Formatter};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use bytemuck::{Pod, Zeroable};
use log::debug;

use crate::error::{check_len, SliceLengthError};
use crate::number_traits::{Float, One, Zero};

pub type Vector2f = Vector2<f32>;
pub type Vector3f = Vector3<f32>;
pub type Vector4f = Vector4<f32>;

/// Inner product, shared by every vector arity so [`dot`] can be called on
/// any of them.
pub trait Dot {
    type Scalar;

    fn dot(&self, other: &Self) -> Self::Scalar;
}

macro_rules! struct_vec {
    ($name:ident : $display_fmt:literal, $n:literal, ($($dim:ident : $TY:ty => $idx:tt,)*)) => {
        #[must_use]
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(C)]
        pub struct $name<T = f32> {
            $(pub $dim: T,)*
        }

        unsafe impl<T: Zeroable> Zeroable for $name<T> {}
        unsafe impl<T: Pod> Pod for $name<T> {}

        impl<T> $name<T> {
            pub const fn new($($dim: T),*) -> Self {
                Self {
                    $($dim),*
                }
            }

            pub fn set(&mut self, $($dim: T),*) {
                $(self.$dim = $dim;)*
            }
        }

        impl<T> $name<T>
        where
            T: Copy,
        {
            /// Component `i`, in constructor order. Panics when `i` is out of
            /// range, as indexing does.
            pub fn get(&self, i: usize) -> T {
                self[i]
            }

            /// Overwrites every component with the leading scalars of `slice`.
            /// The vector is left untouched when the slice is too short.
            pub fn set_from_slice(&mut self, slice: &[T]) -> Result<(), SliceLengthError> {
                *self = Self::try_from(slice)?;
                Ok(())
            }
        }

        impl<T> $name<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            pub fn dot(&self, other: &Self) -> T {
                let mut dot = T::zero();
                $(dot = dot + self.$dim * other.$dim;)*
                dot
            }
        }

        impl<T> Dot for $name<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            type Scalar = T;

            fn dot(&self, other: &Self) -> T {
                $name::dot(self, other)
            }
        }

        impl<T> $name<T>
        where T: Float {
            /// Euclidean length.
            pub fn norm(&self) -> T {
                let mut norm = T::zero();
                $(norm += self.$dim * self.$dim;)*
                norm.sqrt()
            }

            /// Divides every component by [`Self::norm`]. A zero-length vector
            /// ends up with `NaN` components.
            pub fn normalize(&mut self) {
                let norm = self.norm();
                if norm.is_zero() {
                    debug!("Normalizing a zero-length {}", stringify!($name));
                }
                $(self.$dim /= norm;)*
            }

            pub fn normalized(&self) -> Self {
                let mut normalized = *self;
                normalized.normalize();
                normalized
            }
        }

        impl<T> $name<T>
        where
            T: Pod,
        {
            /// The components as a contiguous run of scalars, in constructor
            /// order.
            pub fn as_slice(&self) -> &[T] {
                bytemuck::cast_slice(std::slice::from_ref(self))
            }

            pub fn as_mut_slice(&mut self) -> &mut [T] {
                bytemuck::cast_slice_mut(std::slice::from_mut(self))
            }
        }

        impl<T> Add for $name<T>
        where
            T: Copy + Add<Output = T>, {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self {
                    $($dim: self.$dim + rhs.$dim),*
                }
            }
        }

        impl<T> AddAssign for $name<T>
        where
            T: Copy + Add<Output = T>, {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T> Sub for $name<T>
        where
            T: Copy + Sub<Output = T>, {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self {
                    $($dim: self.$dim - rhs.$dim),*
                }
            }
        }

        impl<T> SubAssign for $name<T>
        where
            T: Copy + Sub<Output = T>, {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<T> Mul<T> for $name<T>
        where
            T: Copy + Mul<Output = T>, {
            type Output = Self;

            fn mul(self, rhs: T) -> Self::Output {
                Self {
                    $($dim: self.$dim * rhs),*
                }
            }
        }

        impl<T> MulAssign<T> for $name<T>
        where
            T: Copy + Mul<Output = T>, {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }

        impl<T> Div<T> for $name<T>
        where
            T: Copy + Div<Output = T>, {
            type Output = Self;

            fn div(self, rhs: T) -> Self::Output {
                Self {
                    $($dim: self.$dim / rhs),*
                }
            }
        }

        impl<T> DivAssign<T> for $name<T>
        where
            T: Copy + Div<Output = T>, {
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }

        impl<T> Neg for $name<T>
        where
            T: Copy + Neg<Output = T>,
        {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self {
                    $($dim: -self.$dim),*
                }
            }
        }

        impl<T> Index<usize> for $name<T> {
            type Output = T;

            fn index(&self, index: usize) -> &Self::Output {
                match index {
                    $($idx => &self.$dim,)*
                    _ => panic!(
                        "index out of bounds: {} has {} components but the index is {index}",
                        stringify!($name),
                        $n
                    ),
                }
            }
        }

        impl<T> IndexMut<usize> for $name<T> {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                match index {
                    $($idx => &mut self.$dim,)*
                    _ => panic!(
                        "index out of bounds: {} has {} components but the index is {index}",
                        stringify!($name),
                        $n
                    ),
                }
            }
        }

        impl<T> Display for $name<T>
        where
            T: Display,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, $display_fmt, $(self.$dim),*)
            }
        }

        impl<T> From<($($TY),*)> for $name<T>
        where
            T: Copy {
            fn from(tuple: ($($TY),*)) -> Self {
                Self {
                    $($dim: tuple.$idx),*
                }
            }
        }

        impl<T> From<$name<T>> for ($($TY),*)
        where
            T: Copy,
        {
            fn from(vector: $name<T>) -> Self {
                ($(vector.$dim),*)
            }
        }

        impl<T> From<[T; $n]> for $name<T>
        where
            T: Copy,
        {
            fn from(value: [T; $n]) -> Self {
                Self {
                    $($dim: value[$idx]),*
                }
            }
        }

        impl<T> From<$name<T>> for [T; $n] {
            fn from(value: $name<T>) -> Self {
                [$(value.$dim),*]
            }
        }

        impl<'a, T> TryFrom<&'a [T]> for $name<T>
        where
            T: Copy,
        {
            type Error = SliceLengthError;

            /// Reads the first components from `slice`, ignoring any extra
            /// scalars.
            fn try_from(slice: &'a [T]) -> Result<Self, Self::Error> {
                check_len(slice, $n)?;
                Ok(Self {
                    $($dim: slice[$idx]),*
                })
            }
        }
    };
}

struct_vec!(Vector2: "({}, {})", 2, (x: T => 0, y: T => 1,));
struct_vec!(Vector3: "({}, {}, {})", 3, (x: T => 0, y: T => 1, z: T => 2,));
struct_vec!(Vector4: "({}, {}, {}, {})", 4, (x: T => 0, y: T => 1, z: T => 2, w: T => 3,));

macro_rules! impl_scalar_lhs_mul {
    ($($name:ident),*) => {
        $(
            impl Mul<$name<f32>> for f32 {
                type Output = $name<f32>;

                fn mul(self, rhs: $name<f32>) -> Self::Output {
                    rhs * self
                }
            }

            impl Mul<$name<f64>> for f64 {
                type Output = $name<f64>;

                fn mul(self, rhs: $name<f64>) -> Self::Output {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(Vector2, Vector3, Vector4);

pub fn dot<V: Dot>(a: &V, b: &V) -> V::Scalar {
    a.dot(b)
}

/// Right-handed cross product, `a × b`.
pub fn cross<T>(a: &Vector3<T>, b: &Vector3<T>) -> Vector3<T>
where
    T: Copy + Sub<Output = T> + Mul<Output = T>,
{
    a.cross(b)
}

impl<T> Vector2<T>
where
    T: Copy,
{
    pub fn fill(n: T) -> Self {
        Self::new(n, n)
    }
}

impl<T> Default for Vector2<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T> Vector3<T>
where
    T: Copy,
{
    pub fn fill(n: T) -> Self {
        Self::new(n, n, n)
    }

    pub fn from_vector2(v: Vector2<T>, z: T) -> Self {
        Self::new(v.x, v.y, z)
    }

    pub fn cross(&self, other: &Vector3<T>) -> Vector3<T>
    where
        T: Sub<Output = T> + Mul<Output = T>,
    {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl<T> Default for Vector3<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T> Vector4<T>
where
    T: Copy,
{
    /// `(n, n, n, 1)`: the fill never touches the homogeneous coordinate.
    pub fn fill(n: T) -> Self
    where
        T: One,
    {
        Self::new(n, n, n, T::one())
    }

    pub fn point(x: T, y: T, z: T) -> Self
    where
        T: One,
    {
        Self::new(x, y, z, T::one())
    }

    pub fn direction(x: T, y: T, z: T) -> Self
    where
        T: Zero,
    {
        Self::new(x, y, z, T::zero())
    }

    pub fn from_vector2(v: Vector2<T>, z: T, w: T) -> Self {
        Self::new(v.x, v.y, z, w)
    }

    pub fn from_vector3(v: Vector3<T>, w: T) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }
}

impl<T> Default for Vector4<T>
where
    T: Zero + One,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }
}

impl<T> From<Vector3<T>> for Vector2<T> {
    fn from(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Perspective divide of `x` and `y`.
impl<T> From<Vector4<T>> for Vector2<T>
where
    T: Copy + Div<Output = T>,
{
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.x / v.w, v.y / v.w)
    }
}

impl<T> From<Vector2<T>> for Vector3<T>
where
    T: Copy + Zero,
{
    fn from(v: Vector2<T>) -> Self {
        Self::from_vector2(v, T::zero())
    }
}

/// Perspective divide, `(x / w, y / w, z / w)`.
impl<T> From<Vector4<T>> for Vector3<T>
where
    T: Copy + Div<Output = T>,
{
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.x / v.w, v.y / v.w, v.z / v.w)
    }
}

impl<T> From<Vector2<T>> for Vector4<T>
where
    T: Copy + Zero + One,
{
    fn from(v: Vector2<T>) -> Self {
        Self::from_vector2(v, T::zero(), T::one())
    }
}

impl<T> From<Vector3<T>> for Vector4<T>
where
    T: Copy + One,
{
    fn from(v: Vector3<T>) -> Self {
        Self::from_vector3(v, T::one())
    }
}
