use std::fmt::{Debug, Display, Formatter};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use bytemuck::{Pod, Zeroable};

use crate::error::{check_len, SliceLengthError};
use crate::number_traits::{One, Zero};
use crate::vector::{Vector3, Vector4};

pub type Matrix3f = Matrix3<f32>;
pub type Matrix4f = Matrix4<f32>;

pub trait Identity {
    fn identity() -> Self;
}

/// Square matrices stored row-major: element `(i, k)` lives at `i * size + k`.
///
/// `m[i]` is row `i` as a slice, so `m[i][k]` reads element `(i, k)`.
/// Vectors multiply as columns on the right (`m * v`) or as rows on the left
/// (`v * m`).
macro_rules! struct_mat {
    ($name:ident, $vec:ident, $n:literal, $len:literal) => {
        #[must_use]
        #[derive(Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name<T = f32> {
            values: [T; $len],
        }

        unsafe impl<T: Zeroable> Zeroable for $name<T> {}
        unsafe impl<T: Pod> Pod for $name<T> {}

        impl<T> Debug for $name<T>
        where
            T: Display,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                writeln!(f, "[")?;
                for i in 0..Self::ROWS {
                    write!(f, "\t")?;
                    for k in 0..Self::COLS {
                        write!(f, "{}, ", self.values[i * Self::COLS + k])?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "]")
            }
        }

        impl<T> Display for $name<T>
        where
            T: Display,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "(")?;
                for (i, value) in self.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
        }

        impl<T> $name<T> {
            const COLS: usize = $n;
            const ROWS: usize = $n;

            /// Builds the matrix from its elements listed row by row.
            pub const fn with_values(values: [T; $len]) -> Self {
                Self { values }
            }

            pub fn as_slice(&self) -> &[T] {
                &self.values
            }

            pub fn as_mut_slice(&mut self) -> &mut [T] {
                &mut self.values
            }

            pub fn get_mut(&mut self, i: usize, k: usize) -> &mut T {
                &mut self.values[i * Self::COLS + k]
            }

            /// Replaces every element, listed row by row.
            pub fn set_values(&mut self, values: [T; $len]) {
                self.values = values;
            }
        }

        impl<T> $name<T>
        where
            T: Copy,
        {
            pub fn fill(n: T) -> Self {
                Self { values: [n; $len] }
            }

            pub fn get(&self, i: usize, k: usize) -> T {
                self.values[i * Self::COLS + k]
            }

            pub fn set(&mut self, i: usize, k: usize, value: T) {
                self.values[i * Self::COLS + k] = value;
            }

            /// Overwrites the elements with the leading scalars of `slice`, row
            /// by row. The matrix is left untouched when the slice is too short.
            pub fn set_from_slice(&mut self, slice: &[T]) -> Result<(), SliceLengthError> {
                check_len(slice, $len)?;
                self.values.copy_from_slice(&slice[..$len]);
                Ok(())
            }

            pub fn row(&self, i: usize) -> $vec<T> {
                $vec::from(std::array::from_fn::<T, $n, _>(|k| self.get(i, k)))
            }

            pub fn set_row(&mut self, i: usize, row: $vec<T>) {
                let row: [T; $n] = row.into();
                self[i].copy_from_slice(&row);
            }

            /// Swaps the upper triangle with the lower one in place.
            pub fn transpose(&mut self) {
                for i in 0..Self::ROWS {
                    for k in (i + 1)..Self::COLS {
                        self.values.swap(i * Self::COLS + k, k * Self::COLS + i);
                    }
                }
            }

            pub fn transposed(&self) -> Self {
                let mut transposed = *self;
                transposed.transpose();
                transposed
            }
        }

        impl<T> $name<T>
        where
            T: Zero + One,
        {
            pub fn set_identity(&mut self) {
                for i in 0..Self::ROWS {
                    for k in 0..Self::COLS {
                        self.values[i * Self::COLS + k] = if i == k { T::one() } else { T::zero() };
                    }
                }
            }
        }

        impl<T> Identity for $name<T>
        where
            T: Copy + Zero + One,
        {
            fn identity() -> Self {
                let mut identity = Self::fill(T::zero());
                identity.set_identity();
                identity
            }
        }

        impl<T> Default for $name<T>
        where
            T: Copy + Zero + One,
        {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl<T> Add for $name<T>
        where
            T: Copy + Add<Output = T>,
        {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self {
                    values: std::array::from_fn(|i| self.values[i] + rhs.values[i]),
                }
            }
        }

        impl<T> AddAssign for $name<T>
        where
            T: Copy + Add<Output = T>,
        {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T> Sub for $name<T>
        where
            T: Copy + Sub<Output = T>,
        {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self {
                    values: std::array::from_fn(|i| self.values[i] - rhs.values[i]),
                }
            }
        }

        impl<T> SubAssign for $name<T>
        where
            T: Copy + Sub<Output = T>,
        {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<T> Neg for $name<T>
        where
            T: Copy + Neg<Output = T>,
        {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self {
                    values: self.values.map(|value| -value),
                }
            }
        }

        impl<T> Mul<T> for $name<T>
        where
            T: Copy + Mul<Output = T>,
        {
            type Output = Self;

            fn mul(self, rhs: T) -> Self::Output {
                Self {
                    values: self.values.map(|value| value * rhs),
                }
            }
        }

        impl<T> MulAssign<T> for $name<T>
        where
            T: Copy + Mul<Output = T>,
        {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }

        impl<T> Div<T> for $name<T>
        where
            T: Copy + Div<Output = T>,
        {
            type Output = Self;

            fn div(self, rhs: T) -> Self::Output {
                Self {
                    values: self.values.map(|value| value / rhs),
                }
            }
        }

        impl<T> DivAssign<T> for $name<T>
        where
            T: Copy + Div<Output = T>,
        {
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }

        impl<T> Mul<Self> for $name<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self::Output {
                let mut values = [T::zero(); $len];

                for i in 0..Self::ROWS {
                    for k in 0..Self::COLS {
                        let mut sum = T::zero();
                        for r in 0..Self::COLS {
                            sum = sum + self.values[i * Self::COLS + r] * rhs.values[r * Self::COLS + k];
                        }
                        values[i * Self::COLS + k] = sum;
                    }
                }

                Self { values }
            }
        }

        impl<T> MulAssign<Self> for $name<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        /// Column convention: `result[i] = Σ m[i][r] · v[r]`.
        impl<T> Mul<$vec<T>> for $name<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            type Output = $vec<T>;

            fn mul(self, rhs: $vec<T>) -> Self::Output {
                $vec::from(std::array::from_fn::<T, $n, _>(|i| {
                    let mut sum = T::zero();
                    for r in 0..$n {
                        sum = sum + self.get(i, r) * rhs[r];
                    }
                    sum
                }))
            }
        }

        /// Row convention: `result[i] = Σ v[r] · m[r][i]`.
        impl<T> Mul<$name<T>> for $vec<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            type Output = $vec<T>;

            fn mul(self, rhs: $name<T>) -> Self::Output {
                $vec::from(std::array::from_fn::<T, $n, _>(|i| {
                    let mut sum = T::zero();
                    for r in 0..$n {
                        sum = sum + self[r] * rhs.get(r, i);
                    }
                    sum
                }))
            }
        }

        impl<T> MulAssign<$name<T>> for $vec<T>
        where
            T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
        {
            fn mul_assign(&mut self, rhs: $name<T>) {
                *self = *self * rhs;
            }
        }

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

        impl<T> Index<usize> for $name<T> {
            type Output = [T];

            fn index(&self, index: usize) -> &Self::Output {
                &self.values[index * Self::COLS..(index + 1) * Self::COLS]
            }
        }

        impl<T> IndexMut<usize> for $name<T> {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.values[index * Self::COLS..(index + 1) * Self::COLS]
            }
        }

        impl<T> From<[T; $len]> for $name<T> {
            fn from(values: [T; $len]) -> Self {
                Self::with_values(values)
            }
        }

        impl<T> From<[[T; $n]; $n]> for $name<T>
        where
            T: Copy,
        {
            fn from(rows: [[T; $n]; $n]) -> Self {
                Self {
                    values: std::array::from_fn(|i| rows[i / $n][i % $n]),
                }
            }
        }

        impl<T> From<$name<T>> for [[T; $n]; $n]
        where
            T: Copy,
        {
            fn from(matrix: $name<T>) -> Self {
                std::array::from_fn(|i| std::array::from_fn(|k| matrix.get(i, k)))
            }
        }

        impl<'a, T> TryFrom<&'a [T]> for $name<T>
        where
            T: Copy,
        {
            type Error = SliceLengthError;

            fn try_from(slice: &'a [T]) -> Result<Self, Self::Error> {
                check_len(slice, $len)?;
                Ok(Self {
                    values: std::array::from_fn(|i| slice[i]),
                })
            }
        }
    };
}

struct_mat!(Matrix3, Vector3, 3, 9);
struct_mat!(Matrix4, Vector4, 4, 16);

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    fn sample_matrix3() -> Matrix3<i32> {
        Matrix3::with_values([
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ])
    }

    #[test]
    fn identity() {
        let m = Matrix4::<i32>::identity();

        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    assert_eq!(m[i][j], 1);
                } else {
                    assert_eq!(m[i][j], 0);
                }
            }
        }
    }

    #[test]
    #[rustfmt::skip]
    fn default_is_identity() {
        assert_eq!(
            Matrix4f::default(),
            Matrix4f::with_values([
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ])
        );
        assert_eq!(Matrix3::<f64>::default(), Matrix3::identity());
    }

    #[test]
    fn set_identity() {
        let mut m = Matrix3::fill(4);

        m.set_identity();

        assert_eq!(m, Matrix3::identity());
    }

    #[test]
    fn fill() {
        let m = Matrix3::fill(2.5);

        assert!(m.as_slice().iter().all(|&value| value == 2.5));
    }

    #[test]
    fn index_mut() {
        let mut m = Matrix4::<i32>::identity();
        m[3][2] = 5;

        assert_eq!(m[3][2], 5);
        assert_eq!(m.get(3, 2), 5);
        assert_eq!(m.as_slice()[14], 5);
    }

    #[test]
    fn index() {
        let m = Matrix4::<i32>::identity();

        assert_eq!(m[0][0], 1);
        assert_eq!(m[0][1], 0);
    }

    #[test]
    fn get_is_row_major() {
        let m = sample_matrix3();

        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.get(1, 0), 4);
        assert_eq!(m.get(2, 1), 8);
    }

    #[test]
    fn get_mut() {
        let mut m = sample_matrix3();

        *m.get_mut(1, 2) = 60;

        assert_eq!(m[1][2], 60);
    }

    #[test]
    fn row() {
        let m = sample_matrix3();

        assert_eq!(m.row(0), Vector3::new(1, 2, 3));
        assert_eq!(m.row(2), Vector3::new(7, 8, 9));
    }

    #[test]
    fn set_row() {
        let mut m = Matrix4::<i32>::identity();

        m.set_row(1, Vector4::new(5, 6, 7, 8));

        assert_eq!(m.row(1), Vector4::new(5, 6, 7, 8));
        assert_eq!(m.row(0), Vector4::new(1, 0, 0, 0));
    }

    #[rustfmt::skip]
    #[test]
    fn mul() {
        let a = Matrix4::<i32>::with_values([
            1, 2, 3, 4,
            5, 6, 7, 8,
            9, 39, 11, 12,
            13, 14, 15, 16
        ]);
        let b = Matrix4::<i32>::with_values([
            17, 18, 19, 20,
            21, 22, 23, 24,
            25, 26, 27, 28,
            29, 30, 31, 32
        ]);

        let result = a * b;

        assert_eq!(result[0][0], 250);
        assert_eq!(result[0][1], 260);
        assert_eq!(result[0][2], 270);
        assert_eq!(result[0][3], 280);
        assert_eq!(result[1][0], 618);
        assert_eq!(result[1][1], 644);
        assert_eq!(result[1][2], 670);
        assert_eq!(result[1][3], 696);
        assert_eq!(result[2][0], 1595);
        assert_eq!(result[2][1], 1666);
        assert_eq!(result[2][2], 1737);
        assert_eq!(result[2][3], 1808);
        assert_eq!(result[3][0], 1354);
        assert_eq!(result[3][1], 1412);
        assert_eq!(result[3][2], 1470);
        assert_eq!(result[3][3], 1528);
    }

    #[rustfmt::skip]
    #[test]
    fn mul_assign() {
        let mut a = sample_matrix3();
        let b = Matrix3::with_values([
            9, 8, 7,
            6, 5, 4,
            3, 2, 1,
        ]);

        a *= b;

        assert_eq!(a, Matrix3::with_values([
            30, 24, 18,
            84, 69, 54,
            138, 114, 90,
        ]));
    }

    #[test]
    fn identity_is_neutral_for_mul() {
        let m3 = sample_matrix3();
        let m4 = Matrix4::<f64>::from([
            [1.5, -2.0, 0.0, 4.0],
            [0.25, 3.0, 7.0, -1.0],
            [9.0, 0.0, 2.0, 2.0],
            [-6.0, 5.0, 1.0, 0.5],
        ]);

        assert_eq!(Matrix3::<i32>::identity() * m3, m3);
        assert_eq!(m3 * Matrix3::<i32>::identity(), m3);
        assert_eq!(Matrix4::<f64>::identity() * m4, m4);
        assert_eq!(m4 * Matrix4::<f64>::identity(), m4);
    }

    #[rustfmt::skip]
    #[test]
    fn transpose() {
        let mut m = sample_matrix3();

        m.transpose();

        assert_eq!(m, Matrix3::with_values([
            1, 4, 7,
            2, 5, 8,
            3, 6, 9,
        ]));
    }

    #[test]
    fn transpose_is_an_involution() {
        let m = Matrix4::with_values(std::array::from_fn(|i| i32::try_from(i).unwrap()));

        assert_eq!(m.transposed().transposed(), m);
        assert_ne!(m.transposed(), m);
        assert_eq!(m.transposed().get(1, 3), m.get(3, 1));
    }

    #[test]
    fn identity_times_its_transpose_is_identity() {
        let m = Matrix4f::default();

        assert_eq!(m * m.transposed(), Matrix4f::identity());
    }

    #[test]
    fn add_and_sub() {
        let a = sample_matrix3();
        let b = Matrix3::fill(1);

        assert_eq!((a + b).row(0), Vector3::new(2, 3, 4));
        assert_eq!(a + b - b, a);

        let mut c = a;
        c += a;
        c -= b;
        assert_eq!(c.row(2), Vector3::new(13, 15, 17));
    }

    #[test]
    fn scalar_mul_and_div() {
        let m = Matrix3::<f32>::identity();

        assert_eq!((m * 3.0).get(1, 1), 3.0);
        assert_eq!(2.0_f32 * m, m + m);
        assert_eq!((m * 4.0) / 2.0, m * 2.0);
        assert_eq!(-m, m * -1.0);
    }

    #[test]
    fn mul_vector_as_column() {
        let m = sample_matrix3();

        assert_eq!(m * Vector3::new(1, 2, 3), Vector3::new(14, 32, 50));
    }

    #[test]
    fn mul_vector_as_row() {
        let m = sample_matrix3();

        assert_eq!(Vector3::new(1, 2, 3) * m, Vector3::new(30, 36, 42));
    }

    #[rustfmt::skip]
    #[test]
    fn mul_vector4() {
        let m = Matrix4::<i32>::with_values([
            1, 0, 0, 5,
            0, 1, 0, 6,
            0, 0, 1, 7,
            0, 0, 0, 1,
        ]);
        let v = Vector4::new(1, 2, 3, 1);

        assert_eq!(m * v, Vector4::new(6, 8, 10, 1));
        assert_eq!(v * m, Vector4::new(1, 2, 3, 39));

        let mut row = v;
        row *= m;
        assert_eq!(row, v * m);
    }

    #[test]
    fn equality_is_element_wise() {
        let a = sample_matrix3();
        let mut b = a;

        assert_eq!(a, b);

        b[2][2] = 0;

        assert_ne!(a, b);
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", Matrix3::<i32>::identity()),
            "(1, 0, 0, 0, 1, 0, 0, 0, 1)"
        );
    }

    #[test]
    fn debug_prints_one_row_per_line() {
        let debug = format!("{:?}", sample_matrix3());

        assert_eq!(debug, "[\n\t1, 2, 3, \n\t4, 5, 6, \n\t7, 8, 9, \n]\n");
    }

    #[test]
    fn nested_array_conversions() {
        let rows: [[i32; 3]; 3] = sample_matrix3().into();

        assert_eq!(rows, [[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(Matrix3::from(rows), sample_matrix3());
    }

    #[test]
    fn try_from_slice() {
        let buffer: Vec<f32> = (0..16u8).map(f32::from).collect();

        let m = Matrix4::try_from(buffer.as_slice()).unwrap();

        assert_eq!(m.get(2, 3), 11.0);
        assert_eq!(m.as_slice(), buffer.as_slice());
        assert_eq!(
            Matrix3::try_from(&buffer[..8]),
            Err(SliceLengthError {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    #[rustfmt::skip]
    fn set_and_set_values() {
        let mut m = Matrix3::<i32>::identity();

        m.set(0, 2, 7);
        assert_eq!(m.get(0, 2), 7);
        assert_eq!(m[0], [1, 0, 7]);

        m.set_values([
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ]);
        assert_eq!(m, sample_matrix3());
    }

    #[test]
    fn set_from_slice() {
        let buffer: Vec<f64> = (0..20u8).map(f64::from).collect();
        let mut m = Matrix4::<f64>::identity();

        m.set_from_slice(&buffer).unwrap();

        assert_eq!(m.as_slice(), &buffer[..16]);
        assert_eq!(m.get(3, 0), 12.0);
    }

    #[test]
    fn set_from_short_slice_leaves_matrix_untouched() {
        let mut m = sample_matrix3();

        let error = m.set_from_slice(&[0; 4]).unwrap_err();

        assert_eq!(
            error,
            SliceLengthError {
                expected: 9,
                actual: 4
            }
        );
        assert_eq!(m, sample_matrix3());
    }

    #[test]
    fn flat_view_covers_every_element() {
        let mut m = Matrix4::<f32>::identity();

        m.as_mut_slice()[15] = 2.0;

        assert_eq!(m.as_slice().len(), 16);
        assert_eq!(m.as_mut_slice().len(), 16);
        assert_eq!(m.get(3, 3), 2.0);
        assert_eq!(Matrix3::<f32>::identity().as_slice().len(), 9);
    }

    #[test]
    fn cast_to_flat_scalars() {
        let matrices = [Matrix3f::identity(), Matrix3f::fill(2.0)];

        let flat: &[f32] = bytemuck::cast_slice(&matrices);

        assert_eq!(flat.len(), 18);
        assert_eq!(flat[4], 1.0);
        assert_eq!(flat[17], 2.0);
    }
}
