#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Fixed-size vectors, square matrices and quaternions over a generic scalar.

pub mod error;
pub mod matrix;
pub mod number_traits;
pub mod quaternion;
pub mod vector;
