#![warn(clippy::pedantic)]

pub use tessera_math as math;

pub mod prelude {
    pub use tessera_math::matrix::{Identity, Matrix3, Matrix3f, Matrix4, Matrix4f};
    pub use tessera_math::quaternion::Quaternion;
    pub use tessera_math::vector::{
        cross, dot, Vector2, Vector2f, Vector3, Vector3f, Vector4, Vector4f,
    };
}
