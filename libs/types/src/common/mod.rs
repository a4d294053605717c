//! Common value types shared by every calculator

pub mod errors;
pub mod fixed_point;
