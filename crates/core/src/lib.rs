#![forbid(unsafe_code)]

pub mod data;
pub mod math;
pub mod model;
pub mod random;

pub use data::*;
pub use math::*;
pub use model::*;
