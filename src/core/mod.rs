pub mod ballistics;
pub mod error;
pub mod sampler;
pub mod window;
