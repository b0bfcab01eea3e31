pub use fft::*;
pub use statistics::*;

pub mod fft;
pub mod statistics;
