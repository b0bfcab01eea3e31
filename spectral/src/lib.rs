pub mod analysis;
pub mod data;
pub mod error;
pub mod figure;
pub mod grid;
pub mod math;
pub mod synth;
pub mod utils;

pub use analysis::*;
pub use data::*;
pub use error::*;
pub use figure::*;
pub use grid::*;
pub use math::*;
pub use synth::*;
pub use utils::*;
