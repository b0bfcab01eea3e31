pub use export::*;
pub use logger::*;
pub use plot::*;

pub mod export;
pub mod logger;
pub mod plot;
