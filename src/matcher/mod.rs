mod color;
mod rank;
mod score;

pub mod constants;

pub use color::*;
pub use rank::*;
pub use score::*;
