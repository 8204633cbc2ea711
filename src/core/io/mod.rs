mod market;

pub use market::*;

pub mod write;
pub use write::*;
