mod export;
mod import;
mod preview;

pub use export::*;
pub use import::*;
pub use preview::*;
