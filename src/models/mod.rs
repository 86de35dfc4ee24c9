pub mod room;

pub use room::*;
