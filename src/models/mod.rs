pub mod change_clothes;
pub mod common;
pub mod generation;

pub use change_clothes::*;
pub use common::*;
pub use generation::*;
