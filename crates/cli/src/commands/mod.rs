pub mod config;
pub mod expand;
pub mod generate;
pub mod modules;
pub mod util;
pub mod verify;

pub use config::*;
pub use expand::*;
pub use generate::*;
pub use modules::*;
pub use util::*;
pub use verify::*;
