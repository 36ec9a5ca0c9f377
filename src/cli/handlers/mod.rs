pub mod check;
pub mod config;
pub mod link;
pub mod status;

pub use check::*;
pub use config::*;
pub use link::*;
pub use status::*;
