pub mod board;
pub mod collection;
pub mod config;
pub mod status;
pub mod task;
pub mod template;

pub use board::*;
pub use collection::*;
pub use config::*;
pub use status::*;
pub use task::*;
pub use template::*;
