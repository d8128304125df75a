pub mod drag;
pub mod session;
pub mod status_ops;
pub mod validate;
