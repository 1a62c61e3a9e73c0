pub mod entities;
pub mod extraction;
pub mod fallback;
pub mod ports;
pub mod services;

pub use entities::*;
pub use ports::*;
