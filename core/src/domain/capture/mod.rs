pub mod entities;
pub mod ports;
pub mod session;

pub use entities::*;
pub use ports::*;
pub use session::*;
