pub mod characters;
pub mod session;
pub mod videos;

pub use characters::*;
pub use session::*;
pub use videos::*;
