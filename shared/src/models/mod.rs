pub mod character;
pub mod session;
pub mod video;

pub use character::*;
pub use session::*;
pub use video::*;
