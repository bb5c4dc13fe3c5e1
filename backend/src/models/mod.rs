pub mod condition;
pub mod error;
pub mod pet;

pub use condition::*;
pub use error::*;
pub use pet::*;
