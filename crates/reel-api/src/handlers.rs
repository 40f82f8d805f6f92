//! Request handlers.

pub mod health;
pub mod jobs;
pub mod script;
pub mod upload;

pub use health::*;
pub use jobs::*;
pub use script::*;
pub use upload::*;
