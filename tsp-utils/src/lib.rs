mod input;
pub use input::*;
mod json;
pub use json::*;
