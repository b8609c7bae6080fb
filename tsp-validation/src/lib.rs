pub mod distance;
pub use distance::*;
pub mod error;
pub use error::*;
pub mod instance;
pub use instance::*;
pub mod solution_log;
pub use solution_log::*;
pub mod verifier;
pub use verifier::*;

pub use tsp_structs::{config::*, core::*};
