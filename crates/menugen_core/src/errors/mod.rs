mod generation_error;
mod hook_error;
mod store_error;

pub use generation_error::*;
pub use hook_error::*;
pub use store_error::*;
