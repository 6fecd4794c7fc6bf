pub mod amount;
pub mod registry;
pub mod structs;

pub use amount::{is_approved, to_base_units, to_display, to_display_exact};
pub use registry::TokenRegistry;
pub use structs::TokenSpec;
