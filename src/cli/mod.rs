//! CLI command implementations
//!
//! - `table`: generate and preview the lookup table
//! - `rules`: mapping rule status
//! - `schema`: JSON schemas
//! - `util`: shared argument and output helpers

pub mod rules;
pub mod schema;
pub mod table;
pub mod util;

pub use rules::cmd_rules;
pub use schema::cmd_schema;
pub use table::{cmd_generate, cmd_preview};
