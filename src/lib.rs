// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # lookupgen — parameter combination lookup tables
//!
//! Define named parameters with lists of possible values, constrain them
//! with "if … then …" mapping rules, and get every valid combination as a
//! lookup table.
//!
//! ## Quick Start
//!
//! ```rust
//! use lookupgen::{Condition, Consequence, ParameterType, Session, Unit};
//!
//! let mut session = Session::new();
//! let size = session.add_parameter("Size", ParameterType::Other, Unit::General)?.id.clone();
//! let color = session.add_parameter("Color", ParameterType::Other, Unit::General)?.id.clone();
//! for v in ["Small", "Large"] {
//!     session.add_value(&size, v)?;
//! }
//! for v in ["Red", "Blue"] {
//!     session.add_value(&color, v)?;
//! }
//!
//! // If Size = Large then Color must equal Blue
//! let rule = session.add_rule().id().to_string();
//! session.push_condition(&rule, Condition::equals(&size, "Large"))?;
//! session.push_consequence(&rule, Consequence::equals(&color, "Blue"))?;
//! session.apply_rule(&rule)?;
//!
//! let table = session.lookup_table();
//! assert_eq!(
//!     table.to_csv(),
//!     "Description,Size##OTHER##GENERAL,Color##OTHER##GENERAL\n\
//!      Row_1,Small,Red\n\
//!      Row_2,Small,Blue\n\
//!      Row_3,Large,Blue"
//! );
//! # Ok::<(), lookupgen::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │  Session (parameters + mapping rules)                        │
//! │       │                                                      │
//! │       ├──► value_lists() ──► generate() ──► candidate rows   │
//! │       │                                         │            │
//! │       ├──► index() ─────────────► filter(rows, index, rules) │
//! │       │                                         │            │
//! │       └──► lookup_table() ◄──────────── surviving rows       │
//! │                 │                                            │
//! │                 ├──► to_csv() / to_json() / to_text()        │
//! │                                                              │
//! │  Configuration ◄──► JSON document (import / export)          │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The generator and the engine are plain functions and can be used without
//! a `Session`, as long as the value lists and the index come from the same
//! parameter order.

pub mod combination;
pub mod config;
pub mod engine;
pub mod error;
pub mod parameter;
pub mod rule;
pub mod session;
pub mod table;

// Re-exports
pub use combination::{
    build_index, combinations, generate, product_size, Combination, Combinations, ParameterIndex,
};
pub use config::{Configuration, CONFIG_VERSION};
pub use engine::{
    evaluate_condition, evaluate_consequence, filter, is_structurally_valid, row_satisfies_rules,
    RuleEngine,
};
pub use error::{Error, Result};
pub use parameter::{Parameter, ParameterType, Unit};
pub use rule::{Clause, ClauseEdit, Condition, Consequence, MappingRule, Operator, RuleStatus};
pub use session::Session;
pub use table::{LookupTable, TableRow, DEFAULT_TABLE_FILE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
