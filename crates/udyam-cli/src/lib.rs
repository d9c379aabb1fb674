//! # udyam-cli -- Udyam Registration Terminal Front-End
//!
//! A line-oriented renderer for the `udyam-flow` controller. The same
//! screens a web form would show are printed as text, and each prompt
//! fills one field.
//!
//! ## Subcommands
//!
//! - `register` -- walk through identity and tax verification
//! - `validate` -- check a single value against its field rule
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in their modules.
//! - No form rules here. Everything is delegated to `udyam-flow` and
//!   `udyam-core`.

pub mod register;
pub mod render;
pub mod validate;
