//! CLI command implementations
//!
//! Each submodule implements one or two `quant` subcommands. Every command
//! builds a report value first and prints it second, so the reports can be
//! tested without capturing stdout.

pub mod auction;
pub mod binomial;
pub mod bond;
pub mod check;
pub mod mc;
pub mod option;
pub mod var;
