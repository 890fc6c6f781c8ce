//! # beam_cli
//!
//! Presentation helpers for the `beam` command-line tool.

pub mod labels;
