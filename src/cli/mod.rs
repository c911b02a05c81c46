//! CLI infrastructure for the fledge toolkit
//!
//! This module provides the command-line interface for solving, training,
//! and replaying runs of the game core.

pub mod commands;
pub mod output;
