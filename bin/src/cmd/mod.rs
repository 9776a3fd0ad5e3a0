//! CLI subcommand modules.
//!
//! This module contains the implementations for all paraty CLI subcommands.

pub(crate) mod fetch;
pub(crate) mod methods;
pub(crate) mod rank;
pub(crate) mod sectors;
pub(crate) mod weights;
