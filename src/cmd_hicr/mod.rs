//! Subcommand modules for the `hicr` binary.

pub mod anchor;
pub mod cluster;
pub mod confidence;
