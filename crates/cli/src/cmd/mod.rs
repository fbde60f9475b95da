//! Subcommands of the `hoku` binary.

pub mod config;
pub mod layouts;
pub mod remappings;
pub mod resolve;

/// Common trait for all cli commands
pub trait Cmd: clap::Parser + Sized {
    type Output;
    fn run(self) -> eyre::Result<Self::Output>;
}
