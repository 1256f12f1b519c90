//! Commands run by the CLI

pub mod assets;
pub mod build;
pub mod clean;
pub mod generate;
pub mod init;
pub mod render;
