use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use multigen_manifest::ManifestFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to multigen.toml
    #[arg(short, long, default_value = "multigen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = ManifestFile::open(&self.config).unwrap_or_exit();

        let report = ops::check(&manifest);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
