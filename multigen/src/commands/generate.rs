use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use multigen_manifest::{ManifestFile, Model};

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to multigen.toml
    #[arg(short, long, default_value = "multigen.toml")]
    pub config: PathBuf,

    /// Path to the model file
    #[arg(short, long, default_value = "model.toml")]
    pub model: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// List the files that would be generated without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = ManifestFile::open(&self.config).unwrap_or_exit();
        let model = Model::from_file(&self.model).unwrap_or_exit();

        let report = ops::generate(
            &manifest,
            &model,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
