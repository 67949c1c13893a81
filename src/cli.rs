//! CLI to generate taginfo project files.
use clap::Parser;
use clap_stdin::{FileOrStdin, FileOrStdout};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Imposm mapping file, or `-` for stdin.
    pub mapping_file: FileOrStdin,
    /// Output file, or `-` for stdout.
    #[arg(default_value = "-")]
    pub output: FileOrStdout,
}
