//! Cadena CLI - compiles chain descriptions into headers, sources, and
//! topology diagrams.

mod compile;

use std::path::PathBuf;

use cadena_codegen::Artifact;
use clap::Parser;

#[derive(Parser)]
#[command(name = "cadena")]
#[command(author, version, about = "Compile chain descriptions into generated artifacts", long_about = None)]
struct Cli {
    /// Chain description files (.toml or .json)
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Emit the header artifact
    #[arg(long)]
    header: bool,

    /// Emit the source artifact
    #[arg(long)]
    source: bool,

    /// Emit the topology diagram artifact
    #[arg(long)]
    diagram: bool,

    /// Write artifacts to files named after the chain instead of stdout
    #[arg(long)]
    file: bool,

    /// Destination folder for --file output; relative paths resolve against
    /// each input file's directory. Defaults to the input file's directory.
    #[arg(long, value_name = "DIR")]
    output_folder: Option<PathBuf>,
}

impl Cli {
    fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = Vec::new();
        if self.header {
            artifacts.push(Artifact::Header);
        }
        if self.source {
            artifacts.push(Artifact::Source);
        }
        if self.diagram {
            artifacts.push(Artifact::Diagram);
        }
        artifacts
    }
}

fn main() {
    // Artifacts print to stdout in the default mode; logs stay on stderr.
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let artifacts = cli.artifacts();
    if artifacts.is_empty() {
        tracing::warn!("no artifacts selected; pass --header, --source, or --diagram");
    }

    // Each input is an independent compilation unit: a failing chain is
    // reported and skipped, its siblings still compile.
    let mut failed = 0_usize;
    for input in &cli.inputs {
        if let Err(error) =
            compile::compile_file(input, &artifacts, cli.file, cli.output_folder.as_deref())
        {
            tracing::error!(file = %input.display(), "chain compilation failed: {error:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        std::process::exit(2);
    }
}
