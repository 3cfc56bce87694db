use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tabularize::Tabularizer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Tabularize benchmark CSV logs with '# key: value' sticky lines and '# col, col' headers"
)]
struct Args {
    /// Input file; reads standard input when omitted
    input: Option<PathBuf>,

    /// Output file; writes standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so the CSV on stdout stays clean.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut tab = Tabularizer::new();
    match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening input {}", path.display()))?;
            tab.read_from(BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            tab.read_from(stdin.lock())?;
        }
    }
    debug!(
        fields = tab.fields().len(),
        records = tab.records().len(),
        "input consumed"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            tab.write_table(&mut writer)?;
            writer.flush().context("flushing output file")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            tab.write_table(&mut writer)?;
            writer.flush().context("flushing stdout")?;
        }
    }

    Ok(())
}
