use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docx_quote_json::discover::{self, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use docx_quote_json::{Error, JsonFormat};

#[derive(Parser)]
#[command(name = "docx-quote-json", version)]
#[command(about = "Extract paragraphs and tables from a .docx quote into JSON")]
struct Cli {
    /// Input .docx (default: newest .docx in --input-dir)
    input: Option<PathBuf>,

    /// Output .json (default: <output-dir>/<input name>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let input = discover::resolve_input(cli.input.as_deref(), &cli.input_dir)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| discover::default_output_path(&input, &cli.output_dir));
    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let doc = docx_quote_json::extract_docx(&input)?;
    docx_quote_json::write_json(&doc, &output, format)?;

    println!("Wrote {}", output.display());
    println!("  paragraphs: {}", doc.paragraphs.len());
    println!("  tables: {}", doc.tables.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
