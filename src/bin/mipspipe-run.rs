use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mipspipe_rs::{analyze, report::render_text, HazardScheduler, LineDecoder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Analyze data-hazard stalls in a straight-line assembly block"
)]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "ASMFILE")]
    input: String,
    /// Report title (defaults to the input path)
    #[arg(long)]
    title: Option<String>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let source = std::fs::read_to_string(&opts.input)?;

    let dec = LineDecoder::new();
    let mut sched = HazardScheduler::new();
    let analysis = analyze(&dec, &mut sched, &source);

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis)?;
            if let Some(path) = opts.out {
                std::fs::write(path, json)?;
            } else {
                println!("{json}");
            }
        }
        OutputFormat::Text => {
            let title = opts.title.as_deref().unwrap_or(&opts.input);
            let text = render_text(title, &analysis);
            if let Some(path) = opts.out {
                std::fs::write(path, text)?;
            } else {
                print!("{text}");
            }
        }
    }

    Ok(())
}
