use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trenzar::{cli::Cli, export, formatter, trace::Trace};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let trace = Trace::from_file(&args.trace)?;
    let records = formatter::format_trace(&trace);

    match &args.output {
        Some(path) => {
            export::write_documents_to_file(path, &records, args.compact)?;
            eprintln!(
                "[trenzar: wrote {} path record(s) to {}]",
                records.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            export::write_documents(&mut stdout, &records, args.compact)?;
        }
    }

    Ok(())
}
