//! CLI entry point: reads two files, diffs them under the flags given, and
//! prints the result, exiting 1 when a difference is found or an error
//! occurs.

use clap::Parser;

use linediff::cli::Args;
use linediff::file_diff;

fn main() {
    #[cfg(debug_assertions)]
    {
        tracing::subscriber::set_global_default(tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).finish())
            .unwrap();
    }

    std::process::exit(run());
}

fn run() -> i32 {
    let args = Args::parse();
    tracing::debug!(?args, "parsed CLI arguments");

    match run_diff(&args) {
        Ok(output) => {
            if output.contains("Maximum loop count reached") {
                tracing::warn!("resync loop hit max_diff_chunk_length, output was truncated");
            }
            if output.is_empty() {
                0
            } else {
                print!("{output}");
                1
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn run_diff(args: &Args) -> linediff::DiffResult<String> {
    let options = args.to_options()?;
    let (lhs, rhs) = args.read_artefacts()?;
    tracing::info!(lhs = %lhs.name, lhs_bytes = lhs.data.len(), "read left file");
    tracing::info!(rhs = %rhs.name, rhs_bytes = rhs.data.len(), "read right file");
    file_diff(&lhs, &rhs, &options)
}
