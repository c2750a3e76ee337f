use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::error;
use orthoscan::prelude::*;
use orthoscan::utils::n_threads;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    /// Query genome assembly (FASTA path or URL)
    query_assembly: String,

    /// Query gene annotation (GFF path or URL)
    query_annotation: String,

    /// Target genome assembly (FASTA path or URL)
    target_assembly: String,

    /// Target gene annotation (GFF path or URL)
    target_annotation: String,

    /// Job identifier scoping temporary artifacts; must be unique per
    /// concurrent invocation
    job_id: String,

    /// Worker threads for the alignment engine (default: logical CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Wall-clock limit per alignment-engine invocation, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match run(&cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("job {} failed: {err}", cli.job_id);
            println!(
                "{}",
                serde_json::json!({ "error": err.to_string() })
            );
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let engine = BlastCli::new(cli.timeout_secs.map(Duration::from_secs));
    let pipeline =
        Pipeline::new(&engine, cli.threads.unwrap_or_else(n_threads));

    let inputs = PipelineInputs {
        query_assembly:    cli.query_assembly.clone(),
        query_annotation:  cli.query_annotation.clone(),
        target_assembly:   cli.target_assembly.clone(),
        target_annotation: cli.target_annotation.clone(),
        job_id:            cli.job_id.clone(),
    };

    let report = match pipeline.run(&inputs)? {
        Some(hit) => serde_json::to_string(&hit)?,
        None => serde_json::json!({ "top_hit": null }).to_string(),
    };
    Ok(report)
}
