use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use timeattack_common::RequestMethod;
use timeattack_worker::config::WorkerConfig;
use timeattack_worker::reducer::Reducer;
use timeattack_worker::worker::Worker;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "timeattack", about = "HTTP timing side-channel prober")]
struct Args {
    /// Target host
    #[arg(long)]
    host: String,

    /// Target port
    #[arg(long, default_value_t = 80)]
    port: u16,

    /// Per-request timeout (seconds)
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Path of the probed endpoint
    #[arg(long, default_value = "/")]
    path: String,

    /// HTTP method: get | post
    #[arg(long, default_value = "post")]
    method: String,

    /// Request body template; the first {} is replaced with each input
    #[arg(long)]
    body: String,

    /// Requests per input
    #[arg(long, default_value_t = 1)]
    samples: usize,

    /// Maximum concurrently sampled inputs
    #[arg(long, default_value_t = 5)]
    concurrency: usize,

    /// Reducer: average | median | min | max | pNN
    #[arg(long, default_value = "average")]
    reducer: String,

    /// Comma-separated candidate inputs
    #[arg(long, value_delimiter = ',')]
    inputs: Vec<String>,

    /// File with one candidate input per line
    #[arg(long)]
    inputs_file: Option<PathBuf>,

    /// Generate N numeric candidates of the form NNN111222333
    #[arg(long)]
    generate: Option<usize>,

    /// Print the ranked report as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let method = RequestMethod::from_name(&args.method).unwrap_or_else(|| {
        eprintln!("Unknown method {:?}. Valid values: get, post", args.method);
        process::exit(3);
    });

    let reducer = Reducer::from_name(&args.reducer).unwrap_or_else(|| {
        eprintln!(
            "Unknown reducer {:?}. Valid values: average, median, min, max, pNN",
            args.reducer
        );
        process::exit(3);
    });

    let inputs = resolve_inputs(&args).unwrap_or_else(|msg| {
        eprintln!("{msg}");
        process::exit(3);
    });

    let mut config = WorkerConfig::new(args.host);
    config.port = args.port;
    config.timeout = Duration::from_secs(args.timeout);
    config.api_path = args.path;
    config.method = method;
    config.body_template = args.body;
    config.sample_count = args.samples;
    config.max_concurrent_requests = args.concurrency;
    config.reducer = reducer;

    info!("Starting timeattack");
    info!(
        "Probing {}:{}{} with {} inputs [method: {}, samples: {}, concurrency: {}, reducer: {}]",
        config.host,
        config.port,
        config.api_path,
        inputs.len(),
        config.method.as_str(),
        config.sample_count,
        config.max_concurrent_requests,
        config.reducer.as_name(),
    );

    let worker = Worker::new(config).unwrap_or_else(|e| {
        error!("Failed to create worker: {}", e);
        process::exit(2);
    });

    let report = match worker.run(&inputs).await {
        Ok(report) => report,
        Err(e) => {
            error!("Run refused: {}", e);
            process::exit(2);
        }
    };

    let ranked = report.ranked(worker.config.reducer);

    if args.json {
        match serde_json::to_string_pretty(&ranked) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("Failed to render JSON report: {e}");
                process::exit(2);
            }
        }
    } else {
        let title = title_case(&worker.config.reducer.as_name());
        for entry in &ranked {
            info!(
                "{} time {:.5}s for input: \"{}\" [{} samples]",
                title, entry.duration, entry.input, entry.sample_count,
            );
        }
    }

    info!("Finished");
}

/// Collect the candidate inputs from exactly one of the three sources.
fn resolve_inputs(args: &Args) -> Result<Vec<String>, String> {
    let given = [
        !args.inputs.is_empty(),
        args.inputs_file.is_some(),
        args.generate.is_some(),
    ];
    match given.iter().filter(|g| **g).count() {
        0 => return Err("No inputs given. Use --inputs, --inputs-file or --generate".to_string()),
        1 => {}
        _ => return Err("Use only one of --inputs, --inputs-file and --generate".to_string()),
    }

    if let Some(path) = &args.inputs_file {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        return Ok(contents
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect());
    }

    if let Some(count) = args.generate {
        return Ok((0..count).map(|i| format!("{:03}111222333", i)).collect());
    }

    Ok(args.inputs.clone())
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
