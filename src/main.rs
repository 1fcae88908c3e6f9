//! SafeMesh CLI
//!
//! Usage:
//!   landmarks-feed | safemesh                 # Monitor frames from stdin
//!   safemesh --frames session.jsonl           # Monitor frames from a file
//!   safemesh --config safemesh.json --json    # Custom thresholds, JSON output
//!   safemesh --collect --addr 0.0.0.0:8000    # Run the alert collector

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use safemesh::config::SafeMeshConfig;
use safemesh::core::{
    run_collector, spawn_forwarder, Dispatcher, FramePipeline, Forwarder, HttpTransport,
    IpInfoLocator,
};
use safemesh::types::{AlertEvent, Frame};
use safemesh::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "safemesh",
    version = VERSION,
    about = "SafeMesh - Emergency signals from hand gestures and facial expressions",
    long_about = "SafeMesh reads body-landmark frames (one JSON object per line) and turns\n\
                  gestures and expressions into alerts.\n\n\
                  Gestures:\n  \
                  open palm        need-help                  RISK\n  \
                  thumbs up        ok                         INFO\n  \
                  thumb + pinky    power-restored             INFO\n  \
                  index, twice     distress-signal-activated  DISTRESS\n\n\
                  Expressions:\n  \
                  mouth + eyes wide open  panic-expression    RISK\n\n\
                  Every alert is logged locally; alerts with a severity are sent,\n\
                  with an approximate location, to the collector endpoint."
)]
struct Args {
    /// Frame feed (JSON Lines); '-' or absent reads stdin
    #[arg(short, long)]
    frames: Option<String>,

    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collector endpoint (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Alert log file (overrides config)
    #[arg(long)]
    log_file: Option<String>,

    /// Print alerts as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Run the alert collector instead of monitoring
    #[arg(long)]
    collect: bool,

    /// Collector address
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safemesh=info".into()),
        )
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.collect {
        return run_collector(&args.addr)
            .await
            .map_err(|e| anyhow!("collector error: {}", e));
    }

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json_pretty());
        return Ok(());
    }

    run_monitor(&args, config).await
}

/// Defaults, then the config file, then CLI overrides
fn load_config(args: &Args) -> Result<SafeMeshConfig> {
    let mut config = match &args.config {
        Some(path) => SafeMeshConfig::load(path)?,
        None => SafeMeshConfig::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        config.forward.endpoint = endpoint.clone();
    }
    if let Some(log_file) = &args.log_file {
        config.dispatch.log_path = log_file.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Monitor a frame feed until it ends or Ctrl-C
async fn run_monitor(args: &Args, config: SafeMeshConfig) -> Result<()> {
    let locator = IpInfoLocator::new(&config.forward.geo_url, config.forward.geo_timeout())?;
    let transport = HttpTransport::new(&config.forward.endpoint, config.forward.timeout())?;
    let forwarder = Forwarder::new(locator, transport, &config.forward);
    let (handle, mut worker) = spawn_forwarder(forwarder, config.dispatch.queue_capacity);

    let dispatcher = Dispatcher::from_config(&config.dispatch).with_forwarder(handle);
    let mut pipeline = FramePipeline::new(&config, dispatcher);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.store(true, Ordering::Relaxed);
                info!("stopping after the next frame, Ctrl-C again to abort");
                // A stalled feed never reaches the next frame
                if tokio::signal::ctrl_c().await.is_ok() {
                    std::process::exit(130);
                }
            }
        });
    }

    if !args.json {
        print_header(&config);
    }

    let reader: Box<dyn BufRead> = match args.frames.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open frame feed {}", path))?,
        )),
    };

    pipeline.start();
    let mut shown = print_new(pipeline.dispatcher().history(), 0, args.json);
    let mut skipped = 0u64;

    for line in reader.lines() {
        if stop.load(Ordering::Relaxed) {
            info!("stop requested");
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "frame feed read failed");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Frame::from_json_line(line) {
            Ok(frame) => {
                pipeline.process(&frame);
            }
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "frame skipped");
            }
        }
        shown = print_new(pipeline.dispatcher().history(), shown, args.json);
    }

    pipeline.stop();

    // Queued alerts get one delivery window; anything slower is abandoned
    let grace = config.forward.timeout() + config.forward.geo_timeout();
    match tokio::time::timeout(grace, &mut worker).await {
        Ok(Ok(processed)) => info!(processed, "forwarder finished"),
        Ok(Err(e)) => warn!(error = %e, "forwarder task failed"),
        Err(_) => {
            worker.abort();
            warn!("in-flight alerts abandoned at shutdown");
        }
    }
    pipeline.dispatcher_mut().drain_outcomes();
    print_new(pipeline.dispatcher().history(), shown, args.json);

    if !args.json {
        print_summary(&pipeline, skipped, &config);
    }
    Ok(())
}

/// Print events recorded since `shown`; returns the new high-water mark
fn print_new(history: &[AlertEvent], shown: usize, json: bool) -> usize {
    for event in &history[shown..] {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "cannot serialize alert"),
            }
        } else {
            println!("{}", format_event(event));
        }
    }
    history.len()
}

fn format_event(event: &AlertEvent) -> String {
    format!(
        "{} {} {}",
        format!("[{}]", event.stamp()).dimmed(),
        event.severity.emoji(),
        event.message.color(event.severity.color())
    )
}

fn print_header(config: &SafeMeshConfig) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  SafeMesh v{} - Monitor", VERSION).bold());
    println!("{}", "========================================".bold());
    println!("Alert log:  {}", config.dispatch.log_path);
    println!("Collector:  {}", config.forward.endpoint);
    println!();
}

fn print_summary<C: safemesh::core::Clock>(
    pipeline: &FramePipeline<C>,
    skipped: u64,
    config: &SafeMeshConfig,
) {
    let dispatcher = pipeline.dispatcher();

    println!();
    println!("{}", "Last alerts:".bold());
    for event in dispatcher.recent() {
        println!("  {}", format_event(event));
    }
    println!();
    println!(
        "Frames: {} | skipped: {} | messages: {} | log: {}",
        pipeline.frames_processed(),
        skipped,
        dispatcher.history().len(),
        config.dispatch.log_path
    );
    if dispatcher.log_failures() > 0 {
        println!(
            "{}",
            format!("  {} log writes failed", dispatcher.log_failures()).red()
        );
    }
}
