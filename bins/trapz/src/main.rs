use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trapz_config::{ConfigError, TrapzConfig};
use trapz_engine::{FileJobSource, JobSource, Worker};
use trapz_events::Message;
use trapz_transport::{ChannelEndpoint, Transport};

/// Rank that loads the input and prints the result.
const ROOT: usize = 0;

fn integrand(x: f64) -> f64 {
    x * x
}

fn load_config() -> Result<TrapzConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => TrapzConfig::load(path),
        None => match TrapzConfig::load("trapz.toml") {
            Ok(config) => Ok(config),
            // no config file at all is fine, run on defaults
            Err(ConfigError::Read { .. }) => Ok(TrapzConfig::default()),
            Err(e) => Err(e),
        },
    }
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("trapz: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.ranks < 1 {
        error!("group must have at least one rank");
        std::process::exit(1);
    }

    info!(ranks = config.ranks, input = %config.input_path, "starting group");

    let mut source = Some(FileJobSource::new(&config.input_path));
    let endpoints = ChannelEndpoint::<Message>::connect_group(config.ranks);

    let handles: Vec<_> = endpoints
        .into_iter()
        .map(|ep| {
            let rank = ep.rank();
            // only the root carries the input capability
            let source = (rank == ROOT).then(|| source.take()).flatten();
            thread::Builder::new()
                .name(format!("rank-{rank}"))
                .spawn(move || {
                    let worker = Worker::new(ep);
                    let source = source.as_ref().map(|s| s as &dyn JobSource);
                    worker.run(ROOT, source, integrand)
                })
                .expect("failed to spawn rank thread")
        })
        .collect();

    let mut summary = None;
    for (rank, handle) in handles.into_iter().enumerate() {
        match handle.join().expect("rank thread panicked") {
            Ok(Some(s)) => summary = Some(s),
            Ok(None) => {}
            Err(e) => {
                // a failed rank stalls its peers; tear the whole run down
                error!(rank, error = %e, "rank failed");
                std::process::exit(1);
            }
        }
    }

    // only the root speaks on success
    if let Some(s) = summary {
        println!("With n = {} trapezoids, our estimate", s.n);
        println!("of the integral from {:.6} to {:.6} = {:.15e}", s.a, s.b, s.total);
    }
}
