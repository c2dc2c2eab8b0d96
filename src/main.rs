use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod meta;
mod routing;
mod server;

struct Args {
    /// Config file basename, extension inferred by the config crate
    config_path: String,
    /// Dump the fully-merged configuration as TOML and exit
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    let cfg = config::Config::load_from(&args.config_path)?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&cfg)?);
        return Ok(());
    }

    logger::init(&cfg)?;
    warn_degenerate_rules(&cfg);

    // Build the Tokio runtime, sizing it from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut config_path = "config".to_string();
    let mut print_config = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print-config" => print_config = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}").into());
            }
            path => config_path = path.to_string(),
        }
    }

    Ok(Args {
        config_path,
        print_config,
    })
}

/// Warn once per rule that cannot produce a useful match or document
///
/// Degenerate rules are not rejected; matching and rendering stay
/// deterministic on them.
fn warn_degenerate_rules(cfg: &config::Config) {
    for (index, rule) in cfg.site.packages.iter().enumerate() {
        if rule.prefix.trim_matches('/').is_empty() {
            logger::log_warning(&format!(
                "Rule #{index} has an empty prefix and matches only the root path"
            ));
        }
        if rule.repo.is_empty() {
            logger::log_warning(&format!(
                "Rule #{index} (prefix '{}') has an empty repo",
                rule.prefix
            ));
        }
    }
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let config = Arc::new(cfg);
    let shutdown = Arc::new(Notify::new());

    logger::log_server_start(&addr, &config);
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    server::run(listener, config, shutdown).await
}
