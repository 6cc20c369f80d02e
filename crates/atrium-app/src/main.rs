mod app_state;
mod cli;
mod host;

use std::path::PathBuf;

use atrium_config::AtriumConfig;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = atrium_platform::write_crash_report(info);

        eprintln!("\n--- Atrium crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

/// Load environment overrides saved by `updateEnv`, then a `.env` in the
/// current directory. Variables already set are never replaced.
fn load_dotenv() {
    let mut candidates = Vec::new();
    if let Ok(path) = atrium_platform::env_file() {
        candidates.push(path);
    }
    candidates.push(PathBuf::from(".env"));

    for path in &candidates {
        host::env_store::load_into_process(path);
    }
}

/// `--log-level` wins over `[logging] level`; `[logging] filter` adds
/// per-target directives on top.
fn init_logging(args: &cli::Args, config: &AtriumConfig) {
    let mut filter = EnvFilter::from_default_env();
    let level = args
        .log_directive()
        .unwrap_or_else(|| config.logging.level.directive().to_owned());

    let extra = config.logging.filter.as_deref().unwrap_or_default();
    for directive in std::iter::once(level.as_str()).chain(extra.split(',')) {
        let directive = directive.trim();
        if directive.is_empty() {
            continue;
        }
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring invalid log directive {directive:?}: {e}"),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    // Load saved env overrides before anything reads the environment
    load_dotenv();

    // Install panic hook for crash reports
    install_panic_hook();

    // Parse CLI arguments
    let args = cli::parse();

    // Load config (errors are reported once logging is up)
    let loaded = match &args.config {
        Some(path) => atrium_config::load_config_from(path),
        None => atrium_config::load_config(),
    };
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AtriumConfig::default(), Some(e)),
    };
    args.apply_to(&mut config);

    init_logging(&args, &config);

    tracing::info!("Atrium v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    if let Err(e) = atrium_config::validation::validate_dev(&config.dev) {
        tracing::warn!("Ignoring invalid dev server URL: {e}");
        config.dev.server_url = None;
    }
    tracing::info!(
        dev = config.dev.enabled,
        content = config.dev.active_server_url().unwrap_or("packaged"),
        "Config loaded"
    );
    tracing::debug!("Effective config: {}", atrium_config::config_to_json(&config));

    // Ensure platform directories exist
    let workspaces = config
        .storage
        .workspaces_dir
        .clone()
        .or_else(|| atrium_platform::workspaces_dir().ok());
    if let Some(dir) = &workspaces {
        if let Err(e) = atrium_platform::ensure_dirs(dir) {
            tracing::warn!("Failed to create directories: {e}");
        }
    }

    // Runtime serving capability handlers and channel delivery
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .thread_name("atrium-host")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };
    let handle = runtime.handle().clone();
    let _runtime_guard = handle.enter();

    let mut app = match app_state::AtriumApp::new(config, runtime) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    // Create event loop and run
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
