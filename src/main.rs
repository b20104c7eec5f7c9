use clap::{Arg, Command};
use log::LevelFilter;
use scamguard::analyzers::{file, message, password, url};
use scamguard::config::Config;
use scamguard::scan_log::ScanLog;
use scamguard::server;
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("scamguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic risk scoring for URLs, messages, passwords, and files")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/scamguard.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("listen")
                .short('l')
                .long("listen")
                .value_name("ADDR")
                .help("Listen address override (e.g. 0.0.0.0:5000)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-url")
                .long("check-url")
                .value_name("URL")
                .help("Analyze a single URL and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-message")
                .long("check-message")
                .value_name("TEXT")
                .help("Analyze a message and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("simple")
                .long("simple")
                .help("Use plain-language explanations with --check-message")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check-password")
                .long("check-password")
                .value_name("PASSWORD")
                .help("Analyze a password and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-file")
                .long("check-file")
                .value_name("NAME")
                .help("Analyze a file name and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("file-size")
                .long("file-size")
                .value_name("BYTES")
                .help("Declared file size for --check-file")
                .value_parser(clap::value_parser!(f64))
                .default_value("0"),
        )
        .arg(
            Arg::new("file-type")
                .long("file-type")
                .value_name("MIME")
                .help("Declared MIME type for --check-file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("analytics")
                .long("analytics")
                .help("Print scan history totals and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration: {config_path}");
        println!("   Listen address: {}", config.listen_addr);
        println!(
            "   Scan history: {} ({})",
            config.scan_log.path,
            if config.scan_log.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("Configuration is valid!");
        return;
    }

    if let Some(check_url) = matches.get_one::<String>("check-url") {
        print_verdict("URL", &url::analyze_url(check_url));
        return;
    }

    if let Some(text) = matches.get_one::<String>("check-message") {
        let simple_mode = matches.get_flag("simple");
        print_verdict("Message", &message::analyze_message(text, simple_mode));
        return;
    }

    if let Some(check_password) = matches.get_one::<String>("check-password") {
        match password::analyze_password(check_password) {
            Some(verdict) => print_verdict("Password", &verdict),
            None => {
                eprintln!("Nothing to analyze: empty password");
                process::exit(1);
            }
        }
        return;
    }

    if let Some(file_name) = matches.get_one::<String>("check-file") {
        let file_size = matches.get_one::<f64>("file-size").copied().unwrap_or(0.0);
        let file_type = matches.get_one::<String>("file-type").map(String::as_str);
        print_verdict("File", &file::analyze_file(file_name, file_size, file_type));
        return;
    }

    if matches.get_flag("analytics") {
        let stats = ScanLog::stats_from_file(&config.scan_log.path);
        println!("📊 Scan history: {}", config.scan_log.path);
        println!("   Total scans: {}", stats.total_scans);
        println!("   Scams prevented today: {}", stats.scams_prevented_today);
        return;
    }

    if let Some(listen) = matches.get_one::<String>("listen") {
        config.listen_addr = listen.clone();
    }

    log::info!("🛡️ scamguard starting");
    if let Err(e) = server::run(&config).await {
        eprintln!("Server error: {e}");
        process::exit(1);
    }
}

fn print_verdict<T: serde::Serialize>(label: &str, verdict: &T) {
    println!("🔍 {label} analysis:");
    match serde_json::to_string_pretty(verdict) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing verdict: {e}");
            process::exit(1);
        }
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}
