//! Bitflipper - bit-flip domain generation and registration status checking
//!
//! Prints every valid domain one bit away from the given domain, with its
//! registration status when a Domainr API key is configured.

use bitflipper::{
    display::render_report,
    domain::{DomainrChecker, StatusLookup, TldSet},
    BitflipperError, Config, Result,
};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // Initialize the library
    if let Err(e) = bitflipper::init() {
        eprintln!("Failed to initialize: {}", e);
        return;
    }

    // Get command line arguments
    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    let Some(domain) = args.get(1) else {
        println!("{}", BitflipperError::invalid_domain("", "missing argument").user_message());
        return;
    };

    tokio::select! {
        result = run_bitflipper(domain) => {
            if let Err(e) = result {
                tracing::debug!(error = %e, "Run failed");
                println!("{}", e.user_message());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("Aborted!");
        }
    }
}

/// Log to stderr so candidate output on stdout stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main bitflipper workflow
async fn run_bitflipper(domain: &str) -> Result<()> {
    let config = Config::from_env();
    let tlds = TldSet::load(&config.tld_path)?;

    let checker = config
        .api_key
        .clone()
        .map(|key| DomainrChecker::with_config(key, config.lookup.clone()));
    let lookup = checker.as_ref().map(|c| c as &dyn StatusLookup);

    bitflipper::check(domain, &tlds, lookup, |report| {
        println!("{}", render_report(report));
    })
    .await?;

    Ok(())
}

/// Print help information
fn print_help() {
    println!("bitflipper {}", bitflipper::VERSION);
    println!("Find domains one bit flip away from a given domain");
    println!();
    println!("USAGE:");
    println!("    bitflipper <DOMAIN>");
    println!();
    println!("EXAMPLES:");
    println!("    bitflipper example.com");
    println!();
    println!("STATUS LOOKUP:");
    println!("    Put a Domainr API key in ~/.bitflipper as a line");
    println!("        DOMAINR-API=<key>");
    println!("    to show whether each domain is available or taken.");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BITFLIPPER_TLDS          TLD list file (default: tlds.txt next to the binary)");
    println!("    BITFLIPPER_CONFIG        Credential file (default: ~/.bitflipper)");
    println!("    DOMAINR_API_KEY          Domainr API key, overrides the credential file");
    println!("    DOMAINR_URL              Domainr status endpoint");
    println!("    BITFLIPPER_TIMEOUT_SECS  Lookup timeout in seconds (default: 10)");
    println!("    BITFLIPPER_NO_WHOIS      Skip WHOIS details for taken domains");
    println!("    RUST_LOG                 Log filter (default: warn)");
}
