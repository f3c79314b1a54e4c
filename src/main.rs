//! PixSecret - command line front-end
//!
//! Single binary with subcommands:
//!   pixsecret plan <action>   - Validate an action and print the call it would send
//!   pixsecret config init     - Write a default settings file
//!   pixsecret config show     - Print the effective settings

mod cli;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Error: failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("plan") => cli::plan(&args[2..]),
        Some("config") => cli::config(&args[2..]),
        Some("--version" | "-V") => {
            println!("pixsecret {}", pixsecret::VERSION);
            Ok(())
        }
        Some("--help" | "-h") | None => {
            print_help();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {other}. Run 'pixsecret --help' for usage.");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_help() {
    println!("PixSecret v{}", pixsecret::VERSION);
    println!("Key registration and payment relay on Secret Network");
    println!();
    println!("USAGE:");
    println!("    pixsecret <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    plan <action>   Validate an action and print the call it would send");
    println!("    config init     Write a default settings file");
    println!("    config show     Print the effective settings");
    println!();
    println!("ACTIONS:");
    for kind in pixsecret::ActionKind::ALL {
        let fields: Vec<String> = kind
            .required_fields()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("    {:<26} requires: {}", kind.tag(), fields.join(", "));
    }
    println!();
    println!("PLAN OPTIONS:");
    println!("    --config <path>        Settings file (default: ~/.pixsecret/config.toml)");
    println!("    --sender <addr>        Signing wallet");
    println!("    --code <key>           Key the action is about");
    println!("    --recognition <label>  Identity label for a new key");
    println!("    --memo <text>          Payer note");
    println!("    --market-value <n>     Asking price in uscrt");
    println!("    --funds <n>            Attach n of the configured denom");
    println!("    --query <json>         Raw query for query_existence");
    println!("    --permit <path>        Signed permit JSON file");
    println!();
    println!("ENVIRONMENT:");
    println!("    PIXSECRET_CONTRACT_ADDRESS, PIXSECRET_CODE_HASH override the settings file");
    println!("    RUST_LOG controls log output (default: warn)");
}
