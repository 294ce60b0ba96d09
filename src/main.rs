use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared_config::config;
use shared_config::managers::items::{read_document, ItemManager, LoadedItem};
use shared_config::managers::logging::{
    console_level, init_console_logging, init_logging, LogGuard, LoggingConfig,
};
use shared_config::merge::{merge_layers, ConfigValue, Mapping};
use shared_config::resolver::{resolve, ResolutionReport};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shared-config")]
#[command(about = "Resolve and merge machine-specific and shared configuration backups", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shared-config.toml")]
    config: PathBuf,

    /// Machine folder to use instead of the configured or host name
    #[arg(short, long)]
    machine: Option<String>,

    /// Increase console log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which root holds a relative configuration path
    Resolve {
        /// Path relative to the backup roots
        path: String,

        /// Machine root (skips the configuration file when given with --shared-root)
        #[arg(long, requires = "shared_root")]
        machine_root: Option<PathBuf>,

        /// Shared root (skips the configuration file when given with --machine-root)
        #[arg(long, requires = "machine_root")]
        shared_root: Option<PathBuf>,
    },

    /// Deep-merge JSON documents, later files overriding earlier ones
    Merge {
        /// Base JSON document
        base: PathBuf,

        /// Override JSON documents, applied in order
        #[arg(required = true)]
        overrides: Vec<PathBuf>,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Load configured items and print them merged over their defaults
    Load {
        /// Specific item to load (defaults to all enabled items)
        #[arg(short, long)]
        item: Option<String>,
    },

    /// List all configured items and where they resolve
    List,

    /// Validate configuration file
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // If no command specified, list items
    let command = cli.command.unwrap_or(Commands::List);

    match command {
        // Commands that don't require a config file - use simple console logging
        Commands::Merge { base, overrides, compact } => {
            init_console_logging(console_level(cli.verbose));
            handle_merge(&base, &overrides, compact)
        }

        Commands::Resolve {
            path,
            machine_root: Some(machine_root),
            shared_root: Some(shared_root),
        } => {
            init_console_logging(console_level(cli.verbose));
            print_resolution(&path, &machine_root, &shared_root)
        }

        Commands::Resolve { path, .. } => {
            let (manager, _log_guard) = open_manager(&cli.config, cli.machine.as_deref(), cli.verbose)?;
            let roots = manager.roots();
            print_resolution(&path, &roots.machine_root, &roots.shared_root)
        }

        Commands::Load { item } => {
            let (manager, _log_guard) = open_manager(&cli.config, cli.machine.as_deref(), cli.verbose)?;
            handle_load(&manager, item.as_deref())
        }

        Commands::List => {
            let (manager, _log_guard) = open_manager(&cli.config, cli.machine.as_deref(), cli.verbose)?;
            handle_list(&manager);
            Ok(())
        }

        Commands::Validate => {
            let (manager, _log_guard) = open_manager(&cli.config, cli.machine.as_deref(), cli.verbose)?;
            handle_validate(&manager);
            Ok(())
        }
    }
}

/// Load the tool config, derive the roots and start file logging
///
/// The returned guard must outlive the command so buffered log lines are flushed.
fn open_manager(
    config_path: &Path,
    machine: Option<&str>,
    verbose: u8,
) -> Result<(ItemManager, LogGuard)> {
    let config = config::load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    let roots = config::resolve_roots(&config.global, machine)?;

    let logging_config = LoggingConfig::from_config(&config.global, verbose);
    let log_guard = init_logging(&logging_config)?;

    Ok((ItemManager::new(config, roots), log_guard))
}

fn item_report(loaded: &LoadedItem) -> ConfigValue {
    serde_json::json!({
        "source": ResolutionReport::from(&loaded.source),
        "values": loaded.values,
    })
}

fn handle_load(manager: &ItemManager, item: Option<&str>) -> Result<()> {
    if let Some(name) = item {
        let loaded = manager.load_item(name)?;
        println!("{}", serde_json::to_string_pretty(&item_report(&loaded))?);
        return Ok(());
    }

    let mut output = Mapping::new();
    let mut failures = 0;

    for (name, outcome) in manager.load_all() {
        match outcome {
            Ok(loaded) => {
                output.insert(name, item_report(&loaded));
            }
            Err(e) => {
                eprintln!("✗ {}: {:#}", name, e);
                failures += 1;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    if failures > 0 {
        bail!("{} item(s) failed to load", failures);
    }
    Ok(())
}

fn handle_list(manager: &ItemManager) {
    let config = manager.config();
    let mut names: Vec<&String> = config.items.keys().collect();
    names.sort();

    println!("Machine root: {}", manager.roots().machine_root.display());
    println!("Shared root:  {}", manager.roots().shared_root.display());
    println!("\nConfigured items:");
    for name in names {
        let item = &config.items[name];
        let location = match manager.resolve_item(name) {
            Ok(result) => result.to_string(),
            Err(e) => format!("error: {}", e),
        };

        println!("  {}", name);
        println!("    Description: {}", item.description);
        println!("    Path: {}", item.path);
        println!("    Enabled: {}", item.enabled);
        println!("    Required: {}", item.required);
        println!("    Resolves to: {}", location);
        println!();
    }
}

fn handle_validate(manager: &ItemManager) {
    let roots = manager.roots();
    println!("✓ Configuration is valid");
    if let Some(ref name) = roots.machine_name {
        println!("Machine: {}", name);
    }
    for (label, root) in [("Machine root", &roots.machine_root), ("Shared root", &roots.shared_root)] {
        if root.is_dir() {
            println!("{}: {}", label, root.display());
        } else {
            println!("{}: {} (⚠ does not exist yet)", label, root.display());
        }
    }
    println!("Items: {}", manager.config().items.len());
}

fn print_resolution(path: &str, machine_root: &Path, shared_root: &Path) -> Result<()> {
    let result = resolve(path, machine_root, shared_root)?;
    let report = ResolutionReport::from(&result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_merge(base: &Path, overrides: &[PathBuf], compact: bool) -> Result<()> {
    let base = read_document(base)?;
    let layers = overrides
        .iter()
        .map(|path| read_document(path))
        .collect::<Result<Vec<_>>>()?;

    let merged = ConfigValue::Object(merge_layers(&base, &layers));

    if compact {
        println!("{}", serde_json::to_string(&merged)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&merged)?);
    }
    Ok(())
}
