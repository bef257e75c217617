//! mintlist CLI - allowlist roots, proofs and contract lookups
//!
//! Every command prints a single JSON document on stdout. Logs go to
//! stderr and are controlled with `RUST_LOG`.

use clap::{Parser, Subcommand};
use mintlist::config::parse_root;
use mintlist::{
    dataset, encode_leaf, parse_address, parse_price, verify, AllowlistTree, Config, Eligibility,
    Network, Proof, TreeState,
};
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "mintlist")]
#[command(about = "Merkle allowlist roots and proofs for NFT mints")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to ~/.config/mintlist/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allowlist dataset (.json or .csv)
    #[arg(short, long)]
    allowlist: Option<PathBuf>,

    /// Pinned merkle root the built tree must match
    #[arg(short = 'r', long)]
    expected_root: Option<String>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the tree and print its root
    Root,

    /// Build the tree and compare its root with the pinned root
    Check,

    /// Look up an address and print its price and proof
    Proof {
        /// The wallet address
        address: String,
    },

    /// Verify a proof without the allowlist
    Verify {
        /// The wallet address
        address: String,
        /// The price in wei
        price: String,
        /// Comma-separated sibling hashes
        #[arg(short, long, value_delimiter = ',')]
        proof: Vec<String>,
        /// Root to verify against (defaults to the pinned root)
        #[arg(long)]
        root: Option<String>,
    },

    /// Print the encoded leaf and leaf hash for an address and price
    Leaf {
        /// The wallet address
        address: String,
        /// The price in wei
        price: String,
    },

    /// Resolve a contract address
    Contract {
        /// Contract name, as in the deployment export
        name: String,
        /// Wallet chain id (falls back to the default network)
        #[arg(long)]
        chain_id: Option<u64>,
        /// Network name, overrides the default network
        #[arg(short, long)]
        network: Option<String>,
        /// Hardhat deployment export to merge
        #[arg(short, long)]
        deployments: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Root => {
            let tree = build_tree(&config)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root().to_hex(),
                    "entries": tree.len(),
                    "depth": tree.depth()
                }),
            )?;
        }

        Commands::Check => {
            let tree = build_tree(&config)?;
            let entries = tree.len();
            match TreeState::pin(tree, config.pinned_root()?) {
                TreeState::Ready(tree) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "ready",
                            "root": tree.root().to_hex(),
                            "entries": entries
                        }),
                    )?;
                }
                TreeState::Corrupted { expected, computed } => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "corrupted",
                            "expected": expected.to_hex(),
                            "computed": computed.to_hex()
                        }),
                    )?;
                    std::process::exit(1);
                }
            }
        }

        Commands::Proof { address } => {
            let address = parse_address(&address)?;
            let tree = build_tree(&config)?;
            let state = TreeState::pin(tree, config.pinned_root()?);
            match state.query(&address) {
                Ok(eligibility) => {
                    let mut value = serde_json::to_value(&eligibility)?;
                    value["address"] = serde_json::json!(address.to_checksum(None));
                    if let Eligibility::Eligible { .. } = eligibility {
                        value["root"] = serde_json::json!(state.root().to_hex());
                    }
                    output(&cli.format, &value)?;
                }
                Err(mintlist::Error::RootMismatch { expected, computed }) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "corrupted",
                            "message": "Allowlist root does not match the pinned root",
                            "expected": expected.to_hex(),
                            "computed": computed.to_hex()
                        }),
                    )?;
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Verify {
            address,
            price,
            proof,
            root,
        } => {
            let address = parse_address(&address)?;
            let price = parse_price(&price)?;
            let proof = Proof::from_hex(&proof)?;
            let root = match root {
                Some(r) => parse_root(&r)?,
                None => config.pinned_root()?,
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "valid": verify(&address, price, &proof, &root),
                    "root": root.to_hex()
                }),
            )?;
        }

        Commands::Leaf { address, price } => {
            let address = parse_address(&address)?;
            let price = parse_price(&price)?;
            let leaf = encode_leaf(&address, &price);
            output(
                &cli.format,
                &serde_json::json!({
                    "address": address.to_checksum(None),
                    "price": price.to_string(),
                    "leaf": leaf.to_hex(),
                    "hash": leaf.hash().to_hex()
                }),
            )?;
        }

        Commands::Contract {
            name,
            chain_id,
            network,
            deployments,
        } => {
            let mut config = config;
            if let Some(path) = deployments {
                config.deployments = Some(path);
            }
            let registry = config.registry()?;
            let address = match network {
                Some(n) => registry.resolve(&name, n.parse::<Network>()?)?,
                None => registry.resolve_chain(&name, chain_id, config.network()?)?,
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "contract": name,
                    "address": address.to_checksum(None)
                }),
            )?;
        }
    }

    Ok(())
}

/// Config file, then environment, then command-line flags
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?.apply_env()?;
    if let Some(path) = &cli.allowlist {
        config.allowlist = Some(path.clone());
    }
    if let Some(root) = &cli.expected_root {
        config.expected_root = Some(parse_root(root)?);
    }
    Ok(config)
}

fn build_tree(config: &Config) -> anyhow::Result<AllowlistTree> {
    let entries = dataset::load_entries(config.allowlist_path()?)?;
    Ok(AllowlistTree::build(entries)?)
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value)?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
