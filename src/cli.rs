use clap::{Parser, Subcommand};
use qoinchain::api;
use qoinchain::chain::{Block, ProofOfWork};
use qoinchain::config::Config;
use qoinchain::error::Result;
use std::fs;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "qoinchain")]
#[command(about = "Qoinchain node - append-only ledger with proof-of-work linking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long, default_value = "human")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP node
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Leading-zero proof-of-work difficulty
        #[arg(short, long)]
        difficulty: Option<usize>,

        /// Reject mine requests whose proof fails the difficulty predicate
        #[arg(long)]
        enforce_proof: bool,
    },

    /// Search for a valid proof for a block
    Prove {
        /// Block JSON (or read from stdin if not provided)
        #[arg(short, long)]
        block: Option<String>,

        /// Block JSON file path
        #[arg(long)]
        file: Option<String>,

        /// Leading-zero proof-of-work difficulty
        #[arg(short, long)]
        difficulty: Option<usize>,
    },
}

/// Parse a block from a JSON string
fn parse_block(json: &str) -> Result<Block> {
    let block: Block = serde_json::from_str(json)?;
    Ok(block)
}

/// Read block JSON from an argument, a file, or stdin
fn read_block_json(block: Option<String>, file: Option<&str>) -> Result<String> {
    match (block, file) {
        (Some(json), _) => Ok(json),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            difficulty,
            enforce_proof,
        } => {
            let mut config = Config::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            if enforce_proof {
                config.enforce_proof = true;
            }

            api::serve(&config).await
        }

        Commands::Prove {
            block,
            file,
            difficulty,
        } => {
            let json = read_block_json(block, file.as_deref())?;
            let block = parse_block(&json)?;
            let block_string = block.canonical_json()?;

            let pow = match difficulty {
                Some(k) => ProofOfWork::new(k),
                None => ProofOfWork::default(),
            };
            let (proof, hash) = pow.run(&block_string);

            if cli.format == "json" {
                let output = serde_json::json!({ "proof": proof, "hash": hash });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("proof: {}", proof);
                println!("hash:  {}", hash);
            }
            Ok(())
        }
    }
}
