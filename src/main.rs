use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use raceledger::application::acceptor::Acceptor;
use raceledger::application::coordinator::AgreementCoordinator;
use raceledger::application::node::{AddResultRequest, Node};
use raceledger::config::{DEFAULT_ME, NodeConfig};
use raceledger::domain::ports::{Ledger, LedgerBox};
use raceledger::domain::signature::SigningIdentity;
use raceledger::infrastructure::in_memory::{InMemoryDirectory, InMemoryLedger};
use raceledger::interfaces::csv::result_writer::ResultWriter;
use raceledger::interfaces::csv::submission_reader::SubmissionReader;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Legal name of this node
    #[arg(long, env = "RACELEDGER_ME", default_value = DEFAULT_ME)]
    me: String,

    /// Legal name of a counterparty hosted by this node (repeatable)
    #[arg(long = "peer", env = "RACELEDGER_PEERS", value_delimiter = ';')]
    peers: Vec<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "RACELEDGER_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print this node's legal name
    Me,
    /// List the parties results can be agreed with
    Peers,
    /// List every result committed to the ledger
    Results,
    /// Agree a single race result with a counterparty
    AddResult(AddResultArgs),
    /// Agree every race result listed in a CSV file
    Submit {
        /// Input submissions CSV file
        input: PathBuf,
    },
}

#[derive(Args)]
struct AddResultArgs {
    #[arg(long)]
    challenge_name: String,
    #[arg(long)]
    challenge_year: String,
    #[arg(long)]
    plc: String,
    #[arg(long)]
    gpic: String,
    #[arg(long)]
    bib: String,
    #[arg(long)]
    name: String,
    #[arg(long, allow_negative_numbers = true)]
    time: Decimal,
    #[arg(long)]
    gender: String,
    /// Legal name of the counterparty
    #[arg(long)]
    party_name: Option<String>,
}

impl From<AddResultArgs> for AddResultRequest {
    fn from(args: AddResultArgs) -> Self {
        Self {
            challenge_name: args.challenge_name,
            challenge_year: args.challenge_year,
            plc: args.plc,
            gpic: args.gpic,
            bib: args.bib,
            name: args.name,
            time: args.time,
            gender: args.gender,
            party_name: args.party_name,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = NodeConfig::new(cli.me, cli.peers, cli.db_path);
    let node = build_node(&config)?;

    match cli.command {
        Command::Me => {
            let me = node.me().await?;
            println!("{}", serde_json::json!({ "me": me.name }));
        }
        Command::Peers => {
            let peers: Vec<String> = node.peers().await?.into_iter().map(|p| p.name).collect();
            println!("{}", serde_json::json!({ "peers": peers }));
        }
        Command::Results => {
            let results = node.results().await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&results).into_diagnostic()?
            );
        }
        Command::AddResult(args) => {
            let id = node.add_result(args.into()).await?;
            println!("Transaction id {} committed to ledger.", id);
        }
        Command::Submit { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = SubmissionReader::new(file);
            for submission in reader.submissions() {
                match submission {
                    Ok(request) => {
                        if let Err(e) = node.add_result(request).await {
                            error!("Error submitting result: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("Error reading result: {}", e);
                    }
                }
            }

            let results = node.results().await?;
            let stdout = io::stdout();
            let mut writer = ResultWriter::new(stdout.lock());
            writer.write_results(&results)?;
        }
    }

    Ok(())
}

/// Wires a node with its ledger and one in-process acceptor per peer.
fn build_node(config: &NodeConfig) -> Result<Node> {
    let (coordinator_ledger, node_ledger) = open_ledger(config)?;

    let me = SigningIdentity::generate(config.me.clone());
    let mut directory = InMemoryDirectory::new(me.party().clone());
    let mut acceptors = Vec::with_capacity(config.peers.len());
    for peer in &config.peers {
        let acceptor = Acceptor::new(SigningIdentity::generate(peer.clone()));
        directory = directory.with_party(acceptor.party().clone());
        acceptors.push(acceptor);
    }
    info!(me = %config.me, peers = config.peers.len(), "node identity ready");

    let coordinator = AgreementCoordinator::new(me, coordinator_ledger);
    let mut node = Node::new(Box::new(directory), coordinator, node_ledger);
    for acceptor in acceptors {
        node.connect(Box::new(acceptor.spawn()));
    }
    Ok(node)
}

fn open_ledger(config: &NodeConfig) -> Result<(LedgerBox, LedgerBox)> {
    match &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            // Use persistent storage (RocksDB)
            let ledger = raceledger::infrastructure::rocksdb::RocksDBLedger::open(db_path)?;
            Ok(shared(ledger))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(shared(InMemoryLedger::new()))
        }
        None => Ok(shared(InMemoryLedger::new())),
    }
}

/// Boxes two handles onto the same underlying ledger.
fn shared<L: Ledger + Clone + 'static>(ledger: L) -> (LedgerBox, LedgerBox) {
    (Box::new(ledger.clone()), Box::new(ledger))
}
