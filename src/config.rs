use std::path::PathBuf;

/// Organisations that run network services rather than take part in agreements.
pub const SERVICE_NAMES: [&str; 2] = ["Notary", "Network Map Service"];

pub const DEFAULT_ME: &str = "O=PartyA,L=London,C=GB";
pub const DEFAULT_PEERS: [&str; 2] = ["O=PartyB,L=New York,C=US", "O=PartyC,L=Paris,C=FR"];

/// Resolved settings of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Legal name of this node.
    pub me: String,
    /// Legal names of the counterparties this node can agree results with.
    pub peers: Vec<String>,
    /// Path to persistent ledger storage. In-memory when absent.
    pub db_path: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            me: DEFAULT_ME.to_string(),
            peers: DEFAULT_PEERS.iter().map(|p| p.to_string()).collect(),
            db_path: None,
        }
    }
}

impl NodeConfig {
    /// Builds a config, falling back to the default peers when none are given.
    ///
    /// Blank and duplicate peer names, and any peer naming this node, are dropped.
    pub fn new(me: String, peers: Vec<String>, db_path: Option<PathBuf>) -> Self {
        let me = me.trim().to_string();
        let peers = if peers.iter().all(|p| p.trim().is_empty()) {
            Self::default().peers
        } else {
            peers
        };

        let mut unique: Vec<String> = Vec::new();
        for peer in peers.into_iter().map(|p| p.trim().to_string()) {
            if !peer.is_empty() && peer != me && !unique.contains(&peer) {
                unique.push(peer);
            }
        }

        Self {
            me,
            peers: unique,
            db_path,
        }
    }
}
