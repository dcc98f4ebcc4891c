//! CLI commands using clap

use crate::core::{HubConfig, ModelProvider};
use crate::domain::entities::RecoveryEffort;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mobile Forensics Hub
///
/// Guided mobile forensics workflow: wipe accuracy, recovery potential,
/// wipe/recovery simulation, data extraction and threat detection, each
/// analysis answered by a language model.
#[derive(Parser, Debug)]
#[command(name = "forensics-hub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mobile forensics workflow service", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "FORENSICS_HUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model provider (gemini, canned)
    #[arg(long, global = true)]
    pub provider: Option<ModelProvider>,

    /// Model name passed to the provider
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        address: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Assess how thoroughly a wipe log shows data was removed
    WipeAccuracy {
        /// Wipe log file
        #[arg(short, long)]
        log: PathBuf,
    },

    /// Estimate the chance of recovering data from a device
    RecoveryPotential {
        /// Device image file
        #[arg(short, long)]
        image: PathBuf,

        /// Free-text description of the device
        #[arg(short, long)]
        description: String,

        /// Text file with an earlier wipe accuracy report
        #[arg(short, long)]
        wipe_report: Option<PathBuf>,
    },

    /// Scan extracted data for threats
    ThreatScan {
        /// Text file with the extracted data
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Simulate recovering a wiped text file
    Simulate {
        /// Text file that gets "wiped"
        #[arg(short, long)]
        input: PathBuf,

        /// Recovery effort (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        effort: RecoveryEffort,

        /// Where to write the recovered content
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Applies flag overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut HubConfig) {
        if let Some(provider) = self.provider {
            config.model.provider = provider;
        }
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
        if let Commands::Serve { address, port } = &self.command {
            if let Some(address) = address {
                config.server.address = address.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}
