//! Command execution

use super::commands::{Cli, Commands};
use crate::application::dto::ActionResult;
use crate::application::{
    ActionContext, AnalyzeRecoveryPotentialUseCase, AssessWipeAccuracyUseCase,
    DetectThreatsUseCase, SimulateRecoveryUseCase,
};
use crate::core::HubConfig;
use crate::domain::entities::{
    DataUri, RecoveryPotentialInput, SimulateRecoveryInput, ThreatDetectionInput,
    WipeAccuracyInput,
};
use crate::infrastructure::llm::build_model;
use crate::infrastructure::session::InMemorySessionStore;
use crate::presentation::http::{self, AppState};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Runs the parsed command against `config`
pub async fn run_command(cli: &Cli, config: &HubConfig) -> Result<()> {
    let model = build_model(&config.model).context("Failed to initialise the language model")?;
    tracing::info!(provider = %config.model.provider, model = model.name(), "model ready");
    let context = ActionContext::new(model);

    match &cli.command {
        Commands::Serve { .. } => {
            let addr: SocketAddr = config
                .bind_address()
                .parse()
                .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;
            let state = AppState::new(context, Arc::new(InMemorySessionStore::new()), config);
            http::serve(addr, state)
                .await
                .with_context(|| format!("Server on {addr} failed"))?;
        }

        Commands::WipeAccuracy { log } => {
            let input = WipeAccuracyInput {
                wipe_log_data_uri: read_data_uri(log).await?.to_string(),
            };
            let result = AssessWipeAccuracyUseCase::new(context).execute(input).await;
            print_result(result)?;
        }

        Commands::RecoveryPotential {
            image,
            description,
            wipe_report,
        } => {
            let wipe_accuracy_report = match wipe_report {
                Some(path) => read_text(path).await?,
                None => String::new(),
            };
            let input = RecoveryPotentialInput {
                device_image_uri: read_data_uri(image).await?.to_string(),
                wipe_accuracy_report,
                device_description: description.clone(),
            };
            let result = AnalyzeRecoveryPotentialUseCase::new(context)
                .execute(input)
                .await;
            print_result(result)?;
        }

        Commands::ThreatScan { input } => {
            let input = ThreatDetectionInput {
                extracted_data: read_text(input).await?,
            };
            let result = DetectThreatsUseCase::new(context).execute(input).await;
            print_result(result)?;
        }

        Commands::Simulate {
            input,
            effort,
            output,
        } => {
            let simulation = SimulateRecoveryInput {
                original_data: read_text(input).await?,
                original_file_name: input
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned()),
                recovery_effort: *effort,
            };
            let result = SimulateRecoveryUseCase::new(context)
                .execute(simulation)
                .await;

            if let (Some(path), Some(recovered)) = (output, result.data()) {
                tokio::fs::write(path, &recovered.recovered_file_content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "recovered content written");
            }
            print_result(result)?;
        }
    }
    Ok(())
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn read_data_uri(path: &Path) -> Result<DataUri> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    Ok(DataUri::for_file(&name, &bytes))
}

fn print_result<T: Serialize>(result: ActionResult<T>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&result).context("Failed to encode result")?;
    println!("{rendered}");
    match result {
        ActionResult::Success(_) => Ok(()),
        ActionResult::Failure(message) => Err(anyhow!(message)),
    }
}
