use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use convo_api::ModelsClient;
use convo_types::ModelKind;

use crate::app::setup::AppConfig;
use crate::cli::ModelCommands;
use crate::render::format_model_status;

impl ModelCommands {
    /// Run the subcommand and return what should be printed
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        let client = ModelsClient::new(config.api_client()?);

        match self {
            ModelCommands::Status => {
                let status = client.status().await?;
                let mut out = format_model_status(&status);
                if !status.all_loaded() {
                    out.push_str(&format!(
                        "\n{}",
                        "Some models are not loaded; recommendations may be unavailable.".yellow()
                    ));
                }
                Ok(out)
            }
            ModelCommands::Upload { kind, file } => {
                let message = client.upload_file(*kind, file).await?;
                Ok(format!("✅ {}", message))
            }
            ModelCommands::Load { kind } => {
                let message = client.load(*kind).await?;
                Ok(format!("✅ {}", message))
            }
            ModelCommands::Download { kind, output } => {
                let dest = output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(default_file_name(*kind)));
                let written = client.download_to(*kind, &dest).await?;
                Ok(format!("Saved {} ({} bytes) to {}", kind, written, dest.display()))
            }
        }
    }
}

/// File name the server stores each model under
pub fn default_file_name(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Autoencoder => "autoencoder_model.keras",
        ModelKind::Embeddings => "embeddings.npy",
        ModelKind::Matriz => "matriz_de_similitud.npy",
        ModelKind::Cursos => "cursos.npy",
    }
}
