use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use convo_api::DEFAULT_BASE_URL;
use convo_types::{ModelKind, DEFAULT_CONVERSATION_LIMIT};

/// CLI arguments for convo
#[derive(Parser, Debug)]
#[command(name = "convo")]
#[command(about = "Terminal client for the course-recommendation chatbot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chatbot server URL (e.g., http://localhost:8000)
    #[arg(long, value_name = "URL", env = "CONVO_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Resume an existing conversation instead of waiting for the server to issue one
    #[arg(long, value_name = "ID", env = "CONVO_CONVERSATION", global = true)]
    pub conversation: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS", env = "CONVO_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat interactively (the default)
    Chat,
    /// Browse and delete stored conversations
    Conversations {
        #[command(subcommand)]
        command: ConversationCommands,
    },
    /// Inspect and manage the recommender models
    Models {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConversationCommands {
    /// List the most recent conversations
    List {
        /// Maximum number of conversations to show
        #[arg(short = 'l', long, default_value_t = DEFAULT_CONVERSATION_LIMIT)]
        limit: u32,
    },
    /// Show the stored history of a conversation
    Show {
        /// Conversation id
        id: String,
    },
    /// Delete a conversation on the server
    Delete {
        /// Conversation id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModelCommands {
    /// Show which models are loaded in memory
    Status,
    /// Upload a model file; the server loads it right away
    Upload {
        /// Model type (autoencoder, embeddings, matriz, cursos)
        kind: ModelKind,
        /// File to upload
        file: PathBuf,
    },
    /// Load an already uploaded model into memory
    Load {
        /// Model type (autoencoder, embeddings, matriz, cursos)
        kind: ModelKind,
    },
    /// Download the stored file of a model
    Download {
        /// Model type (autoencoder, embeddings, matriz, cursos)
        kind: ModelKind,
        /// Where to write the file (default: the server-side file name)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}
