use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use convo::{setup_from_cli, AppConfig, Cli, Commands, ConversationCommands, ModelCommands};
use clap::Parser;

fn config_for(server: &MockServer, extra: &[&str]) -> AppConfig {
    let mut args = vec!["convo", "--base-url", server.uri().as_str()]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    args.extend(extra.iter().map(|s| s.to_string()));
    let cli = Cli::try_parse_from(args).unwrap();
    setup_from_cli(&cli).unwrap()
}

fn never(_: &str) -> bool {
    false
}

fn always(_: &str) -> bool {
    true
}

mod conversation_command_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_uses_limit_and_formats_rows() {
        colored::control::set_override(false);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id_conversation": "3", "last_message": "gracias"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, &[]);
        let out = ConversationCommands::List { limit: 5 }
            .execute(&config, &never)
            .await
            .unwrap();

        assert_eq!(out, "ID: 3\n   Last message: gracias");
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server, &[]);
        let out = ConversationCommands::Delete { id: "3".into() }
            .execute(&config, &never)
            .await
            .unwrap();

        assert_eq!(out, "Deletion cancelled.");
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/conversations/3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "deleted", "id_conversation": 3})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, &[]);
        let out = ConversationCommands::Delete { id: "3".into() }
            .execute(&config, &always)
            .await
            .unwrap();

        assert_eq!(out, "Conversation 3 deleted.");
    }

    #[tokio::test]
    async fn test_server_detail_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Conversation not found"})),
            )
            .mount(&server)
            .await;

        let config = config_for(&server, &[]);
        let err = ConversationCommands::Show { id: "99".into() }
            .execute(&config, &always)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Conversation not found (status 404)");
    }
}

mod model_command_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_status_warns_when_models_missing() {
        colored::control::set_override(false);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "autoencoder": true,
                "embeddings": true,
                "matriz": false,
                "cursos": true,
                "cursos_info": true
            })))
            .mount(&server)
            .await;

        let config = config_for(&server, &[]);
        let out = ModelCommands::Status.execute(&config).await.unwrap();

        assert!(out.contains("Matrix:        ❌ not loaded"));
        assert!(out.ends_with("Some models are not loaded; recommendations may be unavailable."));
    }

    #[tokio::test]
    async fn test_download_writes_to_output() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models/cursos/download"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cursos.npy");
        let config = config_for(&server, &[]);
        let cmd = Cli::try_parse_from([
            "convo",
            "models",
            "download",
            "cursos",
            "-o",
            dest.to_str().unwrap(),
        ])
        .unwrap();

        let Some(Commands::Models { command }) = cmd.command else {
            panic!("expected a models command");
        };
        let out = command.execute(&config).await.unwrap();

        assert!(out.starts_with("Saved cursos (3 bytes)"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"abc");
    }
}
