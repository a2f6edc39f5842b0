use super::*;

fn offline_client() -> ApiClient {
    // Never contacted; the dispatcher must reject these before any request.
    ApiClient::new("http://127.0.0.1:1/api/v1", None).unwrap()
}

#[tokio::test]
async fn tui_never_reaches_the_api_dispatcher() {
    let client = offline_client();
    let cfg = ConsoleConfig::default();

    let err = run_command(Commands::Tui, &client, &cfg)
        .await
        .expect_err("tui is routed before the runtime");
    assert!(format!("{}", err).contains("does not run"));
}

#[tokio::test]
async fn config_never_reaches_the_api_dispatcher() {
    let client = offline_client();
    let cfg = ConsoleConfig::default();

    let command = Commands::Config {
        command: ConfigCommands::Show { json: false },
    };
    let err = run_command(command, &client, &cfg)
        .await
        .expect_err("config is routed before the runtime");
    assert!(format!("{}", err).contains("does not run"));
}

#[test]
fn split_tags_trims_and_drops_empties() {
    assert_eq!(
        split_tags("slack:C1, docs ,,".to_string()),
        vec!["slack:C1".to_string(), "docs".to_string()]
    );
}
