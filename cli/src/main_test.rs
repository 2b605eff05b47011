use super::*;

#[test]
fn parses_login_with_defaults() {
    let cli = Cli::try_parse_from(["account", "login", "--email", "a@b.com", "--password", "secret1"]).unwrap();
    assert_eq!(cli.token_file, PathBuf::from(DEFAULT_TOKEN_FILE));
    assert!(matches!(cli.command, Command::Login { ref email, .. } if email == "a@b.com"));
}

#[test]
fn parses_update_profile_partial_fields() {
    let cli = Cli::try_parse_from([
        "account",
        "--base-url",
        "https://api.example.test",
        "update-profile",
        "--first-name",
        "Augusta",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "https://api.example.test");
    let Command::UpdateProfile(args) = cli.command else {
        panic!("expected update-profile");
    };
    assert_eq!(args.first_name.as_deref(), Some("Augusta"));
    assert!(args.email.is_none());
}

#[test]
fn register_requires_names() {
    let result = Cli::try_parse_from(["account", "register", "--email", "a@b.com", "--password", "secret1"]);
    assert!(result.is_err());
}

#[tokio::test]
async fn empty_update_is_rejected_before_any_request() {
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let storage = Arc::new(account_client::session::MemoryTokenStorage::with_token("tok"));
    let state = AppState::from_config(config, storage, Arc::new(HistoryNavigator::new())).unwrap();
    let command = Command::UpdateProfile(UpdateProfileArgs { email: None, first_name: None, last_name: None, avatar: None });

    let err = run(&state, command).await.unwrap_err();
    assert!(matches!(err, CliError::EmptyPatch));
}
