//! Unit tests for relay settings resolution.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn expect_error(result: Result<RelaySettings, RelayConfigError>, label: &str) -> RelayConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[derive(Debug)]
struct TempEnvFile {
    path: PathBuf,
}

impl TempEnvFile {
    fn with_contents(contents: &str) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("relay-env-{}", Uuid::new_v4()));
        std::fs::write(&path, contents)?;
        Ok(Self { path })
    }
}

impl Drop for TempEnvFile {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

#[rstest]
fn defaults_apply_when_only_the_token_is_set() {
    let env = mock_env(&[(BEARER_ENV, "AAAA")]);
    let settings = relay_settings_from_env(&env, &CliArgs::default()).expect("settings");

    assert_eq!(settings.token.expose(), "AAAA");
    assert_eq!(settings.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
    assert_eq!(settings.api_base_url.as_str(), "https://api.twitter.com/");
    assert!(settings.upstream_timeout.is_none());
}

#[rstest]
#[case::absent(&[])]
#[case::blank(&[(BEARER_ENV, "   ")])]
fn missing_token_is_fatal(#[case] vars: &[(&str, &str)]) {
    let env = mock_env(vars);
    let err = expect_error(
        relay_settings_from_env(&env, &CliArgs::default()),
        "expected missing token to fail",
    );
    assert!(matches!(err, RelayConfigError::MissingCredential));
}

#[rstest]
fn token_flag_overrides_environment() {
    let env = mock_env(&[(BEARER_ENV, "from-env")]);
    let args = CliArgs {
        token: Some("from-flag".to_owned()),
        ..CliArgs::default()
    };
    let settings = relay_settings_from_env(&env, &args).expect("settings");
    assert_eq!(settings.token.expose(), "from-flag");
}

#[rstest]
fn blank_token_flag_falls_back_to_environment() {
    let env = mock_env(&[(BEARER_ENV, "from-env")]);
    let args = CliArgs {
        token: Some(String::new()),
        ..CliArgs::default()
    };
    let settings = relay_settings_from_env(&env, &args).expect("settings");
    assert_eq!(settings.token.expose(), "from-env");
}

#[rstest]
fn flags_override_every_environment_value() {
    let env = mock_env(&[
        (BEARER_ENV, "AAAA"),
        (BIND_ADDR_ENV, "127.0.0.1:1"),
        (API_BASE_URL_ENV, "http://env.invalid"),
        (UPSTREAM_TIMEOUT_ENV, "1"),
    ]);
    let args = CliArgs {
        bind: Some("127.0.0.1:9000".to_owned()),
        api_base_url: Some("http://localhost:7000".to_owned()),
        upstream_timeout_secs: Some("5".to_owned()),
        ..CliArgs::default()
    };
    let settings = relay_settings_from_env(&env, &args).expect("settings");

    assert_eq!(settings.bind_addr.port(), 9000);
    assert_eq!(settings.api_base_url.as_str(), "http://localhost:7000/");
    assert_eq!(settings.upstream_timeout, Some(Duration::from_secs(5)));
}

#[rstest]
fn environment_values_are_used_without_flags() {
    let env = mock_env(&[
        (BEARER_ENV, "AAAA"),
        (BIND_ADDR_ENV, "127.0.0.1:8181"),
        (API_BASE_URL_ENV, "http://directory.local/base/"),
        (UPSTREAM_TIMEOUT_ENV, "30"),
    ]);
    let settings = relay_settings_from_env(&env, &CliArgs::default()).expect("settings");

    assert_eq!(settings.bind_addr.port(), 8181);
    assert_eq!(
        settings.api_base_url.as_str(),
        "http://directory.local/base/"
    );
    assert_eq!(settings.upstream_timeout, Some(Duration::from_secs(30)));
}

#[rstest]
#[case::bind(BIND_ADDR_ENV, "not-an-address")]
#[case::url(API_BASE_URL_ENV, "not a url")]
#[case::scheme(API_BASE_URL_ENV, "ftp://directory.local")]
#[case::timeout_text(UPSTREAM_TIMEOUT_ENV, "soon")]
#[case::timeout_zero(UPSTREAM_TIMEOUT_ENV, "0")]
fn invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
    let env = mock_env(&[(BEARER_ENV, "AAAA"), (name, value)]);
    let err = expect_error(
        relay_settings_from_env(&env, &CliArgs::default()),
        "expected invalid value to fail",
    );
    match err {
        RelayConfigError::InvalidValue {
            name: reported,
            value: raw,
            ..
        } => {
            assert_eq!(reported, name);
            assert_eq!(raw, value);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn missing_credential_message_names_both_sources() {
    let message = RelayConfigError::MissingCredential.to_string();
    assert!(message.contains("--token"));
    assert!(message.contains(BEARER_ENV));
}

#[rstest]
fn env_file_defaults_to_dotenv() {
    assert_eq!(CliArgs::default().env_file(), PathBuf::from(".env"));
}

#[rstest]
fn cli_parses_long_flags() {
    let args = CliArgs::try_parse_from([
        "handle-relay",
        "--token",
        "AAAA",
        "--bind",
        "127.0.0.1:9000",
        "--api-base-url",
        "http://localhost:7000",
        "--upstream-timeout-secs",
        "3",
        "--env-file",
        "relay.env",
    ])
    .expect("parse flags");

    assert_eq!(args.token.as_deref(), Some("AAAA"));
    assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9000"));
    assert_eq!(args.api_base_url.as_deref(), Some("http://localhost:7000"));
    assert_eq!(args.upstream_timeout_secs.as_deref(), Some("3"));
    assert_eq!(args.env_file(), PathBuf::from("relay.env"));
}

#[rstest]
fn missing_env_file_is_tolerated() {
    let path = std::env::temp_dir().join(format!("relay-absent-{}", Uuid::new_v4()));
    let loaded = load_env_file(&path).expect("absent file is not an error");
    assert!(!loaded);
}

#[rstest]
fn malformed_env_file_is_fatal() {
    let file = TempEnvFile::with_contents("THIS LINE IS NOT VALID\n").expect("write env file");
    let err = load_env_file(&file.path).expect_err("malformed file should fail");
    assert!(matches!(err, RelayConfigError::EnvFile { .. }));
}
