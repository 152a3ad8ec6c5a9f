use super::{apply_env, apply_file, Settings, DEFAULT_PORT};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_listen_on_port_3001_with_half_second_delay() {
    let settings = Settings::default();
    assert_eq!(settings.port, DEFAULT_PORT);
    assert_eq!(settings.response_delay(), Duration::from_millis(500));
    assert_eq!(
        settings.bind_addr().expect("addr").to_string(),
        "0.0.0.0:3001"
    );
}

#[test]
fn port_env_overrides_default_and_prefixed_key_wins() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("PORT", "4000")]));
    assert_eq!(settings.port, 4000);

    apply_env(
        &mut settings,
        env_from(&[("PORT", "4000"), ("APP__PORT", "4100")]),
    );
    assert_eq!(settings.port, 4100);
}

#[test]
fn unparsable_port_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("PORT", "not-a-port")]));
    assert_eq!(settings.port, DEFAULT_PORT);
}

#[test]
fn delay_and_customer_path_come_from_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("APP__RESPONSE_DELAY_MS", "0"),
            ("CUSTOMERS_PATH", "/tmp/customers.json"),
        ]),
    );
    assert_eq!(settings.response_delay(), Duration::ZERO);
    assert_eq!(
        settings.customers_path,
        Some(PathBuf::from("/tmp/customers.json"))
    );
}

#[test]
fn invalid_bind_host_is_reported() {
    let settings = Settings {
        bind_host: "not a host".into(),
        ..Settings::default()
    };
    assert!(settings.bind_addr().is_err());
}

#[test]
fn settings_file_values_are_applied() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("customer_server_settings_{suffix}.toml"));
    fs::write(
        &path,
        "bind_host = \"127.0.0.1\"\nport = \"8080\"\nresponse_delay_ms = \"25\"\n",
    )
    .expect("write settings");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);
    assert_eq!(settings.bind_host, "127.0.0.1");
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.response_delay_ms, 25);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_settings_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, &env::temp_dir().join("definitely-missing-server.toml"));
    assert_eq!(settings, Settings::default());
}
