use super::{apply_env_overrides, apply_file_settings, Settings};

use std::{collections::HashMap, time::Duration};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_seed_and_respond_immediately() {
    let settings = Settings::default();
    assert!(settings.seed_data);
    assert_eq!(settings.response_delay(), Duration::ZERO);
    assert_eq!(settings.server_bind, "127.0.0.1:8443");
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
        bind_addr = "0.0.0.0:9000"
        seed_data = false
        response_delay_ms = 400
        "#,
    )
    .expect("valid toml");

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert!(!settings.seed_data);
    assert_eq!(settings.response_delay(), Duration::from_millis(400));
}

#[test]
fn malformed_file_settings_are_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, "response_delay_ms = \"slow\"").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
}

#[test]
fn unparseable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env(&[
            ("APP__SEED_DATA", "maybe"),
            ("APP__RESPONSE_DELAY_MS", "-5"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn seed_flag_accepts_common_spellings() {
    for (raw, expected) in [("off", false), ("0", false), ("TRUE", true), ("yes", true)] {
        let mut settings = Settings {
            seed_data: !expected,
            ..Settings::default()
        };
        apply_env_overrides(&mut settings, env(&[("APP__SEED_DATA", raw)]));
        assert_eq!(settings.seed_data, expected, "{raw}");
    }
}
