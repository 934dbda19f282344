use std::collections::HashMap;

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("roster.toml"), env_of(&[]));
    assert_eq!(settings, Settings::default());
    assert!(settings.require_token().is_err());
    assert!(settings.require_ministry().is_err());
}

#[test]
fn file_values_are_overridden_by_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roster.toml");
    fs::write(
        &path,
        "church_api_url = \"https://file.example/api\"\napi_token = \"from-file\"\nministry_id = 5\nrequest_timeout_secs = 9\n",
    )
    .expect("write settings");

    let from_file = load_settings_from(&path, env_of(&[]));
    assert_eq!(from_file.church_api_url, "https://file.example/api");
    assert_eq!(from_file.require_token().expect("token"), "from-file");
    assert_eq!(from_file.require_ministry().expect("ministry"), MinistryId(5));
    assert_eq!(from_file.request_timeout(), Duration::from_secs(9));

    let overridden = load_settings_from(
        &path,
        env_of(&[
            ("API_CHURCH_URL", "https://env.example/api"),
            ("JWT_TOKEN", "short-name"),
            ("APP__API_TOKEN", "app-name"),
            ("MINISTRY_ID", "77"),
        ]),
    );
    assert_eq!(overridden.church_api_url, "https://env.example/api");
    assert_eq!(overridden.api_token.as_deref(), Some("app-name"));
    assert_eq!(overridden.ministry_id, Some(MinistryId(77)));
}

#[test]
fn bad_values_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roster.toml");
    fs::write(&path, "this is = = not toml").expect("write settings");

    let settings = load_settings_from(
        &path,
        env_of(&[
            ("MINISTRY_ID", "abc"),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
            ("JWT_TOKEN", "   "),
        ]),
    );
    assert_eq!(settings.ministry_id, None);
    assert_eq!(settings.request_timeout_secs, 30);
    assert!(settings.require_token().is_err());
}

#[test]
fn mistyped_file_is_ignored_as_a_whole() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roster.toml");
    fs::write(
        &path,
        "church_api_url = \"https://file.example/api\"\nministry_id = \"5\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env_of(&[]));
    assert_eq!(settings, Settings::default());
}
