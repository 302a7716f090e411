//! Role resolution across configured providers.

use std::collections::HashMap;
use tw_domain::config::{AuthConfig, LlmConfig, ModelRole, ProviderConfig, ProviderKind};
use tw_providers::ProviderRegistry;

fn provider(id: &str, key: &str) -> ProviderConfig {
    ProviderConfig {
        id: id.into(),
        kind: ProviderKind::Google,
        base_url: "http://127.0.0.1:9".into(),
        auth: AuthConfig {
            key: Some(key.into()),
            ..AuthConfig::default()
        },
        default_model: None,
    }
}

#[test]
fn roles_fall_back_to_builtin_models() {
    let config = LlmConfig {
        providers: vec![provider("gemini", "k1")],
        ..LlmConfig::default()
    };
    let reg = ProviderRegistry::from_config(&config).unwrap();

    let draft = reg.for_role(ModelRole::Draft).unwrap();
    assert_eq!(draft.provider.provider_id(), "gemini");
    assert_eq!(draft.model, "gemini-2.0-flash");

    let patch = reg.for_role(ModelRole::Patch).unwrap();
    assert_eq!(patch.model, "gemini-2.5-pro");
}

#[test]
fn configured_role_routes_to_named_provider() {
    let mut roles = HashMap::new();
    roles.insert("agents".to_string(), "backup/gemini-2.5-flash".to_string());
    let config = LlmConfig {
        providers: vec![provider("gemini", "k1"), provider("backup", "k2")],
        roles,
        ..LlmConfig::default()
    };
    let reg = ProviderRegistry::from_config(&config).unwrap();
    assert_eq!(reg.list_providers(), vec!["backup", "gemini"]);

    let agents = reg.for_role(ModelRole::Agents).unwrap();
    assert_eq!(agents.provider.provider_id(), "backup");
    assert_eq!(agents.model, "gemini-2.5-flash");

    let listed = reg.list_roles();
    assert_eq!(listed.len(), ModelRole::ALL.len());
    assert!(listed.contains(&("agents".to_string(), "backup/gemini-2.5-flash".to_string())));
}

#[test]
fn provider_without_credentials_is_skipped() {
    let config = LlmConfig {
        providers: vec![ProviderConfig {
            auth: AuthConfig {
                env: Some("TW_TEST_UNSET_KEY_VAR_98765".into()),
                ..AuthConfig::default()
            },
            ..provider("gemini", "unused")
        }],
        ..LlmConfig::default()
    };
    let reg = ProviderRegistry::from_config(&config).unwrap();
    assert!(reg.is_empty());
    assert!(reg.for_role(ModelRole::Discover).is_err());
}

#[test]
fn malformed_role_spec_is_config_error() {
    let mut roles = HashMap::new();
    roles.insert("draft".to_string(), "no-slash-here".to_string());
    let config = LlmConfig {
        providers: vec![provider("gemini", "k1")],
        roles,
        ..LlmConfig::default()
    };
    let reg = ProviderRegistry::from_config(&config).unwrap();
    let err = reg.for_role(ModelRole::Draft).unwrap_err();
    assert!(err.to_string().contains("malformed"));
}
