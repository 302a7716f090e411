use tw_domain::config::{Config, ModelRole, ProviderKind};

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
}

#[test]
fn empty_file_yields_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.personas.default_persona, "cultural");
    assert_eq!(config.planner.agent_max_attempts, 3);
    assert_eq!(config.images.max_concurrency, 5);
    assert!(config.llm.providers.is_empty());
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(config.server.cors.allowed_origins.contains(&"http://localhost:*".to_string()));
    assert!(config.server.cors.allowed_origins.contains(&"http://127.0.0.1:*".to_string()));
}

#[test]
fn full_file_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9000

[[llm.providers]]
id = "gemini"
kind = "google"
auth = { keys = ["GEMINI_KEY_A", "GEMINI_KEY_B"] }

[llm.roles]
patch = "gemini/gemini-2.5-flash"

[personas]
catalog_path = "/var/lib/tripweave/personas.json"

[planner]
default_airlines = ["Vistara"]
hotel_price_min = 2000
hotel_price_max = 6000

[images]
enabled = false
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.llm.providers[0].kind, ProviderKind::Google);
    assert_eq!(config.llm.providers[0].auth.keys.len(), 2);
    assert_eq!(config.llm.role_spec(ModelRole::Patch), "gemini/gemini-2.5-flash");
    assert_eq!(config.llm.role_spec(ModelRole::Draft), "gemini/gemini-2.0-flash");
    assert_eq!(config.planner.default_airlines, vec!["Vistara".to_string()]);
    assert!(!config.images.enabled);
    assert!(config.validate().iter().all(|i| i.field != "planner.hotel_price_min"));
}

#[test]
fn agent_thinking_budget_defaults_to_dynamic() {
    let config = Config::default();
    assert_eq!(config.planner.agent_thinking_budget, Some(-1));
}
