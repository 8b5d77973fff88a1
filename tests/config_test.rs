#[cfg(test)]
mod config_tests {
    /// Test that the documented config file shape is valid TOML
    #[test]
    fn test_full_config_shape() {
        let settings_toml = r#"
[hub]
api_base = "https://api-inference.huggingface.co"
token_env = "HUGGINGFACEHUB_API_TOKEN"

[classifier]
model = "facebook/deit-base-distilled-patch16-224"

[embedder]
model = "microsoft/resnet-50"
dimension = 2048

[stylist]
model = "google/flan-t5-small"
max_new_tokens = 100

[closet]
db_path = "/home/user/.local/share/closet/closet.json"
"#;

        let parsed: Result<toml::Value, _> = toml::from_str(settings_toml);
        assert!(parsed.is_ok(), "Settings TOML should be valid");

        let value = parsed.unwrap();
        assert_eq!(
            value["embedder"]["dimension"].as_integer(),
            Some(2048)
        );
        assert_eq!(
            value["hub"]["token_env"].as_str(),
            Some("HUGGINGFACEHUB_API_TOKEN")
        );
    }

    /// Test embedder section structure
    #[test]
    fn test_embedder_config_structure() {
        let embedder_toml = r#"
model = "google/vit-base-patch16-224"
dimension = 768
"#;

        let parsed: toml::Value = toml::from_str(embedder_toml).unwrap();

        assert_eq!(parsed["model"].as_str(), Some("google/vit-base-patch16-224"));
        assert!(parsed["dimension"].as_integer().is_some());
    }

    /// Test stylist section structure
    #[test]
    fn test_stylist_config_structure() {
        let stylist_toml = r#"
model = "google/flan-t5-small"
max_new_tokens = 100
"#;

        let parsed: toml::Value = toml::from_str(stylist_toml).unwrap();

        assert_eq!(parsed["model"].as_str(), Some("google/flan-t5-small"));
        assert_eq!(parsed["max_new_tokens"].as_integer(), Some(100));
    }
}
