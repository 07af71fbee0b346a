#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_bind_localhost() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:3001");
        assert_eq!(config.ui.phase, "beta");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [ui]
            title = "Analyst Hub"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, default_host());
        assert_eq!(config.server.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.ui.title, "Analyst Hub");
        assert_eq!(config.ui.docs_url, "https://docs.posit.co/connect/");
    }

    #[test]
    fn test_empty_toml_equals_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, HubError::Config(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::from_path("definitely/not/here/posit-hub.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("POSIT_HUB_HOST", "0.0.0.0"),
            ("POSIT_HUB_PORT", "9000"),
            ("RUST_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_bad_port_env_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == "POSIT_HUB_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("POSIT_HUB_PORT"));
    }
}
