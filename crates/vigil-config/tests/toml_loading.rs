//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use vigil_config::{ConfigError, VigilConfig};

#[test]
fn loads_topics_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[topics]
clusters = 8
max_features = 1200
seed = 7
restarts = 3
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.topics.clusters, 8);
        assert_eq!(config.topics.max_features, 1200);
        assert_eq!(config.topics.seed, 7);
        assert_eq!(config.topics.restarts, 3);
        // Untouched keys keep their defaults.
        assert_eq!(config.topics.top_terms, 10);
        Ok(())
    });
}

#[test]
fn loads_trends_and_general_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[trends]
lookback = 5
article_threshold = 2
case_threshold = 5000

[general]
start_year = 2019
end_year = 2022
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.trends.lookback, 5);
        assert_eq!(config.trends.article_threshold, 2);
        assert_eq!(config.trends.case_threshold, 5000);
        assert_eq!(config.general.start_year, 2019);
        assert_eq!(config.general.resolved_end_year(), 2022);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(
            ".vigil/config.toml",
            r#"
[sources]
translate_url = "http://localhost:5000"
translate_target = "es"
"#,
        )?;

        let config = VigilConfig::load().expect("config loads");
        assert!(config.sources.translation_enabled());
        assert_eq!(config.sources.translate_target, "es");
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(
            ".vigil/config.toml",
            r#"
[topics]
max_features = 0
"#,
        )?;

        let config = VigilConfig::load().expect("config loads");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "topics.max_features"));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(
            ".vigil/config.toml",
            r#"
[topics]
clusters = "many"
"#,
        )?;

        let result = VigilConfig::load();
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
