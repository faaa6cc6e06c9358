use figment::Jail;
use vigil_config::VigilConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("VIGIL_TOPICS__CLUSTERS", "3");
        jail.set_env("VIGIL_TRENDS__CASE_THRESHOLD", "250000");

        let config = VigilConfig::load().expect("config loads");
        assert_eq!(config.topics.clusters, 3);
        assert_eq!(config.trends.case_threshold, 250_000);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(".vigil/config.toml", "[topics]\nseed = 1\n")?;
        jail.set_env("VIGIL_TOPICS__SEED", "99");

        let config = VigilConfig::load().expect("config loads");
        assert_eq!(config.topics.seed, 99);
        Ok(())
    });
}
