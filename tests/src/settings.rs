#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use ray_stats::{
        gate::ENABLE_ENV_VAR,
        settings::{DEFAULT_OUTPUT_FILE, OUTPUT_FILE_ENV_VAR},
        CollectionGate, StatsSettings,
    };

    #[test]
    fn default() {
        let s = StatsSettings::default();
        assert!(!s.enabled);
        assert!(!s.gate().is_enabled());
        assert_eq!(s.output_path, None);
        assert_eq!(s.resolved_output_path(), PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(DEFAULT_OUTPUT_FILE, "ray_intersection_stats.csv");
    }

    #[test]
    fn resolved_output_path() {
        let s = StatsSettings {
            enabled: true,
            output_path: Some(PathBuf::from("out/stats.csv")),
        };
        assert!(s.gate().is_enabled());
        assert_eq!(s.resolved_output_path(), PathBuf::from("out/stats.csv"));
    }

    #[test]
    fn from_yaml() {
        let s = StatsSettings::from_yaml("enabled: true\noutput_path: run0.csv\n").unwrap();
        assert!(s.enabled);
        assert_eq!(s.output_path, Some(PathBuf::from("run0.csv")));

        // Missing fields fall back to defaults
        let s = StatsSettings::from_yaml("enabled: true\n").unwrap();
        assert!(s.enabled);
        assert_eq!(s.output_path, None);
        let s = StatsSettings::from_yaml("{}").unwrap();
        assert_eq!(s, StatsSettings::default());

        assert!(StatsSettings::from_yaml("enabled: [1, 2]").is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let s = StatsSettings {
            enabled: true,
            output_path: Some(PathBuf::from("stats/run1.csv")),
        };
        let yaml = serde_yaml::to_string(&s).unwrap();
        assert_eq!(StatsSettings::from_yaml(&yaml).unwrap(), s);
    }

    #[test]
    fn load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled: false").unwrap();
        writeln!(file, "output_path: elsewhere.csv").unwrap();
        file.flush().unwrap();

        let s = StatsSettings::load(file.path()).unwrap();
        assert!(!s.enabled);
        assert_eq!(s.output_path, Some(PathBuf::from("elsewhere.csv")));

        let dir = tempfile::tempdir().unwrap();
        let err = StatsSettings::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.starts_with("Could not open"));
    }

    // The only test touching these variables, so it can't race with the others
    #[test]
    fn from_env() {
        std::env::remove_var(ENABLE_ENV_VAR);
        std::env::remove_var(OUTPUT_FILE_ENV_VAR);
        assert_eq!(StatsSettings::from_env(), StatsSettings::default());
        assert!(!CollectionGate::from_env().is_enabled());

        std::env::set_var(ENABLE_ENV_VAR, "true");
        std::env::set_var(OUTPUT_FILE_ENV_VAR, "env_stats.csv");
        let s = StatsSettings::from_env();
        assert!(s.enabled);
        assert_eq!(s.resolved_output_path(), PathBuf::from("env_stats.csv"));
        assert!(CollectionGate::from_env().is_enabled());

        std::env::set_var(ENABLE_ENV_VAR, "yes");
        assert!(!StatsSettings::from_env().enabled);

        std::env::remove_var(ENABLE_ENV_VAR);
        std::env::remove_var(OUTPUT_FILE_ENV_VAR);
    }
}
