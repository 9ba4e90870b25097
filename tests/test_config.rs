use paratrooper::config::{ConfigError, GameConfig};

#[test]
fn defaults_match_classic_layout() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.world.width, 800.0);
    assert_eq!(cfg.world.height, 600.0);
    assert_eq!(cfg.world.tick_rate, 60);
    assert_eq!(cfg.cannon_origin(), (400.0, 550.0));
    assert_eq!(cfg.soldier_ground_y(), 550.0);
    assert_eq!(cfg.cannon.min_angle, 30.0);
    assert_eq!(cfg.cannon.max_angle, 150.0);
    assert_eq!(cfg.bullet.speed, 7.0);
    assert_eq!(cfg.bullet.magazine, None);
    assert_eq!(cfg.aircraft.spawn_delay_min, 60);
    assert_eq!(cfg.aircraft.spawn_delay_max, 60);
    assert_eq!(cfg.soldier.proximity_threshold, 10.0);
    assert_eq!(cfg.soldier.soldiers_to_lose, 3);
    assert!(cfg.validate().is_ok());
}

#[test]
fn empty_document_is_default() {
    let cfg = GameConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn partial_document_overrides_only_given_fields() {
    let text = r#"
        [aircraft]
        speed = 1.2
        spawn_delay_min = 30
        spawn_delay_max = 120
        side_switch_chance = 0.7

        [bullet]
        magazine = 50
    "#;
    let cfg = GameConfig::from_toml_str(text).unwrap();
    assert_eq!(cfg.aircraft.speed, 1.2);
    assert_eq!(cfg.aircraft.spawn_delay_min, 30);
    assert_eq!(cfg.aircraft.spawn_delay_max, 120);
    assert_eq!(cfg.aircraft.width, 30.0);
    assert_eq!(cfg.bullet.magazine, Some(50));
    assert_eq!(cfg.bullet.speed, 7.0);
    assert_eq!(cfg.world, GameConfig::default().world);
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[world\nwidth = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = GameConfig::from_toml_str("[world]\nwidth = \"wide\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn inconsistent_values_are_rejected() {
    let cases = [
        "[world]\nwidth = 0.0",
        "[world]\ntick_rate = 0",
        "[cannon]\nmin_angle = 160.0",
        "[cannon]\nstart_angle = 10.0",
        "[cannon]\nturn_step = 0.0",
        "[bullet]\nmagazine = 0",
        "[aircraft]\nspawn_delay_min = 90\nspawn_delay_max = 30",
        "[aircraft]\nspawn_delay_min = 0",
        "[aircraft]\nside_switch_chance = 1.5",
        "[soldier]\nsoldiers_to_lose = 0",
    ];
    for text in cases {
        let err = GameConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{text} should be invalid");
    }
}

#[test]
fn nan_values_are_rejected() {
    let cases = [
        "[world]\nwidth = nan",
        "[world]\nheight = inf",
        "[cannon]\nturn_step = nan",
        "[cannon]\nmin_angle = nan",
        "[cannon]\nmax_angle = nan",
        "[cannon]\nstart_angle = nan",
        "[bullet]\nspeed = nan",
        "[bullet]\nradius = nan",
        "[aircraft]\nspeed = nan",
        "[parachute]\nfall_speed = nan",
        "[soldier]\nwalk_speed = nan",
        "[soldier]\nproximity_threshold = nan",
    ];
    for text in cases {
        let err = GameConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{text} should be invalid");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("paratrooper-does-not-exist.toml");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("paratrooper-test-{}.toml", std::process::id()));
    std::fs::write(&path, "[soldier]\nsoldiers_to_lose = 5\n").unwrap();
    let cfg = GameConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(cfg.soldier.soldiers_to_lose, 5);
}
