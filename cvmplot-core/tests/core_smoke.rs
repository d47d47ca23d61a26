use cvmplot_core::{
    config::{PlotConfig, ScanConfig},
    read_knuth_file, read_naive_file, Error, Family, GroupKey, Manifest, ManifestEntry, NaiveFilter, Sample,
};
use std::{env, fs};

#[test]
fn family_display_and_parse() {
    assert_eq!(Family::Naive.to_string(), "naive");
    assert_eq!("KNUTH".parse::<Family>().unwrap(), Family::Knuth);
    assert!("treap".parse::<Family>().is_err());
    assert_eq!(Family::Naive.arity(), 3);
}

#[test]
fn filtered_naive_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("naive_32");
    fs::write(&path, "100/5/100 2000000\n\n200/5/100 4000000\n").unwrap();

    let data = read_naive_file(&path, Some(NaiveFilter::default())).unwrap();
    assert_eq!(data.len(), 1);
    let key = GroupKey::epsilon_delta(5, 100);
    assert_eq!(key.epsilon(), Some(0.5));
    assert_eq!(
        data.get(&key).unwrap().samples(),
        &[Sample::new(100, 2.0), Sample::new(200, 4.0)]
    );
}

#[test]
fn discover_orders_knuth_before_naive_and_skips_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path();
    fs::write(p.join("naive_32"), "10/5/100 1000000\n").unwrap();
    fs::write(p.join("knuth_32_b"), "10/16 3000000\n").unwrap();
    fs::write(p.join("knuth_32_a"), "10/8 2000000\n").unwrap();
    fs::write(p.join("knuth_64"), "10/8 1\n").unwrap();
    fs::write(p.join("knuth_32.pdf"), "not a log").unwrap();
    fs::write(p.join("knuth_vs_naive_32.svg"), "<svg/>").unwrap();
    fs::write(p.join("notes_32.txt"), "unrelated").unwrap();
    fs::create_dir(p.join("knuth_32_dir")).unwrap();

    let manifest = Manifest::discover(p, "32", &ScanConfig::default()).unwrap();
    let names: Vec<(Family, String)> = manifest
        .entries()
        .iter()
        .map(|e| (e.family, e.path.file_name().unwrap().to_string_lossy().into_owned()))
        .collect();
    assert_eq!(
        names,
        vec![
            (Family::Knuth, "knuth_32_a".to_string()),
            (Family::Knuth, "knuth_32_b".to_string()),
            (Family::Naive, "naive_32".to_string()),
        ]
    );

    let data = manifest.load(NaiveFilter::default()).unwrap();
    assert_eq!(data.len(), 3);
    assert!(data.contains_key(&GroupKey::buffer_size(8)));
    assert!(data.contains_key(&GroupKey::buffer_size(16)));
    assert!(data.contains_key(&GroupKey::epsilon_delta(5, 100)));
}

#[test]
fn discover_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("knuth_64"), "1/1 1\n").unwrap();
    let err = Manifest::discover(dir.path(), "32", &ScanConfig::default()).unwrap_err();
    assert!(err.to_string().contains("no benchmark logs"));
}

#[test]
fn manifest_later_entry_replaces_series() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("first"), "1/5 2000000\n").unwrap();
    fs::write(dir.path().join("second"), "3/5 4000000\n").unwrap();
    fs::write(
        dir.path().join("plots.toml"),
        "[[entry]]\nfamily = \"knuth\"\nsize = \"32\"\npath = \"first\"\n\n[[entry]]\nfamily = \"knuth\"\nsize = \"32\"\npath = \"second\"\n",
    )
    .unwrap();

    let manifest = Manifest::load_from_file(dir.path().join("plots.toml")).unwrap();
    assert_eq!(manifest.entries()[0], ManifestEntry::new(Family::Knuth, "32", dir.path().join("first")));
    let data = manifest.load(NaiveFilter::default()).unwrap();
    assert_eq!(data.get(&GroupKey::buffer_size(5)).unwrap().samples(), &[Sample::new(3, 4.0)]);
}

#[test]
fn malformed_log_stops_the_merge() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knuth_32");
    fs::write(&path, "1/5 2000000\n1/5/7 3\n").unwrap();
    let err = read_knuth_file(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }));
}

#[test]
fn config_default_is_valid_and_roundtrip_file() {
    let cfg = PlotConfig::default();
    assert!(cfg.validate().is_ok());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cvmplot.toml");
    cfg.write_to_file(&path).unwrap();
    let s = fs::read_to_string(&path).unwrap();
    assert!(s.contains("log_level"));
    let loaded = PlotConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg, loaded);
}

#[test]
fn config_env_override_and_validation() {
    // Preserve and restore environment variables to avoid leaking state between tests
    let keys = ["CVMPLOT_LOG_LEVEL", "CVMPLOT_WIDTH", "CVMPLOT_HEIGHT", "CVMPLOT_OUTPUT_DIR", "CVMPLOT_CONFIG"];
    let saved: Vec<Option<String>> = keys.iter().map(|k| env::var(k).ok()).collect();

    env::set_var("CVMPLOT_LOG_LEVEL", "debug");
    env::set_var("CVMPLOT_WIDTH", "1000");
    env::set_var("CVMPLOT_OUTPUT_DIR", "plots");
    let cfg = PlotConfig::from_env().unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.width, 1000);
    assert_eq!(cfg.output_dir.as_deref(), Some(std::path::Path::new("plots")));

    env::set_var("CVMPLOT_HEIGHT", "tall");
    assert!(PlotConfig::from_env().is_err());
    env::remove_var("CVMPLOT_HEIGHT");

    // An explicit config file is picked up first and env still wins over it.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "width = 640\nheight = 480\nlog_level = 'warn'\n").unwrap();
    env::set_var("CVMPLOT_CONFIG", &path);
    let (cfg, source) = PlotConfig::discover().unwrap();
    assert_eq!(source.as_deref(), Some(path.as_path()));
    assert_eq!((cfg.width, cfg.height), (1000, 480));
    assert_eq!(cfg.log_level, "debug");

    // Invalid level should fail validation when loaded from file rather than env
    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "log_level='nope'\n").unwrap();
    let err = PlotConfig::load_from_file(&bad).unwrap_err();
    assert!(format!("{err}").contains("invalid log_level"));

    for (k, v) in keys.iter().zip(saved) {
        match v {
            Some(v) => env::set_var(k, v),
            None => env::remove_var(k),
        }
    }
}

#[test]
fn config_builder_path() {
    let cfg = PlotConfig::builder()
        .log_level("warn")
        .size(1000, 600)
        .naive_filter(NaiveFilter::new(10, 50))
        .build()
        .unwrap();
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.naive_filter.epsilon, 10);
}
