use std::time::Duration;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use kegg_pathway_crawler::config::{Config, ConfigLoader, CrawlConfig, apply_overrides};
use kegg_pathway_crawler::error::CrawlError;

#[test]
fn file_values_override_defaults() {
    let config = Config {
        base_url: Some("https://mirror.example.org/".to_string()),
        category: Some("Animals".to_string()),
        retry_count: Some(5),
        request_delay_secs: Some(0.25),
        ..Config::default()
    };

    let resolved = ConfigLoader::resolve_config(config).unwrap();
    assert_eq!(resolved.base_url, "https://mirror.example.org");
    assert_eq!(resolved.category, "Animals");
    assert_eq!(resolved.retry_count, 5);
    assert_eq!(resolved.request_delay, Duration::from_millis(250));
    assert_eq!(resolved.retry_delay, Duration::from_secs(5));
    assert_eq!(
        resolved.listing_url(),
        "https://mirror.example.org/kegg-bin/show_organism?menu_type=category_info&category=Animals"
    );
}

#[test]
fn zero_retry_count_is_rejected() {
    let config = Config {
        retry_count: Some(0),
        ..Config::default()
    };
    let err = ConfigLoader::resolve_config(config).unwrap_err();
    assert_matches!(err, CrawlError::InvalidConfig(_));
}

#[test]
fn negative_delay_is_rejected() {
    let config = Config {
        retry_delay_secs: Some(-1.0),
        ..Config::default()
    };
    let err = ConfigLoader::resolve_config(config).unwrap_err();
    assert_matches!(err, CrawlError::InvalidConfig(_));
}

#[test]
fn loads_json_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kegg-crawl.json");
    std::fs::write(
        &path,
        r#"{ "category": "Fungi", "output_path": "fungi.csv", "request_timeout_secs": 30 }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.category, "Fungi");
    assert_eq!(resolved.output_path, Utf8PathBuf::from("fungi.csv"));
    assert_eq!(resolved.request_timeout, Duration::from_secs(30));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("absent.json");
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, CrawlError::ConfigRead(_));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kegg-crawl.json");
    std::fs::write(&path, "{ retry_count: ").unwrap();
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, CrawlError::ConfigParse(_));
}

#[test]
fn command_line_overrides_apply_last() {
    let resolved = apply_overrides(
        CrawlConfig::default(),
        Some("out/plants.csv".to_string()),
        Some(" Protists ".to_string()),
    )
    .unwrap();
    assert_eq!(resolved.output_path, Utf8PathBuf::from("out/plants.csv"));
    assert_eq!(resolved.category, "Protists");

    let err = apply_overrides(CrawlConfig::default(), None, Some("  ".to_string())).unwrap_err();
    assert_matches!(err, CrawlError::InvalidConfig(_));
}
