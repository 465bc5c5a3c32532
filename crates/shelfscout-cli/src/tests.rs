use std::path::PathBuf;

use super::*;

pub(crate) fn base_config() -> CrawlConfig {
    CrawlConfig {
        log_level: "info".to_string(),
        search_url: "https://shop.example/en-ca/search?search=camera".to_string(),
        path_prefix: "/en-ca".to_string(),
        headless: false,
        window_width: 1200,
        window_height: 900,
        nav_timeout_secs: 30,
        click_timeout_secs: 10,
        consent_timeout_secs: 5,
        selector_timeout_secs: 5,
        app_state_timeout_secs: 10,
        settle_ms: 2000,
        scroll_settle_ms: 1500,
        product_delay_ms: 500,
        max_expansions: 200,
        expansion_budget_secs: 300,
        run_deadline_secs: 3600,
        listing_csv: PathBuf::from("searchresults.csv"),
        urls_path: PathBuf::from("product_urls.txt"),
        snapshot_path: PathBuf::from("debug_page.html"),
        products_csv: PathBuf::from("products_details.csv"),
    }
}

#[test]
fn url_override_replaces_search_url() {
    let mut config = base_config();
    let cli = Cli::try_parse_from(["shelfscout", "listing", "--url", "https://s.example/q"])
        .unwrap();

    apply_overrides(&mut config, &cli.command);

    assert_eq!(config.search_url, "https://s.example/q");
    assert_eq!(config.listing_csv, PathBuf::from("searchresults.csv"));
}

#[test]
fn parses_listing_with_defaults() {
    let cli = Cli::try_parse_from(["shelfscout", "listing"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Listing {
            url: None,
            out: None,
            urls_out: None,
            snapshot: None,
            headless: false,
        }
    ));
}

#[test]
fn parses_listing_overrides() {
    let cli = Cli::try_parse_from([
        "shelfscout",
        "listing",
        "--url",
        "https://shop.example/search?q=cam",
        "--urls-out",
        "urls.txt",
        "--headless",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Listing {
            url: Some(ref u),
            urls_out: Some(_),
            headless: true,
            ..
        } if u == "https://shop.example/search?q=cam"
    ));
}

#[test]
fn parses_products_command() {
    let cli = Cli::try_parse_from(["shelfscout", "products", "--input", "in.txt", "--out", "p.csv"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Products {
            input: Some(_),
            out: Some(_),
            headless: false,
        }
    ));
}

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["shelfscout", "run", "--headless"]).unwrap();
    assert!(matches!(cli.command, Commands::Run { headless: true }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["shelfscout"]).is_err());
}

#[test]
fn listing_overrides_replace_config_paths() {
    let mut config = base_config();
    let cli = Cli::try_parse_from([
        "shelfscout",
        "listing",
        "--out",
        "out/listing.csv",
        "--urls-out",
        "out/urls.txt",
        "--snapshot",
        "out/page.html",
        "--headless",
    ])
    .unwrap();

    apply_overrides(&mut config, &cli.command);

    assert_eq!(config.listing_csv, PathBuf::from("out/listing.csv"));
    assert_eq!(config.urls_path, PathBuf::from("out/urls.txt"));
    assert_eq!(config.snapshot_path, PathBuf::from("out/page.html"));
    assert!(config.headless);
}

#[test]
fn products_input_overrides_url_list_path() {
    let mut config = base_config();
    let cli = Cli::try_parse_from(["shelfscout", "products", "--input", "mine.txt"]).unwrap();

    apply_overrides(&mut config, &cli.command);

    assert_eq!(config.urls_path, PathBuf::from("mine.txt"));
    assert_eq!(config.products_csv, PathBuf::from("products_details.csv"));
    assert!(!config.headless);
}
