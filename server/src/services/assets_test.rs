use super::*;

fn site_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("client.js"), "console.log('share');").expect("write js");
    std::fs::write(dir.path().join("style.css"), "body {}").expect("write css");
    std::fs::write(dir.path().join("config.json"), "{}").expect("write json");
    std::fs::create_dir(dir.path().join("nested.js")).expect("mkdir");
    dir
}

#[test]
fn scan_allows_only_top_level_scripts() {
    let dir = site_dir();
    let assets = SiteAssets::scan(dir.path()).expect("scan");
    assert_eq!(assets.file_count(), 1);
    assert!(assets.is_allowed("client.js"));
    assert!(!assets.is_allowed("style.css"));
    assert!(!assets.is_allowed("config.json"));
    assert!(!assets.is_allowed("nested.js"));
}

#[test]
fn scan_missing_dir_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(SiteAssets::scan(&dir.path().join("missing")).is_err());
}

#[test]
fn empty_allows_nothing() {
    let assets = SiteAssets::empty(Path::new("site"));
    assert_eq!(assets.file_count(), 0);
    assert!(!assets.is_allowed("client.js"));
}

#[tokio::test]
async fn read_returns_allow_listed_bytes() {
    let dir = site_dir();
    let assets = SiteAssets::scan(dir.path()).expect("scan");
    let bytes = assets.read("client.js").await.expect("read");
    assert_eq!(bytes, b"console.log('share');");
}

#[tokio::test]
async fn read_rejects_names_outside_allow_list() {
    let dir = site_dir();
    let assets = SiteAssets::scan(dir.path()).expect("scan");
    for name in ["style.css", "../client.js", "CLIENT.JS", ""] {
        assert!(
            matches!(assets.read(name).await, Err(AssetError::NotAllowed(_))),
            "{name:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn read_reports_files_removed_after_scan() {
    let dir = site_dir();
    let assets = SiteAssets::scan(dir.path()).expect("scan");
    std::fs::remove_file(dir.path().join("client.js")).expect("remove");
    assert!(matches!(assets.read("client.js").await, Err(AssetError::Read { .. })));
}
