//! Offline asset cache against a mock origin.

use super::init_test_env;
use api_tester::assets::{AssetCache, AssetOrigin, CacheError, HttpAssetSource, ASSETS, CACHE_NAME};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn origin_with_all_assets() -> MockServer {
    let server = MockServer::start().await;
    for asset in ASSETS {
        Mock::given(method("GET"))
            .and(path(*asset))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("asset {}", asset)))
            .mount(&server)
            .await;
    }
    server
}

#[tokio::test]
async fn test_install_activate_and_serve_offline() {
    init_test_env();
    let server = origin_with_all_assets().await;
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("nts-api-cache-v0")).unwrap();

    let cache = AssetCache::new(dir.path());
    let source = HttpAssetSource::new(&server.uri()).unwrap();

    assert_eq!(cache.install(&source).await.unwrap(), ASSETS.len());
    assert_eq!(cache.activate().unwrap(), vec!["nts-api-cache-v0"]);

    // origin gone: cached assets still served
    drop(server);
    assert_eq!(cache.get_cached("/style.css").unwrap(), b"asset /style.css");
    assert!(dir.path().join(CACHE_NAME).join("index.html").is_file());
}

#[tokio::test]
async fn test_install_fails_when_one_asset_is_missing() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = AssetCache::new(dir.path());
    let source = HttpAssetSource::new(&server.uri()).unwrap();

    let err = cache.install(&source).await.unwrap_err();
    assert!(matches!(err, CacheError::Fetch { .. }));
    assert!(!cache.version_dir().exists());
}

#[tokio::test]
async fn test_cache_miss_goes_to_network() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extra.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("console.log(1)"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = AssetCache::new(dir.path());
    let source = HttpAssetSource::new(&server.uri()).unwrap();

    for _ in 0..2 {
        let (bytes, origin) = cache.fetch("/extra.js", &source).await.unwrap();
        assert_eq!(origin, AssetOrigin::Network);
        assert_eq!(bytes, b"console.log(1)");
    }
}
