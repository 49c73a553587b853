//! Traversal integration tests over the offline fixture site.

use aranea_core::{
    CancellationToken, Extractor, FetchConfig, Fetcher, MapperConfig, Page, SiteMapper, mirror_map,
    patterns,
};

/// Absolute `file://` URL of a fixture page.
fn fixture_url(relative: &str) -> String {
    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures");
    let fixtures = fixtures.canonicalize().expect("fixtures dir should exist");
    format!("file://{}/{}", fixtures.display(), relative)
}

fn mapper(config: MapperConfig) -> SiteMapper {
    SiteMapper::new(config).expect("mapper should build")
}

#[tokio::test]
async fn depth_zero_yields_exactly_the_barren_root() {
    let root = fixture_url("linear/index.html");
    let config = MapperConfig::builder().max_depth(0).build();

    let report = mapper(config).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 1);
    let page = report.pages.get(&root).unwrap();
    assert!(page.html.is_empty());
    assert!(page.children.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn depth_one_records_children_as_barren_placeholders() {
    let root = fixture_url("linear/index.html");
    let config = MapperConfig::builder().max_depth(1).build();

    let report = mapper(config).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 3);

    let index = report.pages.get(&root).unwrap();
    assert_eq!(index.children.len(), 2);
    assert!(!index.html.is_empty());

    let child = report.pages.get(&fixture_url("linear/child_00.html")).unwrap();
    assert!(child.html.is_empty());
    assert!(child.children.is_empty());

    // The grandchild is beyond the barren wave and never discovered.
    assert!(!report.pages.contains(&fixture_url("linear/dir/child_10.html")));
}

#[tokio::test]
async fn depth_two_reaches_the_grandchild() {
    let root = fixture_url("linear/index.html");
    let config = MapperConfig::builder().max_depth(2).build();

    let report = mapper(config).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 4);
    let grandchild = report.pages.get(&fixture_url("linear/dir/child_10.html")).unwrap();
    assert!(grandchild.html.is_empty());
}

#[tokio::test]
async fn unlimited_depth_maps_the_whole_component_live() {
    let root = fixture_url("linear/index.html");

    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 4);
    for page in &report.pages {
        assert!(!page.html.is_empty(), "{} should have been fetched live", page.url);
    }

    // The grandchild's ../index.html link resolves back to the root.
    let grandchild = report.pages.get(&fixture_url("linear/dir/child_10.html")).unwrap();
    assert!(grandchild.children.contains(&root));
}

#[tokio::test]
async fn cycles_terminate_and_deduplicate() {
    let root = fixture_url("recursive/index.html");

    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.contains(&fixture_url("recursive/loop.html")));
}

#[tokio::test]
async fn external_links_are_listed_but_never_fetched() {
    let root = fixture_url("non_local/index.html");

    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();

    let local = fixture_url("non_local/local.html");
    let urls: Vec<&str> = report.pages.urls().collect();
    assert_eq!(urls, [root.as_str(), local.as_str()]);

    let index = report.pages.get(&root).unwrap();
    assert!(index.children.contains("https://example.com/external.html"));
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn fetch_failures_are_reported_without_ending_the_run() {
    let root = fixture_url("broken/index.html");

    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.contains(&fixture_url("broken/good.html")));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, fixture_url("broken/missing.html"));
}

#[tokio::test]
async fn map_membership_is_independent_of_concurrency() {
    let root = fixture_url("linear/index.html");

    let sequential = mapper(MapperConfig::builder().concurrency(1).build())
        .run(&root)
        .await
        .unwrap();
    let concurrent = mapper(MapperConfig::builder().concurrency(4).build())
        .run(&root)
        .await
        .unwrap();

    let sequential_urls: Vec<&str> = sequential.pages.urls().collect();
    let concurrent_urls: Vec<&str> = concurrent.pages.urls().collect();
    assert_eq!(sequential_urls, concurrent_urls);
}

#[tokio::test]
async fn cancellation_before_the_first_fetch_returns_an_empty_map() {
    let root = fixture_url("linear/index.html");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = mapper(MapperConfig::default())
        .run_with_cancel(&root, cancel)
        .await
        .unwrap();

    assert!(report.pages.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn mapped_pages_feed_straight_into_extraction() {
    let root = fixture_url("contact/index.html");

    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();
    assert_eq!(report.pages.len(), 2);

    let extractor = Extractor::new([patterns::EMAIL, patterns::PHONE_NUMBER]).unwrap();
    let found = extractor.extract(&report.pages);

    assert!(found.contains("test.email@test.com"));
    assert!(found.contains("(000) 000-0000"));
    assert!(found.contains("billing@test.com"));
    assert!(found.contains("111-222-3333"));
    assert!(!found.contains("decoy.email@decoy.test"));
}

#[tokio::test]
async fn mirroring_writes_every_fetched_page() {
    let root = fixture_url("linear/index.html");
    let report = mapper(MapperConfig::default()).run(&root).await.unwrap();

    let dest = tempfile::tempdir().unwrap();
    let written = mirror_map(&report.pages, dest.path()).unwrap();

    assert_eq!(written, 4);
}

#[tokio::test]
async fn refresh_reparses_in_place_without_changing_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    std::fs::write(&path, r#"<a href="first.html">first</a>"#).unwrap();

    let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
    let url = format!("file://{}", path.display());
    let mut page = Page::fetch(&url, &fetcher).await.unwrap();
    assert_eq!(page.children.len(), 1);

    std::fs::write(&path, r#"<a href="first.html">a</a><a href="second.html">b</a>"#).unwrap();
    page.refresh(&fetcher).await.unwrap();

    assert_eq!(page.url, url);
    assert_eq!(page.children.len(), 2);
    assert!(page.html.contains("second.html"));
}
