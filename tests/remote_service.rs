mod common;

use common::{ORIGIN, Reply, ScriptedTransport, html_index, json_index, service};
use httpsh::vfs::{ListingResult, VirtualPath};

#[tokio::test]
async fn test_structured_listing_keeps_server_order() {
    let transport = ScriptedTransport::new();
    transport.route(
        "/",
        vec![Reply::ok(r#"[{"name":"a.txt","type":"file"},{"name":"sub","type":"directory"}]"#)],
    );
    let service = service(&transport);

    let listing = service.list_directory(&VirtualPath::root()).await;

    assert_eq!(listing.names(), vec!["a.txt", "sub"]);
    assert_eq!(transport.requests(), vec![ORIGIN.to_string()]);
}

#[tokio::test]
async fn test_structured_failure_falls_back_to_html() {
    let transport = ScriptedTransport::new();
    transport.route(
        "/",
        vec![
            Reply::Status(500, "internal error".to_string()),
            Reply::ok(r#"<a href="../">../</a><a href="a.txt">a.txt</a>"#),
        ],
    );
    let service = service(&transport);

    let listing = service.list_directory(&VirtualPath::root()).await;

    assert_eq!(listing.names(), vec!["a.txt"]);
    assert_eq!(service.metrics().request_count(), 2);
}

#[tokio::test]
async fn test_html_body_on_success_is_scraped_without_refetch() {
    let transport = ScriptedTransport::new();
    transport.route(
        "/docs/",
        vec![Reply::ok(&html_index("/docs/", &["guides/", "readme.md"]))],
    );
    let service = service(&transport);

    let listing = service.list_directory(&VirtualPath::parse("/docs/")).await;

    assert_eq!(listing.names(), vec!["guides/", "readme.md"]);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_on_both_paths_is_absent() {
    let transport = ScriptedTransport::new();
    transport.route("/gone/", vec![Reply::ConnectionRefused]);
    let service = service(&transport);

    let listing = service.list_directory(&VirtualPath::parse("/gone/")).await;

    assert_eq!(listing, ListingResult::Absent);
    assert_ne!(listing, ListingResult::Empty);
    assert_eq!(service.metrics().failure_count(), 2);
}

#[tokio::test]
async fn test_not_found_on_both_paths_is_absent() {
    let transport = ScriptedTransport::new();
    let service = service(&transport);

    let listing = service.list_directory(&VirtualPath::parse("/missing/")).await;

    assert_eq!(listing, ListingResult::Absent);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_empty_listings_are_not_absent() {
    let transport = ScriptedTransport::new();
    transport.route("/empty-json/", vec![Reply::ok(&json_index(&[]))]);
    transport.route("/empty-html/", vec![Reply::ok(&html_index("/empty-html/", &[]))]);
    let service = service(&transport);

    let json = service.list_directory(&VirtualPath::parse("/empty-json/")).await;
    let html = service.list_directory(&VirtualPath::parse("/empty-html/")).await;

    assert_eq!(json, ListingResult::Empty);
    assert_eq!(html, ListingResult::Empty);
}

#[tokio::test]
async fn test_fetch_file_content() {
    let transport = ScriptedTransport::new();
    transport.route("/docs/readme.md", vec![Reply::ok("# Readme\n")]);
    let service = service(&transport);

    let content = service
        .fetch_file_content(&VirtualPath::parse("/docs/readme.md"))
        .await;
    assert_eq!(content.as_deref(), Some("# Readme\n"));
    assert_eq!(
        transport.requests(),
        vec![format!("{ORIGIN}docs/readme.md")]
    );
}

#[tokio::test]
async fn test_fetch_file_failures_are_absent() {
    let transport = ScriptedTransport::new();
    transport.route("/down.txt", vec![Reply::ConnectionRefused]);
    let service = service(&transport);

    assert!(
        service
            .fetch_file_content(&VirtualPath::parse("/missing.txt"))
            .await
            .is_none()
    );
    assert!(
        service
            .fetch_file_content(&VirtualPath::parse("/down.txt"))
            .await
            .is_none()
    );
    // No retries
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn test_url_join_has_no_duplicate_slashes() {
    let transport = ScriptedTransport::new();
    let service = service(&transport);

    assert_eq!(service.url_for(&VirtualPath::root()), "http://origin.test/");
    assert_eq!(
        service.url_for(&VirtualPath::parse("//docs//a.txt")),
        "http://origin.test/docs/a.txt"
    );
}

#[test]
fn test_url_segments_are_percent_encoded() {
    let transport = ScriptedTransport::new();
    let service = service(&transport);

    assert_eq!(
        service.url_for(&VirtualPath::parse("/notes#1.txt")),
        "http://origin.test/notes%231.txt"
    );
    assert_eq!(
        service.url_for(&VirtualPath::parse("/my dir/100%?/")),
        "http://origin.test/my%20dir/100%25%3F/"
    );
}

#[tokio::test]
async fn test_metrics_count_received_bytes() {
    let transport = ScriptedTransport::new();
    transport.route("/blob.bin", vec![Reply::Bytes(200, vec![0xff, 0xfe, b'x'])]);
    let service = service(&transport);

    let content = service
        .fetch_file_content(&VirtualPath::parse("/blob.bin"))
        .await
        .unwrap();

    assert_eq!(content, "\u{fffd}\u{fffd}x");
    assert_eq!(service.metrics().total_bytes(), 3);
}
