//! Drives `FontAwesomeSource` against a local HTTP server that serves an
//! archive built in-test, so no real network or Font Awesome release is
//! involved.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use happybg::assets::{DirStore, FontAwesomeSource, IconSource};
use happybg::Error;

const VERSION: &str = "9.9.9";

fn build_archive() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    writer
        .start_file(
            format!("fontawesome-free-{VERSION}-desktop/svgs/solid/snowflake.svg"),
            options,
        )
        .unwrap();
    writer
        .write_all(
            br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 448 512"><path d="M224 96l32 64h-64z"/></svg>"#,
        )
        .unwrap();

    writer.finish().unwrap().into_inner()
}

/// Serves the archive on an ephemeral port, counting requests into `hits`.
fn serve_archive(hits: Arc<AtomicUsize>) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let archive = build_archive();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            hits.fetch_add(1, Ordering::SeqCst);
            let _ = request.respond(tiny_http::Response::from_data(archive.clone()));
        }
    });

    format!("http://{addr}/fontawesome.zip")
}

#[test]
fn known_icon_resolves_with_dimensions_and_outline() {
    let url = serve_archive(Arc::new(AtomicUsize::new(0)));
    let dir = tempfile::tempdir().unwrap();
    let source = FontAwesomeSource::with_archive_url(DirStore::new(dir.path()), VERSION, url);

    let glyph = source.glyph("snowflake").expect("icon lookup failed");
    assert_eq!(glyph.width, 448.0);
    assert_eq!(glyph.height, 512.0);
    assert!(glyph.outline.starts_with("<path"));
    assert!(glyph.outline.contains("M224 96l32 64h-64z"));
}

#[test]
fn missing_icon_is_asset_not_found() {
    let url = serve_archive(Arc::new(AtomicUsize::new(0)));
    let dir = tempfile::tempdir().unwrap();
    let source = FontAwesomeSource::with_archive_url(DirStore::new(dir.path()), VERSION, url);

    match source.glyph("no-such-icon") {
        Err(Error::AssetNotFound(name)) => assert_eq!(name, "no-such-icon"),
        other => panic!("expected AssetNotFound, got {other:?}"),
    }
}

#[test]
fn archive_is_fetched_once_and_then_cached() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = serve_archive(hits.clone());
    let dir = tempfile::tempdir().unwrap();
    let source = FontAwesomeSource::with_archive_url(DirStore::new(dir.path()), VERSION, url);

    source.glyph("snowflake").expect("first lookup failed");
    source.glyph("snowflake").expect("second lookup failed");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn unreachable_archive_is_a_network_error() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens on this port.
    let source = FontAwesomeSource::with_archive_url(
        DirStore::new(dir.path()),
        VERSION,
        "http://127.0.0.1:9/fontawesome.zip",
    );
    assert!(matches!(source.glyph("snowflake"), Err(Error::Network(_))));
}

#[test]
fn attribution_names_the_pinned_release() {
    let dir = tempfile::tempdir().unwrap();
    let source = FontAwesomeSource::new(DirStore::new(dir.path()));
    let notice = source.attribution().unwrap();
    assert!(notice.contains("Font Awesome Free 5.15.2"));
    assert!(notice.contains("https://fontawesome.com/license/free"));
}
