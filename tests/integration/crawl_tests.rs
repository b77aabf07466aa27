//! Integration tests for the exporter
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, render, persist and index cycle end-to-end.

use docsweep::config::{Config, FetchConfig, JobConfig};
use docsweep::{MarkdownRenderer, Orchestrator, PageOutcome};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a job with the given seeds writing into `<temp>/export`
fn create_test_config(seeds: Vec<String>, output: &TempDir) -> Config {
    let mut job = JobConfig::with_seeds(seeds);
    job.output_dir = output.path().join("export").to_string_lossy().into_owned();
    job.make_zip = false;
    Config {
        job,
        fetch: FetchConfig {
            timeout_secs: 5,
            robots_timeout_secs: 5,
            ..FetchConfig::default()
        },
    }
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// Mounts an HTML page that must be fetched exactly `hits` times
async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html_page(title, body), "text/html; charset=utf-8"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

/// Mounts a route that must never be requested
async fn forbid(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

async fn run(config: Config) -> docsweep::CrawlReport {
    Orchestrator::new(config, Arc::new(MarkdownRenderer::new()))
        .expect("Failed to create orchestrator")
        .run()
        .await
        .expect("Export failed")
}

fn relative_paths(report: &docsweep::CrawlReport) -> Vec<&str> {
    report
        .records
        .iter()
        .map(|r| r.relative_path.as_str())
        .collect()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).expect("Failed to read exported file")
}

#[tokio::test]
async fn test_path_prefix_limits_export() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/api",
        "API",
        r#"<p>All endpoints.</p>
           <a href="/api/intro">Intro</a>
           <a href="/blog/post">Blog</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/api/intro", "Intro", "<p>Getting started.</p>", 1).await;
    forbid(&server, "/blog/post").await;

    let mut config = create_test_config(vec![format!("{}/api", server.uri())], &temp);
    config.job.path_prefix = Some("/api".to_string());
    config.job.max_pages = 2;

    let report = run(config).await;

    assert_eq!(relative_paths(&report), vec!["root/api.md", "api/intro.md"]);
    assert_eq!(report.stats.exported(), 2);

    let root = &report.output_dir;
    assert!(root.join("root/api.md").is_file());
    assert!(root.join("api/intro.md").is_file());

    let flat = read(root, "llms.txt");
    let bullets: Vec<&str> = flat.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(
        bullets,
        vec![
            "- [API](root/api.md) — All endpoints.",
            "- [Intro](api/intro.md) — Getting started.",
        ]
    );

    let table = read(root, "llms_index.md");
    let rows: Vec<&str> = table
        .lines()
        .filter(|l| l.starts_with("| ") && !l.starts_with("| Title"))
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        format!("| API | root/api.md | {}/api |", server.uri())
    );
    assert_eq!(
        rows[1],
        format!("| Intro | api/intro.md | {}/api/intro |", server.uri())
    );
}

#[tokio::test]
async fn test_document_has_title_and_source_header() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/guide/install",
        "Install Guide",
        "<h1>Install</h1><p>Run the installer.</p>",
        1,
    )
    .await;

    let seed = format!("{}/guide/install", server.uri());
    let report = run(create_test_config(vec![seed.clone()], &temp)).await;

    let content = read(&report.output_dir, "guide/install.md");
    assert!(content.starts_with(&format!("# Install Guide\n\n> Source: {}\n\n", seed)));
    assert!(content.contains("Run the installer"));
}

#[tokio::test]
async fn test_breadth_first_order() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/a">A</a><a href="/b">B</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "A", r#"<a href="/a/deep">Deep</a>"#, 1).await;
    mount_page(&server, "/b", "B", r#"<a href="/b/deep">Deep</a>"#, 1).await;
    mount_page(&server, "/a/deep", "A deep", "<p>a</p>", 1).await;
    mount_page(&server, "/b/deep", "B deep", "<p>b</p>", 1).await;

    let report = run(create_test_config(vec![format!("{}/", server.uri())], &temp)).await;

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "A", "B", "A deep", "B deep"]);
    assert_eq!(report.records[0].relative_path, "root/index.md");
}

#[tokio::test]
async fn test_no_page_is_processed_twice() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    let links = r##"<a href="/one">1</a>
        <a href="/two">2</a>
        <a href="/one#section">1 again</a>
        <a href="#top">Top</a>"##;
    mount_page(&server, "/one", "One", links, 1).await;
    mount_page(&server, "/two", "Two", links, 1).await;

    let report = run(create_test_config(
        vec![format!("{}/one", server.uri()), format!("{}/one", server.uri())],
        &temp,
    ))
    .await;

    assert_eq!(relative_paths(&report), vec!["root/one.md", "root/two.md"]);
}

#[tokio::test]
async fn test_trailing_slash_variant_is_exported_once() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/g/intro",
        "Intro",
        r#"<p>Welcome.</p><a href="/g/intro/">Intro again</a>"#,
        1,
    )
    .await;
    forbid(&server, "/g/intro/").await;

    let report = run(create_test_config(
        vec![format!("{}/g/intro", server.uri())],
        &temp,
    ))
    .await;

    assert_eq!(relative_paths(&report), vec!["g/intro.md"]);
    assert_eq!(report.stats.count(PageOutcome::Duplicate), 1);

    let flat = read(&report.output_dir, "llms.txt");
    let bullets: Vec<&str> = flat.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(bullets, vec!["- [Intro](g/intro.md) — Welcome."]);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/guide/"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/docs/guide/",
        "Guide",
        r#"<p>Moved here.</p><a href="next">Next</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/docs/guide/next", "Next", "<p>Step two.</p>", 1).await;
    forbid(&server, "/next").await;

    let report = run(create_test_config(
        vec![format!("{}/old", server.uri())],
        &temp,
    ))
    .await;

    assert_eq!(
        relative_paths(&report),
        vec!["root/old.md", "docs/guide/next.md"]
    );
    assert!(read(&report.output_dir, "root/old.md").contains("Moved here"));
}

#[tokio::test]
async fn test_max_pages_caps_export() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/p1">1</a><a href="/p2">2</a><a href="/p3">3</a><a href="/p4">4</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p1", "P1", "", 1).await;
    mount_page(&server, "/p2", "P2", "", 1).await;
    forbid(&server, "/p3").await;
    forbid(&server, "/p4").await;

    let mut config = create_test_config(vec![format!("{}/", server.uri())], &temp);
    config.job.max_pages = 3;

    let report = run(config).await;
    assert_eq!(report.records.len(), 3);

    let flat = read(&report.output_dir, "llms.txt");
    assert_eq!(flat.lines().filter(|l| l.starts_with("- ")).count(), 3);
}

#[tokio::test]
async fn test_robots_disallow_is_honored() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /private\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/private/x">Secret</a><a href="/public">Public</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/public", "Public", "<p>open</p>", 1).await;
    forbid(&server, "/private/x").await;

    let report = run(create_test_config(vec![format!("{}/", server.uri())], &temp)).await;
    assert_eq!(relative_paths(&report), vec!["root/index.md", "root/public.md"]);
}

#[tokio::test]
async fn test_disallowed_seed_is_not_fetched() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .mount(&server)
        .await;
    forbid(&server, "/docs").await;

    let report = run(create_test_config(vec![format!("{}/docs", server.uri())], &temp)).await;
    assert!(report.records.is_empty());
    assert_eq!(report.stats.count(PageOutcome::RobotsDenied), 1);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/", "Home", r#"<a href="/private/x">x</a>"#, 1).await;
    mount_page(&server, "/private/x", "X", "", 1).await;

    let report = run(create_test_config(vec![format!("{}/", server.uri())], &temp)).await;
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/docs", "Docs", "", 1).await;

    let mut config = create_test_config(vec![format!("{}/docs", server.uri())], &temp);
    config.job.obey_robots = false;

    let report = run(config).await;
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn test_fragment_seed_exports_section() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/setup",
        "Setup",
        r#"<h1>Setup</h1>
           <p>Pick your platform.</p>
           <h2 id="linux">Linux</h2>
           <p>Install with apt.</p>
           <h3>Troubleshooting</h3>
           <p>Check permissions.</p>
           <h2 id="mac">macOS</h2>
           <p>Install with brew.</p>"#,
        1,
    )
    .await;

    let seed = format!("{}/setup#linux", server.uri());
    let report = run(create_test_config(
        vec![seed.clone(), format!("{}/setup#mac", server.uri())],
        &temp,
    ))
    .await;

    assert_eq!(relative_paths(&report), vec!["root/setup__linux.md"]);
    assert_eq!(report.records[0].url, seed);
    assert_eq!(report.stats.fragment_sections, 1);
    // Same page body, so the second anchor shares the visited key
    assert_eq!(report.stats.count(PageOutcome::Duplicate), 1);

    let content = read(&report.output_dir, "root/setup__linux.md");
    assert!(content.contains("apt"));
    assert!(content.contains("Check permissions"));
    assert!(!content.contains("brew"));
    assert!(!content.contains("Pick your platform."));
}

#[tokio::test]
async fn test_fragment_export_disabled_renders_full_page() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/setup",
        "Setup",
        r#"<h2 id="linux">Linux</h2><p>apt</p><h2 id="mac">macOS</h2><p>brew</p>"#,
        1,
    )
    .await;

    let mut config = create_test_config(vec![format!("{}/setup#linux", server.uri())], &temp);
    config.job.include_fragments = false;

    let report = run(config).await;
    assert_eq!(report.stats.fragment_sections, 0);
    let content = read(&report.output_dir, &report.records[0].relative_path);
    assert!(content.contains("brew"));
}

#[tokio::test]
async fn test_fetch_failures_do_not_stop_traversal() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/missing">Gone</a><a href="/manual.pdf">PDF</a><a href="/ok">Ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/manual.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "Ok", "", 1).await;

    let report = run(create_test_config(vec![format!("{}/", server.uri())], &temp)).await;

    assert_eq!(relative_paths(&report), vec!["root/index.md", "root/ok.md"]);
    assert_eq!(report.stats.count(PageOutcome::FetchFailed), 1);
    assert_eq!(report.stats.count(PageOutcome::ContentMismatch), 1);
    assert!(!report.output_dir.join("root/missing.md").exists());
    assert!(!report.output_dir.join("root/manual.pdf.md").exists());
}

#[tokio::test]
async fn test_other_hosts_are_out_of_scope() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    // Both servers listen on 127.0.0.1, so use "localhost" for the other one
    let other_url = other.uri().replace("127.0.0.1", "localhost");
    mount_page(
        &server,
        "/",
        "Home",
        &format!(r#"<a href="{}/external">External</a>"#, other_url),
        1,
    )
    .await;
    forbid(&other, "/external").await;

    let report = run(create_test_config(vec![format!("{}/", server.uri())], &temp)).await;
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn test_zip_archive_contains_export() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    mount_page(&server, "/docs/start", "Start", "<p>hello</p>", 1).await;

    let mut config = create_test_config(vec![format!("{}/docs/start", server.uri())], &temp);
    config.job.make_zip = true;

    let report = run(config).await;
    let archive_path = report.archive.expect("archive should be written");
    assert!(archive_path.is_file());
    assert_eq!(archive_path.file_name().unwrap(), "export.zip");

    let archive = zip::ZipArchive::new(fs::File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["docs/start.md", "llms.txt", "llms_index.md"]);
}
