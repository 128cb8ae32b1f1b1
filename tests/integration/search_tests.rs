//! Integration tests for the searcher
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! read → search → report cycle end-to-end.

use site_searcher::config::{resolve_config, ConfigOverrides};
use site_searcher::input::read_ranked_list;
use site_searcher::output::TextReport;
use site_searcher::search::{search, Coordinator, Matcher, SearchOptions};
use site_searcher::SearchError;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates test options with a short timeout
fn create_test_options(concurrency: usize, block_factor: usize) -> SearchOptions {
    SearchOptions {
        max_concurrent_requests: concurrency,
        block_factor,
        request_timeout: Duration::from_secs(2),
        user_agent: "TestSearcher/1.0".to_string(),
    }
}

fn create_ranked_list(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Returns an address nothing listens on
fn refused_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

/// Reads a ranked list, searches it and returns the report lines
async fn run_search(
    list: &Path,
    report_path: &Path,
    pattern: &str,
    options: SearchOptions,
) -> Vec<String> {
    let records = read_ranked_list(list).expect("Failed to read ranked list");
    let matcher = Matcher::new(pattern).expect("Failed to compile pattern");

    let mut report = TextReport::create(report_path).expect("Failed to create report");
    search(matcher, options, records, &mut report)
        .await
        .expect("Search failed");
    drop(report);

    std::fs::read_to_string(report_path)
        .expect("Failed to read report")
        .lines()
        .map(str::to_string)
        .collect()
}

fn line_rank(line: &str) -> u64 {
    line.split(',').next().unwrap().parse().unwrap()
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_reachable_and_unreachable_sites() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<h1>New</h1><p>newer posts</p><b>NEW!</b>").await;

    let host = mock_server.address().to_string();
    let unreachable = refused_address();
    let list = create_ranked_list(&format!(
        "\"Rank\",\"URL\"\n2,\"{}\"\n1,\"{}\"\n",
        unreachable, host
    ));
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let lines = run_search(list.path(), &report_path, "new.?", create_test_options(2, 5)).await;

    assert_eq!(lines.len(), 2, "one line per ranked site: {:?}", lines);
    assert_eq!(
        lines[0],
        format!("1, \"{}\", matches found: New< newe NEW!", host)
    );
    let failed_prefix = format!(
        "2, \"{}\", matches found: Get http://{}",
        unreachable, unreachable
    );
    assert!(lines[1].starts_with(&failed_prefix));
    assert!(lines[1].contains("fetch error"));
}

#[tokio::test]
async fn test_all_sites_failing_still_produces_report() {
    let content: String = (1..=5)
        .map(|rank| format!("{},\"{}\"\n", rank, refused_address()))
        .collect();
    let list = create_ranked_list(&content);
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let lines = run_search(list.path(), &report_path, "new.?", create_test_options(2, 1)).await;

    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line_rank(line), i as u64 + 1);
        assert!(line.contains("fetch error"), "expected an error in {:?}", line);
    }
}

#[tokio::test]
async fn test_many_sites_across_blocks_in_rank_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("breaking news")
                .set_delay(Duration::from_millis(20)),
        )
        .mount(&mock_server)
        .await;

    let host = mock_server.address().to_string();

    // Ranks deliberately out of order and not contiguous
    let ranks: Vec<u64> = (1..=25).map(|i| (i * 37) % 101).collect();
    let content: String = ranks
        .iter()
        .map(|rank| format!("{},\"{}/site{}\"\n", rank, host, rank))
        .collect();
    let list = create_ranked_list(&content);
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let records = read_ranked_list(list.path()).unwrap();
    let matcher = Matcher::new("NEWS").unwrap();
    let coordinator = Coordinator::new(matcher, create_test_options(3, 2)).unwrap();
    let mut report = TextReport::create(&report_path).unwrap();
    let summary = coordinator.run(records, &mut report).await.unwrap();
    drop(report);

    let output = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), ranks.len());
    let reported: Vec<u64> = lines.iter().map(|l| line_rank(l)).collect();
    let mut expected = ranks.clone();
    expected.sort_unstable();
    assert_eq!(reported, expected);
    assert!(lines.iter().all(|l| l.ends_with("matches found: news")));

    assert_eq!(summary.total_records, 25);
    assert_eq!(summary.blocks, 5);
    assert_eq!(summary.fetched, 25);
    assert!(coordinator.gate().high_water_mark() <= 3);
}

#[tokio::test]
async fn test_identical_runs_produce_identical_reports() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/a", "What's new? Renewed newsletters.").await;
    mount_page(&mock_server, "/b", "nothing to see").await;

    let host = mock_server.address().to_string();
    let list = create_ranked_list(&format!("1,\"{}/a\"\n2,\"{}/b\"\n", host, host));
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let first = run_search(list.path(), &report_path, "new.?", create_test_options(2, 5)).await;
    let first_bytes = std::fs::read(&report_path).unwrap();
    let second = run_search(list.path(), &report_path, "new.?", create_test_options(2, 5)).await;
    let second_bytes = std::fs::read(&report_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0], format!("1, \"{}/a\", matches found: new? newe news", host));
    assert_eq!(first[1], format!("2, \"{}/b\", matches found: ", host));
}

#[tokio::test]
async fn test_timeout_is_recorded_without_blocking_siblings() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("new")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", "new").await;

    let host = mock_server.address().to_string();
    let list = create_ranked_list(&format!("1,\"{}/slow\"\n2,\"{}/fast\"\n", host, host));
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let mut options = create_test_options(2, 1);
    options.request_timeout = Duration::from_millis(300);
    let lines = run_search(list.path(), &report_path, "new", options).await;

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("fetch error"));
    assert_eq!(lines[1], format!("2, \"{}/fast\", matches found: new", host));
}

/// Client sockets in ESTABLISHED state whose remote port is one of `ports`
#[cfg(target_os = "linux")]
fn established_client_sockets(ports: &[u16]) -> usize {
    const ESTABLISHED: &str = "01";

    let table = std::fs::read_to_string("/proc/self/net/tcp").unwrap();
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (_, remote_port) = fields.get(2)?.split_once(':')?;
            let remote_port = u16::from_str_radix(remote_port, 16).ok()?;
            Some((remote_port, *fields.get(3)?))
        })
        .filter(|(port, state)| ports.contains(port) && *state == ESTABLISHED)
        .count()
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_connections_closed_after_run() {
    let mut servers = Vec::new();
    for _ in 0..12 {
        let server = MockServer::start().await;
        mount_page(&server, "/", "news").await;
        servers.push(server);
    }
    let ports: Vec<u16> = servers.iter().map(|s| s.address().port()).collect();

    let content: String = servers
        .iter()
        .enumerate()
        .map(|(i, server)| format!("{},\"{}\"\n", i + 1, server.address()))
        .collect();
    let list = create_ranked_list(&content);
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out.txt");

    let records = read_ranked_list(list.path()).unwrap();
    let matcher = Matcher::new("new.?").unwrap();
    let coordinator = Coordinator::new(matcher, create_test_options(2, 1)).unwrap();
    let mut report = TextReport::create(&report_path).unwrap();
    let summary = coordinator.run(records, &mut report).await.unwrap();

    assert_eq!(summary.fetched, 12);
    assert!(coordinator.gate().high_water_mark() <= 2);

    // Connection tasks close their sockets shortly after the last response
    let mut open = established_client_sockets(&ports);
    for _ in 0..40 {
        if open == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        open = established_client_sockets(&ports);
    }
    assert_eq!(open, 0, "{} client sockets left open with a ceiling of 2", open);
}

#[test]
fn test_invalid_pattern_is_fatal() {
    let result = Matcher::new("new[");
    assert!(matches!(result, Err(SearchError::InvalidPattern { .. })));
}

#[test]
fn test_unreadable_input_is_fatal() {
    let result = read_ranked_list(Path::new("/nonexistent/urls.txt"));
    assert!(result.is_err());
}

#[test]
fn test_config_file_drives_search_options() {
    let mut file = NamedTempFile::new().unwrap();
    let content = concat!(
        "[search]\n",
        "max-concurrent-requests = 2\n",
        "block-factor = 4\n",
        "request-timeout-secs = 3\n",
    );
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();

    let overrides = ConfigOverrides {
        block_factor: Some(1),
        ..ConfigOverrides::default()
    };
    let (config, hash) = resolve_config(Some(file.path()), &overrides).unwrap();
    let options = config.search_options();

    assert!(hash.is_some());
    assert_eq!(options.max_concurrent_requests, 2);
    assert_eq!(options.block_size(), 2);
    assert_eq!(options.request_timeout, Duration::from_secs(3));
}
