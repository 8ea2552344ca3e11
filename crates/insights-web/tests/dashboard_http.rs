use std::io::Write;

use insights_core::error::InsightsError;
use insights_core::settings::Settings;
use insights_web::{server, DashboardApp, Stage};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;

const DATASET: &str = "\
name,online_order,book_table,rate,votes,approx_cost(for two people),listed_in(type)
Jalsa,Yes,Yes,4.1/5,775,800,Buffet
Spice Elephant,Yes,No,4.1/5,787,800,Buffet
San Churro Cafe,Yes,No,3.8/5,918,800,Cafe
Addhuri Udupi Bhojana,No,No,3.7/5,88,300,Dining
Grand Village,No,No,NEW,166,600,Dining
";

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write dataset");
    file
}

fn settings_for(file: &NamedTempFile, extra: &[&str]) -> Settings {
    let mut args = vec![
        "restaurant-insights".to_string(),
        "--data-path".to_string(),
        file.path().display().to_string(),
    ];
    args.extend(extra.iter().map(|a| a.to_string()));
    Settings::load_from(args)
}

async fn send_raw(addr: std::net::SocketAddr, path: &str) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.expect("write");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, body.to_string())
}

#[tokio::test]
async fn serves_dashboard_at_root_only() {
    let file = write_dataset(DATASET);
    let app = DashboardApp::initialize(&settings_for(&file, &[])).expect("initialize");
    assert_eq!(app.stage(), Stage::Rendered);
    assert_eq!(app.data().metadata.rows_loaded, 5);
    assert_eq!(app.data().metadata.rates.missing, 1);

    let listener = server::bind("127.0.0.1:0".parse().expect("addr"))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(app.serve_on(listener, async move {
        let _ = stop_rx.await;
    }));

    let (status, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("<h1>Zomato Data Analysis Dashboard</h1>"));
    for label in [
        "Ratings Distribution",
        "Votes by Restaurant Type",
        "Online Orders vs Ratings",
        "Restaurant Type Proportion",
        "Heatmap Analysis",
    ] {
        assert!(body.contains(label), "missing tab {label}");
    }
    assert!(body.contains("data:image/png;base64,"));
    assert!(!body.contains("<footer>"));

    let (status, _) = send_raw(addr, "/other").await;
    assert_eq!(status, 404);
    let (status, _) = send_raw(addr, "/index.html").await;
    assert_eq!(status, 404);

    stop_tx.send(()).expect("stop server");
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn debug_flag_adds_metadata_footer_and_title() {
    let file = write_dataset(DATASET);
    let app = DashboardApp::initialize(&settings_for(
        &file,
        &["--debug", "--title", "Bengaluru Eats"],
    ))
    .expect("initialize");

    let page = app.page();
    assert!(page.contains("<title>Bengaluru Eats</title>"));
    assert!(page.contains("<footer>"));
    assert!(page.contains("&quot;rows_loaded&quot;: 5"));
}

#[test]
fn missing_votes_column_fails_before_serving() {
    let file = write_dataset(
        "\
name,online_order,rate,listed_in(type)
Jalsa,Yes,4.1/5,Buffet
",
    );
    let err = match DashboardApp::initialize(&settings_for(&file, &[])) {
        Ok(_) => panic!("initialize should fail without a votes column"),
        Err(e) => e,
    };
    assert!(matches!(err, InsightsError::ChartBuild { .. }));
    assert!(err.to_string().contains("votes"));
}

#[test]
fn missing_dataset_is_a_load_error() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.csv");
    let settings = Settings::load_from([
        "restaurant-insights",
        "--data-path",
        path.to_str().expect("utf-8 path"),
    ]);
    let err = match DashboardApp::initialize(&settings) {
        Ok(_) => panic!("initialize should fail for a missing file"),
        Err(e) => e,
    };
    assert!(matches!(err, InsightsError::DataLoad { .. }));
}

#[tokio::test]
async fn bind_conflict_is_server_start_error() {
    let taken = server::bind("127.0.0.1:0".parse().expect("addr"))
        .await
        .expect("bind");
    let addr = taken.local_addr().expect("local addr");

    let err = server::bind(addr).await.expect_err("second bind must fail");
    assert!(matches!(err, InsightsError::ServerStart { .. }));
    assert!(err.to_string().starts_with(&format!("Failed to start server on {addr}")));
}
