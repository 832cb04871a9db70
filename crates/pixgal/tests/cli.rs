use mockito::Matcher;
use std::process::Command;
use tempfile::TempDir;

/// `pixgal` with a clean config dir and a dead API host unless overridden
fn pixgal(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("pixgal"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env("PIXGAL_API_URL", "http://127.0.0.1:1")
        .env("PIXABAY_API_KEY", "test-key")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn error_lines(stderr: &str) -> usize {
    stderr.lines().filter(|l| l.contains("Error")).count()
}

fn page_body(total_hits: u64, tags: &[&str]) -> String {
    let hits: Vec<_> = tags
        .iter()
        .map(|t| {
            serde_json::json!({
                "webformatURL": format!("https://cdn.example/{t}_640.jpg"),
                "largeImageURL": format!("https://cdn.example/{t}_1280.jpg"),
                "tags": t,
                "likes": 1,
                "views": 2,
                "comments": 3,
                "downloads": 4
            })
        })
        .collect();
    serde_json::json!({ "total": total_hits, "totalHits": total_hits, "hits": hits }).to_string()
}

fn mock_page(
    server: &mut mockito::Server,
    page: u32,
    total_hits: u64,
    tags: &[&str],
) -> mockito::Mock {
    server
        .mock("GET", "/api/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "test-key".into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(total_hits, tags))
        .create()
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    let output = pixgal(&home).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["search", "export", "browse"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn blank_query_is_rejected_before_any_request() {
    let home = TempDir::new().unwrap();
    let output = pixgal(&home).args(["search", "   "]).output().unwrap();

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Please enter a search query."), "{stderr}");
    // Nothing listens on the dead host, so a request would have shown up as a network error
    assert!(!stderr.contains("error sending request"), "{stderr}");
    assert_eq!(error_lines(&stderr), 1, "{stderr}");
}

#[test]
fn missing_api_key_is_a_config_error() {
    let home = TempDir::new().unwrap();
    let output = pixgal(&home)
        .env_remove("PIXABAY_API_KEY")
        .args(["search", "cats"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No Pixabay API key configured"));
}

#[test]
fn search_prints_cards_as_json() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = mock_page(&mut server, 1, 2, &["cat", "kitten"]);

    let output = pixgal(&home)
        .env("PIXGAL_API_URL", server.url())
        .args(["search", "cats", "--json"])
        .output()
        .unwrap();

    mock.assert();
    assert!(output.status.success(), "{}", stderr_of(&output));

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["alt"], "cat");
    assert_eq!(cards[1]["full_url"], "https://cdn.example/kitten_1280.jpg");

    let stderr = stderr_of(&output);
    assert!(stderr.contains("Hooray! We found 2 images."), "{stderr}");
    assert!(stderr.contains("end of search results"), "{stderr}");
}

#[test]
fn api_error_body_is_reported() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("[ERROR 400] \"key\" is invalid")
        .create();

    let output = pixgal(&home)
        .env("PIXGAL_API_URL", server.url())
        .args(["search", "cats"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("[ERROR 400] \"key\" is invalid"), "{stderr}");
    assert!(!stderr.contains("test-key"), "{stderr}");
}

#[test]
fn config_file_options_reach_the_api() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    std::fs::write(
        &config,
        "api_key = \"file-key\"\norientation = \"vertical\"\nsafesearch = false\n",
    )
    .unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "file-key".into()),
            Matcher::UrlEncoded("orientation".into(), "vertical".into()),
            Matcher::UrlEncoded("safesearch".into(), "false".into()),
        ]))
        .with_status(200)
        .with_body(page_body(0, &[]))
        .create();

    let output = pixgal(&home)
        .env_remove("PIXABAY_API_KEY")
        .env("PIXGAL_API_URL", server.url())
        .arg("--config")
        .arg(&config)
        .args(["search", "nothing"])
        .output()
        .unwrap();

    mock.assert();
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(stderr_of(&output).contains("there are no images matching your search query"));
}

#[test]
fn export_loads_requested_pages_into_one_page() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("gallery.html");

    let mut server = mockito::Server::new();
    let first = mock_page(&mut server, 1, 50, &["fox", "owl"]);
    let second = mock_page(&mut server, 2, 50, &["bear"]);

    let output = pixgal(&home)
        .env("PIXGAL_API_URL", server.url())
        .args(["export", "forest animals", "--pages", "3", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    first.assert();
    second.assert();
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Gallery exported to"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("id=\"search-form\""));
    assert_eq!(html.matches("class=\"photo-card\"").count(), 3);
    assert!(html.contains("data-armed=\"false\""));
    assert!(html.contains("Hooray! We found 50 images."));
}

fn failing_page(server: &mut mockito::Server, page: u32) -> mockito::Mock {
    server
        .mock("GET", "/api/")
        .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
        .with_status(500)
        .with_body("backend down")
        .create()
}

#[test]
fn later_page_failure_keeps_earlier_cards() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let first = mock_page(&mut server, 1, 100, &["heron"]);
    let second = failing_page(&mut server, 2);

    let output = pixgal(&home)
        .env("PIXGAL_API_URL", server.url())
        .args(["search", "birds", "--pages", "2"])
        .output()
        .unwrap();

    first.assert();
    second.assert();
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heron"), "{stdout}");
    assert!(stdout.contains("https://cdn.example/heron_1280.jpg"), "{stdout}");

    let stderr = stderr_of(&output);
    assert!(stderr.contains("backend down"), "{stderr}");
    assert_eq!(error_lines(&stderr), 1, "{stderr}");
}

#[test]
fn later_page_failure_still_exports_earlier_cards() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("gallery.html");

    let mut server = mockito::Server::new();
    let first = mock_page(&mut server, 1, 100, &["heron", "crane"]);
    let second = failing_page(&mut server, 2);

    let output = pixgal(&home)
        .env("PIXGAL_API_URL", server.url())
        .args(["export", "birds", "--pages", "3", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    first.assert();
    second.assert();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Gallery exported to"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("class=\"photo-card\"").count(), 2);
    // Page 2 can still be retried from here
    assert!(html.contains("data-armed=\"true\""));
    assert!(html.contains("backend down"));

    assert_eq!(error_lines(&stderr_of(&output)), 1);
}
