mod common;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use common::test_server::TestServer;

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let resp = client.post(url).json(&body).send().await.expect("send");
    let status = resp.status();
    (status, resp.json().await.expect("parse json"))
}

async fn put_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let resp = client.put(url).json(&body).send().await.expect("send");
    let status = resp.status();
    (status, resp.json().await.expect("parse json"))
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let resp = client.get(url).send().await.expect("send");
    let status = resp.status();
    (status, resp.json().await.expect("parse json"))
}

async fn create_profile(server: &TestServer, client: &reqwest::Client) {
    let (status, body) = put_json(
        client,
        server.url("/api/profile/1"),
        json!({"name": "Ada Lovelace", "title": "Engineer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated");
}

fn cv_form(filename: &str, bytes: Vec<u8>) -> Form {
    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("application/pdf")
        .expect("mime");
    Form::new().part("cv", part)
}

#[tokio::test]
async fn test_skill_lifecycle() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, created) = post_json(
        &client,
        server.url("/api/skills"),
        json!({"name": "Go", "category": "Backend", "level": 80}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["name"], "Go");
    assert_eq!(created["color"], "#3B82F6");
    assert_eq!(created["order_index"], 0);

    let (status, skills) = get_json(&client, server.url("/api/skills")).await;
    assert_eq!(status, StatusCode::OK);
    let skills = skills.as_array().expect("array");
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["id"], id);
    assert_eq!(skills[0]["level"], 80);

    let (status, body) = put_json(
        &client,
        server.url(&format!("/api/skills/{id}")),
        json!({"level": 7}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Skill updated");

    let (_, skills) = get_json(&client, server.url("/api/skills")).await;
    let skill = &skills[0];
    assert_eq!(skill["level"], 7);
    assert_eq!(skill["name"], "Go");
    assert_eq!(skill["category"], "Backend");
    assert_eq!(skill["color"], "#3B82F6");
    assert_eq!(skill["order_index"], 0);

    let resp = client
        .delete(server.url(&format!("/api/skills/{id}")))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, skills) = get_json(&client, server.url("/api/skills")).await;
    assert_eq!(skills, json!([]));
}

#[tokio::test]
async fn test_delete_missing_reports_success() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for path in ["/api/skills/999", "/api/projects/999", "/api/education/999"] {
        let resp = client.delete(server.url(path)).send().await.expect("delete");
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body: Value = resp.json().await.expect("json");
        assert!(body["message"].as_str().unwrap().ends_with("deleted"));
    }
}

#[tokio::test]
async fn test_skills_ordered_by_order_index() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for (name, order) in [("C", 2), ("A", 1), ("B", 1), ("Z", 0)] {
        let (status, _) = post_json(
            &client,
            server.url("/api/skills"),
            json!({"name": name, "category": "lang", "order_index": order}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, skills) = get_json(&client, server.url("/api/skills")).await;
    let names: Vec<&str> = skills
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Z", "A", "B", "C"]);
}

#[tokio::test]
async fn test_education_lists_round_trip() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, created) = post_json(
        &client,
        server.url("/api/education"),
        json!({
            "degree": "MSc",
            "institution": "ETH",
            "courses": ["Algorithms", "Databases"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["courses"], json!(["Algorithms", "Databases"]));
    assert_eq!(created["achievements"], json!([]));
    assert_eq!(created["featured"], false);

    let (_, bare) = post_json(
        &client,
        server.url("/api/education"),
        json!({"degree": "BSc", "institution": "EPFL"}),
    )
    .await;
    assert_eq!(bare["courses"], json!([]));

    let id = created["id"].as_i64().unwrap();
    let (status, _) = put_json(
        &client,
        server.url(&format!("/api/education/{id}")),
        json!({"achievements": ["Dean's list"], "featured": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, rows) = get_json(&client, server.url("/api/education")).await;
    let row = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .expect("row");
    assert_eq!(row["courses"], json!(["Algorithms", "Databases"]));
    assert_eq!(row["achievements"], json!(["Dean's list"]));
    assert_eq!(row["featured"], true);
}

#[tokio::test]
async fn test_project_featured_flag() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, created) = post_json(
        &client,
        server.url("/api/projects"),
        json!({"title": "folio", "technologies": "Rust, SQLite", "featured": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["featured"], true);
    let id = created["id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/api/projects/{id}")),
        json!({"featured": false, "live_url": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project updated");

    let (_, projects) = get_json(&client, server.url("/api/projects")).await;
    assert_eq!(projects[0]["featured"], false);
    assert_eq!(projects[0]["title"], "folio");
    assert_eq!(projects[0]["technologies"], "Rust, SQLite");
}

#[tokio::test]
async fn test_unknown_patch_field_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (_, created) = post_json(
        &client,
        server.url("/api/skills"),
        json!({"name": "Rust", "category": "lang"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/api/skills/{id}")),
        json!({"id": 42}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_missing_required_field() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        server.url("/api/skills"),
        json!({"category": "lang"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_profile_singleton() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/api/profile")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    create_profile(&server, &client).await;

    let (_, profile) = get_json(&client, server.url("/api/profile")).await;
    assert_eq!(profile["id"], 1);
    assert_eq!(profile["name"], "Ada Lovelace");
    assert_eq!(profile["language"], "fr");
    assert_eq!(profile["theme"], "auto");

    let (status, body) = put_json(
        &client,
        server.url("/api/profile/2"),
        json!({"name": "Someone", "title": "Else"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cv_upload_and_download() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    create_profile(&server, &client).await;

    let content: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let resp = client
        .post(server.url("/api/upload-cv"))
        .multipart(cv_form("cv-2024.pdf", content.clone()))
        .send()
        .await
        .expect("upload");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["filename"], "cv-2024.pdf");
    assert_eq!(body["message"], "CV uploaded and profile updated");
    let url = body["url"].as_str().expect("url").to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("-cv-2024.pdf"));

    let (_, profile) = get_json(&client, server.url("/api/profile")).await;
    assert_eq!(profile["cv_filename"], "cv-2024.pdf");
    assert_eq!(profile["cv_url"], url.as_str());

    let resp = client
        .get(server.url("/api/download-cv"))
        .send()
        .await
        .expect("download");
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .expect("content disposition")
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("cv-2024.pdf"));
    assert_eq!(resp.bytes().await.expect("bytes").as_ref(), content.as_slice());

    let resp = client.get(server.url(&url)).send().await.expect("serve");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(resp.bytes().await.expect("bytes").as_ref(), content.as_slice());

    let stored = std::fs::read_dir(server.uploads_dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn test_download_without_cv() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(server.url("/api/download-cv"))
        .send()
        .await
        .expect("download");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    create_profile(&server, &client).await;

    let (status, body) = get_json(&client, server.url("/api/download-cv")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "CV not found");
}

#[tokio::test]
async fn test_upload_without_file() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    create_profile(&server, &client).await;

    let form = Form::new().text("note", "no file here");
    let resp = client
        .post(server.url("/api/upload-cv"))
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_without_profile_discards_file() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/upload-cv"))
        .multipart(cv_form("cv.pdf", b"%PDF-1.4".to_vec()))
        .send()
        .await
        .expect("upload");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let stored = std::fs::read_dir(server.uploads_dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_upload_too_large() {
    let server = TestServer::start_with_limit(Some(1024)).await;
    let client = reqwest::Client::new();
    create_profile(&server, &client).await;

    let resp = client
        .post(server.url("/api/upload-cv"))
        .multipart(cv_form("big.pdf", vec![b'x'; 4096]))
        .send()
        .await
        .expect("upload");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_serve_missing_upload() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(server.url("/uploads/1-nothing.pdf"))
        .send()
        .await
        .expect("get");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fallback_and_health() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/health")).send().await.expect("health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");

    let (status, body) = get_json(&client, server.url("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Portfolio API - use /api/... to access the endpoints"
    );
}

#[tokio::test]
async fn test_profile_update_keeps_language_and_theme() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, _) = put_json(
        &client,
        server.url("/api/profile/1"),
        json!({"name": "Ada", "title": "Engineer", "language": "en", "theme": "dark"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = put_json(
        &client,
        server.url("/api/profile/1"),
        json!({"name": "Ada", "title": "Senior Engineer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = get_json(&client, server.url("/api/profile")).await;
    assert_eq!(profile["title"], "Senior Engineer");
    assert_eq!(profile["language"], "en");
    assert_eq!(profile["theme"], "dark");
}

#[tokio::test]
async fn test_invalid_path_id_is_json_error() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(server.url("/api/skills/abc"))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json error body");
    assert!(body["error"].as_str().unwrap().contains("abc"));

    let (status, body) = put_json(
        &client,
        server.url("/api/profile/one"),
        json!({"name": "Ada", "title": "Engineer"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upload_without_multipart_is_json_error() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    create_profile(&server, &client).await;

    let (status, body) = post_json(
        &client,
        server.url("/api/upload-cv"),
        json!({"cv": "not a file"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upload_long_filename() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    create_profile(&server, &client).await;

    let filename = format!("{}.pdf", "a".repeat(249));
    let resp = client
        .post(server.url("/api/upload-cv"))
        .multipart(cv_form(&filename, b"%PDF-1.4".to_vec()))
        .send()
        .await
        .expect("upload");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["filename"], filename.as_str());
    let url = body["url"].as_str().unwrap();
    assert!(url.ends_with(".pdf"));
    assert!(url.trim_start_matches("/uploads/").len() <= 255);

    let resp = client
        .get(server.url("/api/download-cv"))
        .send()
        .await
        .expect("download");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"%PDF-1.4");
}

#[tokio::test]
async fn test_get_by_id() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (_, skill) = post_json(
        &client,
        server.url("/api/skills"),
        json!({"name": "SQL", "category": "Data"}),
    )
    .await;
    let id = skill["id"].as_i64().unwrap();

    let (status, fetched) = get_json(&client, server.url(&format!("/api/skills/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, skill);

    let (_, project) = post_json(&client, server.url("/api/projects"), json!({"title": "site"})).await;
    let id = project["id"].as_i64().unwrap();
    let (status, fetched) = get_json(&client, server.url(&format!("/api/projects/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "site");

    let (_, entry) = post_json(
        &client,
        server.url("/api/education"),
        json!({"degree": "BSc", "institution": "EPFL", "achievements": ["Prize"]}),
    )
    .await;
    let id = entry["id"].as_i64().unwrap();
    let (status, fetched) = get_json(&client, server.url(&format!("/api/education/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["achievements"], json!(["Prize"]));

    for path in ["/api/skills/999", "/api/projects/999", "/api/education/999"] {
        let (status, body) = get_json(&client, server.url(path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_update_missing_reports_success() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = put_json(&client, server.url("/api/skills/999"), json!({"level": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Skill updated");

    let (status, body) = put_json(
        &client,
        server.url("/api/education/999"),
        json!({"courses": ["Compilers"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Education updated");

    let (_, skills) = get_json(&client, server.url("/api/skills")).await;
    assert_eq!(skills, json!([]));
}

#[tokio::test]
async fn test_malformed_stored_list_is_server_error() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let conn = rusqlite::Connection::open(server.data_dir().join("portfolio.db")).expect("open db");
    conn.execute(
        "INSERT INTO education (degree, institution, courses) VALUES ('MSc', 'ETH', '{not json')",
        [],
    )
    .expect("insert");
    drop(conn);

    let (status, body) = get_json(&client, server.url("/api/education")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to list education");
}
