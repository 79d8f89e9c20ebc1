use api_rest::{router, AppState};
use directory_core::dataset::{RawContact, RawPatient};
use directory_core::{normalize, DirectoryService};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn patient(id: u32, name: &str, age: u32, issue: &str, email: &str) -> RawPatient {
    RawPatient {
        patient_id: id,
        patient_name: name.into(),
        age,
        photo_url: None,
        contact: vec![RawContact {
            address: Some(format!("{id} Test Street")),
            number: Some(format!("555-000-{id:04}")),
            email: Some(email.into()),
        }],
        medical_issue: issue.into(),
    }
}

async fn spawn_app() -> std::net::SocketAddr {
    let records = normalize(vec![
        patient(1, "Zoe Normanvill", 77, "fever", "smcneice0@geocities.com"),
        patient(2, "Kellie Stagg", 51, "headache", "Ideruagiero0@vk.com"),
        patient(3, "Bertina Cottem", 92, "sore throat", "bmelonbv0@seattletimes.com"),
        patient(4, "Dianemarie Goodge", 75, "sprained ankle", "mhargreave0@ucoz.ru"),
    ]);
    let app = router(AppState::new(DirectoryService::new(records)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(addr: std::net::SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

async fn get_json(addr: std::net::SocketAddr, path: &str) -> (u16, Value) {
    let (status, _, body) = send_raw(addr, path).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|p| p["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_ok() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn lists_first_page_with_defaults() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "/data").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 4);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 12);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(ids(&body), ["ID-0001", "ID-0002", "ID-0003", "ID-0004"]);
    assert_eq!(body["data"][0]["issueColor"], "red");
    assert_eq!(body["data"][2]["issue"], "Sore Throat");
}

#[tokio::test]
async fn sorts_descending_by_age_before_paging() {
    let addr = spawn_app().await;
    let (_, body) = get_json(addr, "/data?limit=2&page=1&sortBy=age&order=desc").await;
    let ages: Vec<u64> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|p| p["age"].as_u64().expect("age"))
        .collect();
    assert_eq!(ages, [92, 77]);
    assert_eq!(body["total"], 4);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn filters_by_issue_and_email() {
    let addr = spawn_app().await;
    let (_, body) = get_json(addr, "/data?issue=fever,headache&hasEmail=1").await;
    assert_eq!(ids(&body), ["ID-0001", "ID-0002"]);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn clamps_page_beyond_the_end() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "/api/data?page=999&limit=2").await;
    assert_eq!(status, 200);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 2);
    assert_eq!(ids(&body), ["ID-0003", "ID-0004"]);
}

#[tokio::test]
async fn searches_email_domain_case_insensitively() {
    let addr = spawn_app().await;
    let (_, body) = get_json(addr, "/data?q=VK.COM").await;
    assert_eq!(ids(&body), ["ID-0002"]);
}

#[tokio::test]
async fn malformed_numbers_fall_back_to_defaults() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "/data?limit=abc&page=-4&ageMin=x").await;
    assert_eq!(status, 200);
    assert_eq!(body["limit"], 12);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn decodes_encoded_search_terms() {
    let addr = spawn_app().await;
    let (_, body) = get_json(addr, "/data?q=sore%20throat").await;
    assert_eq!(ids(&body), ["ID-0003"]);
}

#[tokio::test]
async fn allows_cross_origin_requests() {
    let addr = spawn_app().await;
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!(
        "GET /data HTTP/1.1\r\nHost: {addr}\r\nOrigin: http://localhost:5173\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    assert!(response
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: *"));
}

#[tokio::test]
async fn serves_openapi_document() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "/api-docs/openapi.json").await;
    assert_eq!(status, 200);
    assert!(body["paths"]["/data"].is_object());
    assert!(body["components"]["schemas"]["PatientPage"].is_object());
}
