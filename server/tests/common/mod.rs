use std::path::Path;

use catalog_lib::repository::{init_db, seed_db};
use catalog_lib::{app, AppState};
use tokio::net::TcpListener;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve the app on an ephemeral port backed by a private in-memory database
pub async fn spawn_server(seeded: bool) -> TestServer {
    let db = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
    if seeded {
        seed_db(&db).await.expect("Failed to seed test DB");
    }
    let router = app(AppState::new(&db));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    }
}
