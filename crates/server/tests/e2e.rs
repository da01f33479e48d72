use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use uuid::Uuid;

use server::routes;
use server::startup;
use service::storage::{DocumentStore, JsonFileStore};

struct TestApp {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    path: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated store file per test run
    let path = std::env::temp_dir().join(format!("e2e_{}.json", Uuid::new_v4()));
    let store: Arc<dyn DocumentStore> = JsonFileStore::open(&path).await?;
    let state = server::state::AppState::new(store, true, false);
    let app = routes::build_router(state, routes::build_cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(e) = startup::serve(listener, app, shutdown).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, shutdown: Some(tx), path })
}

#[tokio::test]
async fn e2e_storefront_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Shapewear Bodysuit Backend Running");

    let res = c.get(format!("{}/api/pricing", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let plans = res.json::<Vec<models::Plan>>().await?;
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].name, "Essential");
    assert_eq!(plans[0].price, 39.0);

    let res = c.get(format!("{}/api/blogs", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let posts = res.json::<Vec<models::BlogPost>>().await?;
    assert!(posts.is_empty());

    let res = c
        .post(format!("{}/api/contact", app.base_url))
        .json(&json!({"name": "Bo", "email": "bo@example.com", "subject": "Returns", "message": "How do returns work?"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"status": "ok"}));

    let res = c.get(format!("{}/test", app.base_url)).send().await?;
    let report = res.json::<serde_json::Value>().await?;
    assert_eq!(report["connection_status"], "Connected");
    assert_eq!(report["collections"], json!(["contactmessage", "plan"]));
    assert_eq!(report["database_name"], "❌ Not Set");
    Ok(())
}
