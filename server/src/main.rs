#[tokio::main]
async fn main() {
    if let Err(e) = catalog_lib::start_server().await {
        eprintln!("catalog-server failed: {e}");
        std::process::exit(1);
    }
}
