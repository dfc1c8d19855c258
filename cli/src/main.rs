use formbase_cli::core::FormbaseApp;

#[tokio::main]
async fn main() {
    if let Err(e) = FormbaseApp::run().await {
        eprintln!("\nError: {:#}\n", e);
        std::process::exit(1);
    }
}
