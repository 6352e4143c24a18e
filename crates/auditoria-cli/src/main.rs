#[tokio::main]
async fn main() -> eyre::Result<()> {
    auditoria_cli::cli::run().await
}
