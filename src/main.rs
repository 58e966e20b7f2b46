#[tokio::main]
async fn main() -> eyre::Result<()> {
    scopemq::run().start().await
}
