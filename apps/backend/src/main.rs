#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quiz_converter_backend::run().await
}
