use jobhunt::prelude::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    jobhunt::cmd::run().await?;
    Ok(())
}
