use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    stockroom::cli::run().await?;
    Ok(())
}
