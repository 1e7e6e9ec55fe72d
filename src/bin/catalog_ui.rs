//! Terminal client for the book catalog server

use book_catalog::client::HttpCatalogClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = HttpCatalogClient::from_env();
    book_catalog::ui::tui::run(client).await?;
    Ok(())
}
