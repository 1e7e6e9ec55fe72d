//! Terminal front end for the catalog

pub mod app;
pub mod events;
pub mod render;

use crate::client::CatalogApi;

/// Entry point for the terminal UI
pub async fn run<C: CatalogApi>(client: C) -> std::io::Result<()> {
    let app = app::App::new(client);
    app.run().await
}
