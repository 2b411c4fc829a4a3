#![deny(warnings)]
#![deny(rust_2018_idioms)]

use tracing_subscriber::FmtSubscriber;
use web_api::{settings::Settings, startup::App};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(&settings.log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let app = App::build(&settings).await;

    app.run().await.unwrap();
}
