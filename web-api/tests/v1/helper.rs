use std::{net::TcpListener, sync::Once};

use risk_core::{test_helper::InMemoryStore, RiskConfig, RiskEngine};
use tracing_subscriber::FmtSubscriber;
use web_api::startup::App;

static TRACING: Once = Once::new();

pub struct TestHelper {
    address: String,
    client: reqwest::Client,
}

impl TestHelper {
    pub async fn spawn(store: InMemoryStore) -> TestHelper {
        TestHelper::spawn_with_config(store, RiskConfig::default()).await
    }

    pub async fn spawn_with_config(store: InMemoryStore, config: RiskConfig) -> TestHelper {
        TRACING.call_once(|| {
            tracing::subscriber::set_global_default(
                FmtSubscriber::builder()
                    .with_max_level(tracing::Level::WARN)
                    .finish(),
            )
            .unwrap();
        });

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let app = App::with_store(store, listener, RiskEngine::new(config));
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move { app.run().await.unwrap() });

        TestHelper {
            address,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_risk_by_vessel(&self, vessel: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/v1.0/risk_by_vessel", self.address))
            .query(&[("vessel", vessel)])
            .send()
            .await
            .unwrap()
    }

    pub async fn get_risk_by_vessel_without_params(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/v1.0/risk_by_vessel", self.address))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_risk_by_datetime(&self, vessel: &str, timestamp: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/v1.0/risk_by_datetime", self.address))
            .query(&[("vessel", vessel), ("timestamp", timestamp)])
            .send()
            .await
            .unwrap()
    }

    pub async fn get_vessel_positions(
        &self,
        vessel: &str,
        limit: Option<u32>,
    ) -> reqwest::Response {
        let mut request = self
            .client
            .get(format!("{}/v1.0/vessels/{}/positions", self.address, vessel));

        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        request.send().await.unwrap()
    }
}
