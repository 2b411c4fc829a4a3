use std::{io::Error, net::TcpListener};

use actix_web::{
    dev::Server,
    middleware::{Compress, Condition},
    web::{self, Data},
    HttpServer,
};
use postgres::PostgresAdapter;
use risk_core::RiskEngine;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;

use crate::{
    routes,
    settings::{Environment, Settings},
    ApiDoc, Database,
};

pub struct App {
    server: Server,
    port: u16,
}

impl App {
    pub async fn build(settings: &Settings) -> Self {
        let listener = TcpListener::bind(settings.api.listener_address()).unwrap();
        let port = listener.local_addr().unwrap().port();

        let postgres = PostgresAdapter::new(&settings.postgres).await.unwrap();
        let engine = RiskEngine::new(settings.risk_config());

        let server = create_server(
            postgres,
            listener,
            engine,
            settings.environment,
            settings.api.num_workers,
        )
        .unwrap();

        App { server, port }
    }

    pub fn with_store<T: Database>(store: T, listener: TcpListener, engine: RiskEngine) -> Self {
        let port = listener.local_addr().unwrap().port();
        let server = create_server(store, listener, engine, Environment::Test, None).unwrap();

        App { server, port }
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        self.server.await
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

fn create_server<T: Database>(
    database: T,
    listener: TcpListener,
    engine: RiskEngine,
    environment: Environment,
    num_workers: Option<u32>,
) -> Result<Server, Error> {
    let not_prod = environment != Environment::Production;

    let mut server = HttpServer::new(move || {
        let scope = web::scope("/v1.0")
            .route(
                "/risk_by_vessel",
                web::get().to(routes::v1::risk::risk_by_vessel::<T>),
            )
            .route(
                "/risk_by_datetime",
                web::get().to(routes::v1::risk::risk_by_datetime::<T>),
            )
            .route(
                "/vessels/{vessel}/positions",
                web::get().to(routes::v1::vessel::vessel_positions::<T>),
            );

        actix_web::App::new()
            .app_data(Data::new(database.clone()))
            .app_data(Data::new(engine.clone()))
            .wrap(Compress::default())
            .wrap(Condition::new(not_prod, actix_cors::Cors::permissive()))
            .wrap(TracingLogger::default())
            .service(scope)
            .route("/api-doc/openapi.json", web::get().to(openapi))
    })
    .listen(listener)?;

    if let Some(workers) = num_workers {
        server = server.workers(workers as usize);
    }

    Ok(server.run())
}

async fn openapi() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
