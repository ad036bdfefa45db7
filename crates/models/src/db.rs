use std::time::{Duration, Instant};

use configs::DatabaseConfig;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};
use tracing::info;

/// Long-lived MongoDB handle, built once at startup and shared by the
/// repositories. The driver pools connections internally.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Round-trip a `ping` against the `admin` database.
    pub async fn ping(&self) -> anyhow::Result<u128> {
        let start = Instant::now();
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(start.elapsed().as_millis())
    }

    /// Close pooled connections and wait for in-flight operations.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("mongodb client shut down");
    }
}

pub async fn client_options(cfg: &DatabaseConfig) -> anyhow::Result<ClientOptions> {
    let mut opts = ClientOptions::parse(&cfg.url).await?;
    opts.app_name = Some("car-doctor".to_string());
    opts.max_pool_size = Some(cfg.max_pool_size);
    opts.min_pool_size = Some(cfg.min_pool_size);
    opts.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    opts.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));
    opts.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    Ok(opts)
}

/// Build the client and confirm the deployment answers a ping.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<MongoStore> {
    let opts = client_options(cfg).await?;
    let client = Client::with_options(opts)?;
    let database = client.database(&cfg.name);
    let store = MongoStore { client, database };
    let elapsed_ms = store.ping().await?;
    info!(database = %cfg.name, elapsed_ms, "pinged deployment; connected to MongoDB");
    Ok(store)
}
