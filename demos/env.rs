//! Environment binding example.
//!
//! Binds a service configuration from `APP_*` variables, runs a preflight
//! check first so every problem is reported at once, and logs each field as
//! it is bound.
//!
//! Run with:
//!   APP_DATABASE_URL=postgres://localhost/app cargo run --example env
//!   APP_PORT=eighty cargo run --example env   # see the preflight report

use envspec::prelude::*;

/// Comma-separated list of hosts.
#[derive(Debug, Default)]
struct Hosts(Vec<String>);

impl Value for Hosts {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = raw
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }
}

#[derive(Debug, Default, DeriveSpec)]
struct AppConfig {
    #[spec(key = "APP_HOST", default = "localhost")]
    host: String,

    #[spec(key = "APP_PORT", default = "8080")]
    port: u16,

    #[spec(key = "APP_DATABASE_URL", required)]
    database_url: String,

    #[spec(key = "APP_TIMEOUT", default = "2.5")]
    timeout: f64,

    #[spec(key = "APP_REPLICAS", custom)]
    replicas: Hosts,

    #[spec(key = "APP_DEBUG")]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Environment Binding Demo ===\n");

    let mut config = AppConfig::default();

    // Report everything that is wrong before touching the record.
    Binder::new().check(&mut config).unwrap_or_exit();

    if envspec::bind(&mut config, true).is_err() {
        std::process::exit(1);
    }

    println!("\nhost:         {}", config.host);
    println!("port:         {}", config.port);
    println!("database_url: {}", config.database_url);
    println!("timeout:      {}s", config.timeout);
    println!("replicas:     {:?}", config.replicas.0);
    println!("debug:        {}", config.debug);
}
