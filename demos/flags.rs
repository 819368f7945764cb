//! Flag binding example.
//!
//! Run with:
//!   cargo run --example flags -- --port 9000 --verbose
//!   cargo run --example flags -- --help
//!   cargo run --example flags -- --max-conn lots   # see the error

use envspec::prelude::*;

#[derive(Debug, Default, DeriveSpec)]
struct ServerFlags {
    #[spec(default = "8080", usage = "port to listen on")]
    port: i64,

    #[spec(flagname = "max-conn", default = "128", usage = "maximum open connections")]
    max_conn: u64,

    #[spec(default = "0.0.0.0", usage = "address to bind")]
    host: String,

    #[spec(default = "0.9", usage = "load shedding threshold")]
    threshold: f64,

    #[spec(usage = "log every request")]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut flags = ServerFlags::default();

    if let Err(err) = Binder::new().program_name("flags").bind_flags(&mut flags) {
        if err.is_help() {
            println!("{}", err);
            return;
        }
        eprintln!("{}", err);
        std::process::exit(2);
    }

    println!(
        "listening on {}:{} (max {} connections, shed at {:.0}%)",
        flags.host,
        flags.port,
        flags.max_conn,
        flags.threshold * 100.0
    );
    if flags.verbose {
        println!("request logging enabled");
    }
}
