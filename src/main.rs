use std::net::Ipv4Addr;

use log::error;

use wskeep::server::{Server, PORT};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server = match Server::bind((Ipv4Addr::UNSPECIFIED, PORT)).await {
        Ok(server) => server,
        Err(e) => {
            error!("couldn't listen on port {}, error: {}", PORT, e);
            return Err(e);
        }
    };

    server.run().await
}
