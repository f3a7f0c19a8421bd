use cors_file_server::{Config, CorsFileServer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    CorsFileServer::new(Config::get())?.start()
}
