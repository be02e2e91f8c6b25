pub mod server;

use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        data_dir: PathBuf,
        frontend_url: String,
        session_ttl_seconds: u64,
    },
}
