pub mod server;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        secret: SecretString,
        frontend_url: String,
    },
}
