use boldo_config::Config;
use boldo_email_contracts::EmailService;
use tracing::info;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to {:?} email provider", config.email.provider);
    let email = email::connect(&config.email)?;
    email.ping().await?;

    let server = environment::rest_server(&config, email)?;
    info!("Starting http server on {}", config.http.address);
    server.serve(config.http.address).await
}
