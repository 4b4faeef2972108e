use anyhow::bail;
use boldo_client::{
    ContactField, FormController, FormControllerConfig, HttpContactApi, SubmitStatus,
};
use boldo_config::Config;
use clap::Subcommand;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit the contact form of a running server
    #[command(aliases(["s"]))]
    Submit {
        /// Base url of the website
        #[arg(long, default_value = "http://127.0.0.1:8000/")]
        url: Url,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Submit {
                url,
                name,
                company,
                email,
                message,
            } => {
                let api = HttpContactApi::new(&url)?;
                let controller = FormController::new(
                    api,
                    FormControllerConfig {
                        reset_delay: *config.client.reset_delay,
                    },
                );
                controller.update_field(ContactField::Name, name);
                controller.update_field(ContactField::Company, company);
                controller.update_field(ContactField::Email, email);
                controller.update_field(ContactField::Message, message);

                match controller.submit().await? {
                    SubmitStatus::Success => println!("Заявка отправлена"),
                    SubmitStatus::Error(message) => bail!("{message}"),
                    SubmitStatus::Idle => {}
                }

                Ok(())
            }
        }
    }
}
