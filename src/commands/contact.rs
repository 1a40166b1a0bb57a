use anyhow::Result;

use crate::config::Config;
use crate::contact::ContactForm;

pub async fn run(form: ContactForm, config: &Config) -> Result<()> {
    let service = super::connect(config)?;
    service.contact(&form).await?;
    println!("Thank you for your message. We will reply within 1-3 business days.");
    Ok(())
}
