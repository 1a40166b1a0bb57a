use anyhow::Result;

use crate::cli::ConsentAction;
use crate::config::Config;
use crate::consent::ConsentStore;

pub fn run(action: ConsentAction, config: &Config) -> Result<()> {
    let store = match &config.consent_file {
        Some(path) => ConsentStore::new(path),
        None => ConsentStore::default_location(),
    };

    let record = match action {
        ConsentAction::Show => match store.load() {
            Some(record) => record,
            None => {
                println!("No consent decision recorded ({})", store.path().display());
                return Ok(());
            }
        },
        ConsentAction::AcceptAll => store.accept_all()?,
        ConsentAction::NecessaryOnly => store.accept_necessary_only()?,
    };

    println!("Analytics: {}", yes_no(record.analytics));
    println!("Ads: {}", yes_no(record.adsense));
    println!("Cookie: {}", record.cookie_header()?);
    println!("Ad script may load: {}", yes_no(store.ads_allowed()));

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "allowed"
    } else {
        "declined"
    }
}
