use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Trim and check the raw inputs. The subject comes from a fixed list,
    /// so it is only checked for presence.
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Result<Self> {
        let form = ContactForm {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.to_string(),
            message: message.trim().to_string(),
        };

        if form.name.is_empty()
            || form.email.is_empty()
            || form.subject.is_empty()
            || form.message.is_empty()
        {
            return Err(Error::invalid("Fill in all required fields"));
        }

        if !is_valid_email(&form.email) {
            return Err(Error::invalid("Enter a valid email address"));
        }

        Ok(form)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}
