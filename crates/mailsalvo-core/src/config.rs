//! JSON configuration model and validation.
//!
//! Field names follow the campaign file format: `emails`, `messages`,
//! `smtpHost`, `smtpPort`, `numberOfGroups`,
//! `minNumberOfEmailsPerGroup`, `maxNumberOfEmailsPerGroup`, plus an
//! optional `seed` for reproducible planning.

use std::path::Path;

use mailsalvo_smtp::Address;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::Result;
use crate::message::Message;

/// Campaign configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Victim address pool.
    pub emails: Vec<String>,
    /// Candidate messages.
    pub messages: Vec<Message>,
    /// SMTP server host.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// Number of groups to form.
    pub number_of_groups: usize,
    /// Minimum addresses per group, sender included.
    pub min_number_of_emails_per_group: usize,
    /// Maximum addresses per group, sender included.
    pub max_number_of_emails_per_group: usize,
    /// Optional RNG seed for reproducible planning.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An entry in `emails` is not a plausible address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// `emails` is empty.
    #[error("no victim addresses configured")]
    NoVictims,
    /// `messages` is empty.
    #[error("no messages configured")]
    NoMessages,
    /// A message has a blank subject or body.
    #[error("message {0} has a blank subject or body")]
    BlankMessage(usize),
    /// `smtpHost` is blank.
    #[error("smtpHost must not be empty")]
    EmptyHost,
    /// `smtpPort` is zero.
    #[error("smtpPort must be nonzero")]
    InvalidPort,
    /// `numberOfGroups` is zero.
    #[error("numberOfGroups must be at least 1")]
    NoGroups,
    /// Group size bounds cannot form a sender + recipients group.
    #[error("group bounds [{min}, {max}] are invalid")]
    InvalidBounds {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl Config {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validates every field, collecting all violations rather than
    /// stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns the full list of violations.
    pub fn validate(&self) -> std::result::Result<(), Vec<ConfigError>> {
        let mut violations = Vec::new();

        if self.emails.is_empty() {
            violations.push(ConfigError::NoVictims);
        }
        for email in &self.emails {
            if Address::new(email.clone()).is_err() {
                violations.push(ConfigError::InvalidEmail(email.clone()));
            }
        }

        if self.messages.is_empty() {
            violations.push(ConfigError::NoMessages);
        }
        for (index, message) in self.messages.iter().enumerate() {
            if message.is_blank() {
                violations.push(ConfigError::BlankMessage(index));
            }
        }

        if self.smtp_host.trim().is_empty() {
            violations.push(ConfigError::EmptyHost);
        }
        if self.smtp_port == 0 {
            violations.push(ConfigError::InvalidPort);
        }
        if self.number_of_groups == 0 {
            violations.push(ConfigError::NoGroups);
        }
        if self.min_number_of_emails_per_group < 2
            || self.min_number_of_emails_per_group > self.max_number_of_emails_per_group
        {
            violations.push(ConfigError::InvalidBounds {
                min: self.min_number_of_emails_per_group,
                max: self.max_number_of_emails_per_group,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Victim pool as validated addresses. Call after [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first address that fails to parse.
    pub fn victims(&self) -> Result<Vec<Address>> {
        self.emails
            .iter()
            .map(|email| Ok(Address::new(email.clone())?))
            .collect()
    }

    /// RNG for planning: seeded when `seed` is set, OS entropy otherwise.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}
