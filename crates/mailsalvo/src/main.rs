//! `mailsalvo` - bulk-mail dispatcher.
//!
//! Reads a JSON campaign file, partitions the address pool into disjoint
//! sender/recipient groups, and delivers one message per group over a
//! single raw SMTP connection. The process exits zero only if every
//! planned group was delivered.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use anyhow::Context;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mailsalvo_core::{Config, Error, dispatch, plan_groups};
use mailsalvo_smtp::SmtpSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailsalvo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    info!(%path, "loading campaign configuration");

    let config = Config::load(&path).with_context(|| format!("loading {path}"))?;
    if let Err(violations) = config.validate() {
        return Err(Error::Invalid(violations).into());
    }

    let victims = config.victims()?;
    let mut rng = config.rng();
    let groups = plan_groups(
        &victims,
        &config.messages,
        config.number_of_groups,
        config.min_number_of_emails_per_group,
        config.max_number_of_emails_per_group,
        &mut rng,
    )
    .map_err(Error::from)?;
    info!(groups = groups.len(), "plan ready");

    let mut session = SmtpSession::connect(&config.smtp_host, config.smtp_port)
        .await
        .map_err(Error::from)?;
    let outcome = dispatch(&mut session, &groups).await;
    session.quit().await.map_err(Error::from)?;

    let reports = outcome.map_err(Error::from)?;
    info!(delivered = reports.len(), "campaign complete");
    Ok(())
}
