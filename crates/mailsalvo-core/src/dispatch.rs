//! Batch dispatch loop.
//!
//! Drains a plan, in order, through one SMTP session. The first failed
//! group aborts the remaining batch (no per-group isolation); the error
//! names the failing group and carries the session error. Quitting and
//! closing the session stays with the caller either way.

use mailsalvo_smtp::{Address, SmtpSession};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info};

use crate::plan::Group;

/// One delivered group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Position of the group in the plan.
    pub group_index: usize,
    /// Sender the message went out as.
    pub sender: Address,
    /// How many recipients the transaction covered.
    pub recipient_count: usize,
}

/// Delivery failure, carrying the failing group's position.
#[derive(Debug, thiserror::Error)]
#[error("delivery of group {group_index} (sender {sender}) failed: {source}")]
pub struct DispatchError {
    /// Position of the failing group in the plan.
    pub group_index: usize,
    /// Sender of the failing group.
    pub sender: Address,
    /// The session error that aborted the batch.
    #[source]
    pub source: mailsalvo_smtp::Error,
}

/// Sends every group through `session`, in order, over one connection.
///
/// Returns one [`DeliveryReport`] per delivered group. On failure the
/// delivered prefix is dropped with the plan; the [`DispatchError`] is
/// what the run reports.
///
/// # Errors
///
/// Returns a [`DispatchError`] for the first group whose transaction was
/// rejected or whose connection failed; later groups are not attempted.
pub async fn dispatch<S>(
    session: &mut SmtpSession<S>,
    groups: &[Group],
) -> Result<Vec<DeliveryReport>, DispatchError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reports = Vec::with_capacity(groups.len());

    for (group_index, group) in groups.iter().enumerate() {
        info!(
            group_index,
            sender = %group.sender,
            recipients = group.recipients.len(),
            subject = %group.message.subject,
            "delivering group"
        );
        match session
            .send_mail(
                &group.sender,
                &group.recipients,
                &group.message.subject,
                &group.message.body,
            )
            .await
        {
            Ok(()) => reports.push(DeliveryReport {
                group_index,
                sender: group.sender.clone(),
                recipient_count: group.recipients.len(),
            }),
            Err(source) => {
                error!(group_index, %source, "aborting batch");
                return Err(DispatchError {
                    group_index,
                    sender: group.sender.clone(),
                    source,
                });
            }
        }
    }

    Ok(reports)
}
