//! End-to-end tests: configuration → plan → dispatch over a scripted
//! mock stream, without a real server connection.

#![allow(clippy::unwrap_used)]

use std::io::{self, Cursor};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use mailsalvo_core::{Config, dispatch, plan_groups};
use mailsalvo_smtp::SmtpSession;

/// Mock stream that returns predefined replies and captures client writes.
struct MockStream {
    replies: Cursor<Vec<u8>>,
    sent: Arc<Mutex<Vec<u8>>>,
}

impl MockStream {
    fn new(replies: &str) -> (Self, Arc<Mutex<Vec<u8>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                replies: Cursor::new(replies.as_bytes().to_vec()),
                sent: Arc::clone(&sent),
            },
            sent,
        )
    }
}

impl AsyncRead for MockStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let data = self.replies.get_ref();
        let pos = usize::try_from(self.replies.position()).unwrap();

        if pos >= data.len() {
            return Poll::Ready(Ok(()));
        }

        let remaining = &data[pos..];
        let to_read = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..to_read]);
        self.replies.set_position((pos + to_read) as u64);

        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.sent.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn campaign_config() -> Config {
    serde_json::from_str(
        r#"{
            "emails": [
                "a@example.com", "b@example.com", "c@example.com",
                "d@example.com", "e@example.com", "f@example.com",
                "g@example.com"
            ],
            "messages": [
                {"subject": "First", "body": "Message one"},
                {"subject": "Second", "body": "Message two"}
            ],
            "smtpHost": "localhost",
            "smtpPort": 1025,
            "numberOfGroups": 2,
            "minNumberOfEmailsPerGroup": 3,
            "maxNumberOfEmailsPerGroup": 3,
            "seed": 7
        }"#,
    )
    .unwrap()
}

/// Replies for one full accepted transaction with two recipients.
const GROUP_OK: &str = "250 EHLO OK\r\n\
                        250 sender OK\r\n\
                        250 recipient OK\r\n\
                        250 recipient OK\r\n\
                        354 go ahead\r\n\
                        250 queued\r\n";

#[tokio::test]
async fn whole_campaign_over_one_connection() {
    let config = campaign_config();
    config.validate().unwrap();

    let victims = config.victims().unwrap();
    let mut rng = config.rng();
    let groups = plan_groups(
        &victims,
        &config.messages,
        config.number_of_groups,
        config.min_number_of_emails_per_group,
        config.max_number_of_emails_per_group,
        &mut rng,
    )
    .unwrap();
    assert_eq!(groups.len(), 2);

    let script = format!("220 localhost ESMTP ready\r\n{GROUP_OK}{GROUP_OK}221 bye\r\n");
    let (stream, sent) = MockStream::new(&script);
    let mut session = SmtpSession::from_stream(stream, "localhost").await.unwrap();

    let reports = dispatch(&mut session, &groups).await.unwrap();
    session.quit().await.unwrap();

    assert_eq!(reports.len(), 2);
    for (index, report) in reports.iter().enumerate() {
        assert_eq!(report.group_index, index);
        assert_eq!(report.recipient_count, 2);
        assert_eq!(report.sender, groups[index].sender);
    }

    // Two transactions, six envelope recipients total, one QUIT.
    let text = String::from_utf8(sent.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("MAIL FROM:<").count(), 2);
    assert_eq!(text.matches("RCPT TO:<").count(), 4);
    assert_eq!(text.matches("DATA\r\n").count(), 2);
    assert_eq!(text.matches("QUIT\r\n").count(), 1);
}

#[tokio::test]
async fn first_failure_aborts_the_remaining_batch() {
    let config = campaign_config();
    let victims = config.victims().unwrap();
    let mut rng = config.rng();
    let groups = plan_groups(&victims, &config.messages, 2, 3, 3, &mut rng).unwrap();

    // Group 0 goes through; group 1 dies on its first RCPT TO.
    let script = format!(
        "220 localhost ESMTP ready\r\n\
         {GROUP_OK}\
         250 EHLO OK\r\n\
         250 sender OK\r\n\
         550 no such user\r\n"
    );
    let (stream, sent) = MockStream::new(&script);
    let mut session = SmtpSession::from_stream(stream, "localhost").await.unwrap();

    let err = dispatch(&mut session, &groups).await.unwrap_err();
    assert_eq!(err.group_index, 1);
    assert_eq!(err.sender, groups[1].sender);
    assert!(err.source.to_string().contains("RCPT TO"));

    // The first transaction completed, the second never reached DATA.
    let text = String::from_utf8(sent.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("DATA\r\n").count(), 1);
}
