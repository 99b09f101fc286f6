//! Run orchestration
//!
//! Validates every input row, probes each URI in input order, prints the
//! full report and, when a subject is given, mails the rows whose notify
//! policy matched.

use chrono::NaiveDate;
use std::io::Write;
use std::time::Instant;

use crate::core::constants::messages;
use crate::core::error::Result;
use crate::core::types::{CheckedRow, RawRow};
use crate::notification::{Mail, MailDispatch, matched_rows};
use crate::reporting::logging;
use crate::reporting::{HtmlReport, plain_text};
use crate::validation::{Probe, validate_rows};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Every row with its probe outcome, in input order
    pub rows: Vec<CheckedRow>,
    /// Number of rows selected for mail; `None` when no subject was given
    pub matched: Option<usize>,
    pub mail_sent: bool,
}

/// Sequences validation, probing, reporting and mail dispatch.
pub struct Runner<'a> {
    prober: &'a dyn Probe,
    mailer: &'a dyn MailDispatch,
}

impl<'a> Runner<'a> {
    pub fn new(prober: &'a dyn Probe, mailer: &'a dyn MailDispatch) -> Self {
        Self { prober, mailer }
    }

    /// Run the whole pipeline, writing console output to `out`.
    ///
    /// A `None` or empty `subject` means no mail is attempted. `today` is
    /// appended to the subject of any mail sent.
    ///
    /// Returns [`crate::PathfinderError::Validation`] before anything is
    /// probed if any row is invalid.
    pub async fn run<W: Write>(
        &self,
        raw_rows: &[RawRow],
        subject: Option<&str>,
        today: NaiveDate,
        out: &mut W,
    ) -> Result<RunSummary> {
        let rows = validate_rows(raw_rows)?;

        let started = Instant::now();
        let mut checked = Vec::with_capacity(rows.len());
        for row in rows {
            writeln!(out, "{} {}", messages::VALIDATING, row.uri)?;
            let status = self.prober.probe(&row.uri).await;
            checked.push(row.checked(status));
        }
        let ok_count = checked.iter().filter(|r| r.result().is_ok()).count();
        logging::log_probe_complete(checked.len(), ok_count, started.elapsed().as_millis());

        writeln!(out, "{}", plain_text(&checked))?;

        let Some(subject) = subject.filter(|s| !s.is_empty()) else {
            return Ok(RunSummary {
                rows: checked,
                matched: None,
                mail_sent: false,
            });
        };

        let matched = matched_rows(&checked);
        let count = matched.len();
        if matched.is_empty() {
            writeln!(out, "{}", messages::ZERO_MATCHED)?;
        } else {
            writeln!(
                out,
                "Sending mail with {count} matched row{}.",
                if count == 1 { "" } else { "s" }
            )?;
            let mail = build_mail(&compose_subject(subject, today), &matched);
            self.mailer.dispatch(&mail).await?;
            writeln!(out, "{}", messages::SENT_MAIL)?;
        }

        let mail_sent = count > 0;
        Ok(RunSummary {
            rows: checked,
            matched: Some(count),
            mail_sent,
        })
    }
}

/// `"<subject> <YYYY-MM-DD>"`
pub fn compose_subject(subject: &str, date: NaiveDate) -> String {
    format!("{subject} {}", date.format("%Y-%m-%d"))
}

/// Build the mail for the matched rows: plain-text table plus HTML document.
pub fn build_mail(subject: &str, matched: &[&CheckedRow]) -> Mail {
    Mail {
        subject: subject.to_string(),
        plain_text: plain_text(matched.iter().copied()),
        html: Some(HtmlReport::generate(subject, matched.iter().copied())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::error::PathfinderError;
    use crate::core::types::ProbeStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table and records every URI it was asked about.
    #[derive(Default)]
    struct StubProber {
        answers: HashMap<String, ProbeStatus>,
        calls: Mutex<Vec<String>>,
    }

    impl StubProber {
        fn with(mut self, uri: &str, status: ProbeStatus) -> Self {
            self.answers.insert(uri.to_string(), status);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Probe for StubProber {
        async fn probe(&self, uri: &str) -> ProbeStatus {
            self.calls.lock().unwrap().push(uri.to_string());
            self.answers
                .get(uri)
                .copied()
                .unwrap_or(ProbeStatus::Invalid)
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Mail>>,
    }

    impl RecordingMailer {
        fn sent(&self) -> Vec<Mail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailDispatch for RecordingMailer {
        async fn dispatch(&self, mail: &Mail) -> Result<()> {
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    struct RejectingMailer;

    #[async_trait]
    impl MailDispatch for RejectingMailer {
        async fn dispatch(&self, _mail: &Mail) -> Result<()> {
            Err(PathfinderError::MailAuth("bad credentials".to_string()))
        }
    }

    fn raw(title: &str, uri: &str, notify: &str) -> RawRow {
        RawRow::new()
            .with("title", title)
            .with("URI", uri)
            .with("notify", notify)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    async fn run(
        prober: &StubProber,
        mailer: &dyn MailDispatch,
        rows: &[RawRow],
        subject: Option<&str>,
    ) -> (Result<RunSummary>, String) {
        let mut out = Vec::new();
        let result = Runner::new(prober, mailer)
            .run(rows, subject, today(), &mut out)
            .await;
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_compose_subject() {
        assert_eq!(compose_subject("Links", today()), "Links 2024-01-31");
    }

    #[tokio::test]
    async fn test_run__single_ok_row_with_subject_sends_once() {
        let prober = StubProber::default().with("http://example.com", ProbeStatus::Ok);
        let mailer = RecordingMailer::default();
        let rows = vec![raw("Example", "http://example.com", "always")];

        let (result, out) = run(&prober, &mailer, &rows, Some("Links")).await;
        let summary = result.unwrap();

        assert_eq!(summary.matched, Some(1));
        assert!(summary.mail_sent);
        assert!(out.contains("OK         Example              http://example.com"));
        assert!(out.contains("Sending mail with 1 matched row.\n"));
        assert!(out.ends_with("Sent mail.\n"));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Links 2024-01-31");
        assert!(sent[0].plain_text.contains("http://example.com"));
        assert!(sent[0].html.as_ref().unwrap().contains("<h2>Links 2024-01-31</h2>"));
    }

    #[tokio::test]
    async fn test_run__no_subject_never_mails() {
        let prober = StubProber::default().with("http://example.com", ProbeStatus::Ok);
        let mailer = RecordingMailer::default();
        let rows = vec![raw("Example", "http://example.com", "always")];

        let (result, out) = run(&prober, &mailer, &rows, None).await;
        let summary = result.unwrap();

        assert_eq!(summary.matched, None);
        assert!(!summary.mail_sent);
        assert!(mailer.sent().is_empty());
        assert!(out.contains("OK         Example"));
        assert!(!out.contains("mail"));
    }

    #[tokio::test]
    async fn test_run__empty_subject_is_no_send() {
        let prober = StubProber::default();
        let mailer = RecordingMailer::default();
        let rows = vec![raw("Example", "http://example.com", "always")];

        let (result, _) = run(&prober, &mailer, &rows, Some("")).await;

        assert!(!result.unwrap().mail_sent);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_run__zero_matched_prints_notice() {
        let prober = StubProber::default().with("http://example.com", ProbeStatus::Ok);
        let mailer = RecordingMailer::default();
        let rows = vec![raw("Example", "http://example.com", "invalid")];

        let (result, out) = run(&prober, &mailer, &rows, Some("Links")).await;

        assert_eq!(result.unwrap().matched, Some(0));
        assert!(out.ends_with("Zero rows matched, so no mail was sent.\n"));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_run__mail_only_contains_matched_rows() {
        let prober = StubProber::default()
            .with("http://up.example.com", ProbeStatus::Ok)
            .with("http://down.example.com", ProbeStatus::Invalid);
        let mailer = RecordingMailer::default();
        let rows = vec![
            raw("Up", "http://up.example.com", "invalid"),
            raw("Down", "http://down.example.com", "invalid"),
            raw("Always", "http://up.example.com", "always"),
        ];

        let (result, out) = run(&prober, &mailer, &rows, Some("Links")).await;

        assert_eq!(result.unwrap().matched, Some(2));
        assert!(out.contains("Sending mail with 2 matched rows.\n"));
        // console report has every row
        assert!(out.contains("Up "));

        let mail = &mailer.sent()[0];
        assert!(!mail.plain_text.contains("Up "));
        assert!(mail.plain_text.contains("Down"));
        assert!(mail.plain_text.contains("Always"));
        let html = mail.html.as_ref().unwrap();
        assert!(!html.contains("<td>Up</td>"));
        assert!(html.contains("<td>Down</td>"));
    }

    #[tokio::test]
    async fn test_run__probes_sequentially_in_input_order_without_dedup() {
        let prober = StubProber::default();
        let mailer = RecordingMailer::default();
        let rows = vec![
            raw("B", "http://b.example.com", "always"),
            raw("A", "http://a.example.com", "always"),
            raw("B again", "http://b.example.com", "always"),
        ];

        let (result, out) = run(&prober, &mailer, &rows, None).await;
        let summary = result.unwrap();

        assert_eq!(
            prober.calls(),
            vec![
                "http://b.example.com",
                "http://a.example.com",
                "http://b.example.com",
            ]
        );
        let titles: Vec<&str> = summary.rows.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["B", "A", "B again"]);
        assert!(out.starts_with("Validating: http://b.example.com\nValidating: http://a.example.com\n"));
    }

    #[tokio::test]
    async fn test_run__invalid_row_aborts_before_probing() {
        let prober = StubProber::default();
        let mailer = RecordingMailer::default();
        let rows = vec![
            raw("Good", "http://example.com", "always"),
            raw("Bad", "http://example.com", "sometimes"),
        ];

        let (result, out) = run(&prober, &mailer, &rows, Some("Links")).await;

        match result {
            Err(PathfinderError::Validation(err)) => {
                assert_eq!(err.row, rows[1]);
                assert!(err.field("notify").is_some());
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(prober.calls().is_empty());
        assert!(out.is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_run__mail_auth_error_after_report() {
        let prober = StubProber::default().with("http://example.com", ProbeStatus::Ok);
        let rows = vec![raw("Example", "http://example.com", "always")];

        let (result, out) = run(&prober, &RejectingMailer, &rows, Some("Links")).await;

        assert!(matches!(result, Err(PathfinderError::MailAuth(_))));
        assert!(out.contains("OK         Example"));
        assert!(!out.contains("Sent mail."));
    }

    #[tokio::test]
    async fn test_run__empty_input() {
        let prober = StubProber::default();
        let mailer = RecordingMailer::default();

        let (result, out) = run(&prober, &mailer, &[], Some("Links")).await;

        assert_eq!(result.unwrap().matched, Some(0));
        assert!(out.starts_with("Result     Title"));
        assert!(mailer.sent().is_empty());
    }

    #[test]
    fn test_build_mail__is_deterministic() {
        let row = crate::core::types::Row {
            title: "Example".to_string(),
            uri: "http://example.com".to_string(),
            notify: crate::core::types::NotifyPolicy::Always,
        }
        .checked(ProbeStatus::Ok);

        let first = build_mail("Links 2024-01-31", &[&row]);
        let second = build_mail("Links 2024-01-31", &[&row]);
        assert_eq!(first, second);
    }
}
