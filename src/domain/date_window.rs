//! Submission-date window queried on each weekday run.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Inclusive range of submission dates to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window for a run on `today`.
    ///
    /// arXiv announces with a lag, so a run looks two days back. Monday runs
    /// pick up Thursday's submissions and Tuesday runs cover Friday through
    /// Sunday, which keeps weekend submissions from being skipped.
    pub fn for_run_on(today: NaiveDate) -> Self {
        match today.weekday() {
            Weekday::Mon => {
                let thursday = today - Duration::days(4);
                Self { from: thursday, to: thursday }
            }
            Weekday::Tue => {
                Self { from: today - Duration::days(4), to: today - Duration::days(2) }
            }
            _ => {
                let day = today - Duration::days(2);
                Self { from: day, to: day }
            }
        }
    }

    /// arXiv search clause restricting `subject` to this window.
    pub fn query(&self, subject: &str) -> String {
        format!(
            "({}) AND submittedDate:[{}000000 TO {}235959]",
            subject,
            self.from.format("%Y%m%d"),
            self.to.format("%Y%m%d")
        )
    }

    /// Date shown in the front matter.
    pub fn display_date(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}
