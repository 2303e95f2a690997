use std::io::Write;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::models::DashboardSummary;
use crate::store::AdminStore;

pub fn format_clock(now: NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y, %I:%M %p").to_string()
}

pub fn render_dashboard(summary: &DashboardSummary, now: NaiveDateTime) -> String {
    format!(
        "{}\n\
         Total users:        {}\n\
         Sentences today:    {}\n\
         Average score:      {}\n\
         Weekly submissions: {}\n\
         Word posted:        {}\n",
        format_clock(now),
        summary.total_users,
        summary.submissions_today,
        summary.average_score,
        summary.weekly_total,
        if summary.word_posted { "Yes" } else { "No" },
    )
}

/// Re-renders the dashboard every `period`, forever unless `ticks` is set.
pub async fn watch<W, F>(
    store: &AdminStore,
    out: &mut W,
    period: Duration,
    ticks: Option<u64>,
    now: F,
) -> std::io::Result<()>
where
    W: Write,
    F: Fn() -> NaiveDateTime,
{
    let mut interval = tokio::time::interval(period);
    let mut rendered = 0u64;

    loop {
        if ticks.is_some_and(|limit| rendered >= limit) {
            return Ok(());
        }
        interval.tick().await;

        let current = now();
        let summary = store.dashboard(current.date());
        writeln!(out, "{}", render_dashboard(&summary, current))?;
        out.flush()?;
        rendered += 1;
        debug!(rendered, "dashboard refreshed");
    }
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn clock_uses_long_form() {
        assert_eq!(format_clock(morning()), "Tuesday, February 10, 2026, 10:30 AM");
    }

    #[test]
    fn dashboard_rendering_lists_figures() {
        let store = AdminStore::seeded();
        let text = render_dashboard(&store.dashboard(morning().date()), morning());
        assert!(text.contains("Sentences today:    2"));
        assert!(text.contains("Word posted:        No"));
    }

    #[tokio::test]
    async fn watch_stops_after_requested_ticks() {
        let store = AdminStore::seeded();
        let mut out = Vec::new();
        watch(&store, &mut out, Duration::from_millis(5), Some(2), morning)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Tuesday, February 10, 2026").count(), 2);
    }
}
