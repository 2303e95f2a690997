use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{LeaderboardEntry, Submission, User};
use crate::stats;
use crate::store::AdminStore;

pub fn render_users(users: &[&User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }
    let mut output = String::new();
    for user in users {
        let _ = writeln!(
            output,
            "[{}] {} <{}> {} pts, {}, joined {}",
            user.id, user.name, user.email, user.score, user.status, user.joined_date
        );
    }
    output
}

pub fn render_submissions(submissions: &[&Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions found.\n".to_string();
    }
    let mut output = String::new();
    for submission in submissions {
        let _ = writeln!(
            output,
            "[{}] {} ({} {}): \"{}\"",
            submission.id, submission.user_name, submission.date, submission.time, submission.sentence
        );
    }
    output
}

pub fn render_leaderboard(store: &AdminStore, entries: &[LeaderboardEntry], capacity: u32) -> String {
    let mut output = String::new();
    for entry in entries {
        let progress = store
            .user(entry.user_id)
            .map(|user| stats::progress_percent(user, capacity))
            .unwrap_or(0);
        let _ = writeln!(
            output,
            "- #{} {}: {} pts ({}% of {})",
            entry.rank, entry.name, entry.score, progress, capacity
        );
    }
    output
}

pub fn build_report(store: &AdminStore, date: NaiveDate, capacity: u32) -> String {
    let summary = store.dashboard(date);
    let board = store.leaderboard();

    let mut output = String::new();

    let _ = writeln!(output, "# Word of the Day Admin Report");
    let _ = writeln!(output, "Generated for {}", date);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Total users: {}", summary.total_users);
    let _ = writeln!(output, "- Sentences today: {}", summary.submissions_today);
    let _ = writeln!(output, "- Average score: {}", summary.average_score);
    let _ = writeln!(output, "- Weekly submissions: {}", summary.weekly_total);
    let _ = writeln!(
        output,
        "- Word posted: {}",
        if summary.word_posted { "Yes" } else { "No" }
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Daily Word");
    match store.daily_word(date) {
        Some(word) => {
            let _ = writeln!(
                output,
                "- English: {} ({}) e.g. \"{}\"",
                word.english.word, word.english.meaning, word.english.example
            );
            let _ = writeln!(
                output,
                "- Tamil: {} ({}) e.g. \"{}\"",
                word.tamil.word, word.tamil.meaning, word.tamil.example
            );
        }
        None => {
            let _ = writeln!(output, "No word published for this date.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Leaderboard");
    if board.is_empty() {
        let _ = writeln!(output, "No users registered.");
    } else {
        output.push_str(&render_leaderboard(store, &board, capacity));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Performers");
    let top = stats::top_performers(store.users(), 3);
    if top.is_empty() {
        let _ = writeln!(output, "No users registered.");
    } else {
        for entry in top {
            let _ = writeln!(output, "{}. {} ({} pts)", entry.rank, entry.name, entry.score);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Activity");
    for bar in stats::activity_bars(store.activity()) {
        let _ = writeln!(
            output,
            "- {}: {} ({:.0}%)",
            bar.label, bar.count, bar.height_percent
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Submissions");
    // Later insertions are newer, so the tail of the list is listed first.
    let submissions = store.submissions();
    if submissions.is_empty() {
        let _ = writeln!(output, "No submissions found.");
    } else {
        for submission in submissions.iter().rev().take(5) {
            let _ = writeln!(
                output,
                "- {} on {} at {}: \"{}\"",
                submission.user_name, submission.date, submission.time, submission.sentence
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityWeek;

    #[test]
    fn report_covers_seeded_store() {
        let store = AdminStore::seeded();
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let report = build_report(&store, date, 250);

        assert!(report.starts_with("# Word of the Day Admin Report"));
        assert!(report.contains("- Sentences today: 2"));
        assert!(report.contains("- Average score: 111"));
        assert!(report.contains("- #1 Sowmya G: 210 pts (84% of 250)"));
        assert!(report.contains("No word published for this date."));
        assert!(report.contains("- F: 30 (100%)"));

        let recent = report.split("## Recent Submissions").nth(1).unwrap();
        assert!(recent.trim_start().starts_with("- Karthik S on 2026-02-09"));
    }

    #[test]
    fn report_handles_empty_store() {
        let store = AdminStore::new(Vec::new(), Vec::new(), ActivityWeek([0; 7]));
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let report = build_report(&store, date, 250);

        assert!(report.contains("- Average score: 0"));
        assert!(report.contains("No users registered."));
        assert!(report.contains("No submissions found."));
    }

    #[test]
    fn listings_render_one_line_per_record() {
        let store = AdminStore::seeded();
        let users: Vec<&User> = store.users().iter().collect();
        let text = render_users(&users);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("[3] Rahul Raj <rahul@example.com> 45 pts, Banned"));

        let subs = store.submissions_on_date(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        let text = render_submissions(&subs);
        assert!(text.starts_with("[103] Sowmya G (2026-02-09 09:00 PM)"));
        assert_eq!(render_submissions(&[]), "No submissions found.\n");
        assert_eq!(render_leaderboard(&store, &[], 250), "");
    }
}
