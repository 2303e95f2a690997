use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{AdminError, AdminResult};
use crate::models::{
    ActivityWeek, DailyWord, DashboardSummary, LeaderboardEntry, Submission, User, UserStatus,
    WordEntry,
};
use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Replaced,
}

/// In-memory owner of every collection the admin console reads and mutates.
#[derive(Debug, Clone)]
pub struct AdminStore {
    users: Vec<User>,
    submissions: Vec<Submission>,
    activity: ActivityWeek,
    daily_words: BTreeMap<NaiveDate, DailyWord>,
}

impl AdminStore {
    pub fn new(users: Vec<User>, submissions: Vec<Submission>, activity: ActivityWeek) -> Self {
        Self {
            users,
            submissions,
            activity,
            daily_words: BTreeMap::new(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users(), seed_submissions(), seed_activity())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn activity(&self) -> &ActivityWeek {
        &self.activity
    }

    pub fn user(&self, user_id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn daily_word(&self, date: NaiveDate) -> Option<&DailyWord> {
        self.daily_words.get(&date)
    }

    pub fn submissions_on_date(&self, date: NaiveDate) -> Vec<&Submission> {
        stats::submissions_on_date(&self.submissions, date)
    }

    pub fn average_score(&self) -> u32 {
        stats::average_score(&self.users)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        stats::leaderboard(&self.users)
    }

    pub fn weekly_activity_total(&self) -> u32 {
        stats::weekly_activity_total(&self.activity)
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary {
            date: today,
            total_users: self.users.len(),
            submissions_today: self.submissions_on_date(today).len(),
            average_score: self.average_score(),
            weekly_total: self.weekly_activity_total(),
            word_posted: self.daily_words.contains_key(&today),
        }
    }

    pub(crate) fn toggle_user_status(&mut self, user_id: u32) -> AdminResult<UserStatus> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AdminError::UserNotFound(user_id))?;
        user.status = user.status.toggled();
        info!(user_id, status = %user.status, "user status changed");
        Ok(user.status)
    }

    /// Returns whether the status actually changed.
    pub(crate) fn set_user_status(&mut self, user_id: u32, status: UserStatus) -> AdminResult<bool> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AdminError::UserNotFound(user_id))?;
        if user.status == status {
            return Ok(false);
        }
        user.status = status;
        info!(user_id, status = %user.status, "user status changed");
        Ok(true)
    }

    pub(crate) fn reset_all_scores(&mut self) -> usize {
        for user in self.users.iter_mut() {
            user.score = 0;
        }
        info!(users = self.users.len(), "scores reset for new cycle");
        self.users.len()
    }

    /// Removes the last submission in display order written by `user_id`.
    pub(crate) fn delete_most_recent_submission(&mut self, user_id: u32) -> AdminResult<Submission> {
        let index = self
            .submissions
            .iter()
            .rposition(|s| s.user_id == user_id)
            .ok_or(AdminError::NoSubmissions(user_id))?;
        let removed = self.submissions.remove(index);
        info!(user_id, submission_id = removed.id, "submission deleted");
        Ok(removed)
    }

    pub fn publish_daily_word(&mut self, word: DailyWord) -> AdminResult<PublishOutcome> {
        validate_entry("English", &word.english)?;
        validate_entry("Tamil", &word.tamil)?;

        let date = word.date;
        let outcome = match self.daily_words.insert(date, word) {
            Some(_) => PublishOutcome::Replaced,
            None => PublishOutcome::Created,
        };
        info!(%date, ?outcome, "daily word published");
        Ok(outcome)
    }
}

fn validate_entry(language: &str, entry: &WordEntry) -> AdminResult<()> {
    let fields = [
        ("word", &entry.word),
        ("meaning", &entry.meaning),
        ("example", &entry.example),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            warn!(language, field, "daily word rejected");
            return Err(AdminError::Validation(format!(
                "{language} {field} is required"
            )));
        }
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_users() -> Vec<User> {
    let users = vec![
        (1, "Anish Kumar", "anish@example.com", 125, UserStatus::Active, date(2026, 1, 15)),
        (2, "Priya Dharshini", "priya@example.com", 98, UserStatus::Active, date(2026, 1, 20)),
        (3, "Rahul Raj", "rahul@example.com", 45, UserStatus::Banned, date(2026, 2, 1)),
        (4, "Sowmya G", "sowmya@example.com", 210, UserStatus::Active, date(2026, 1, 10)),
        (5, "Karthik S", "karthik@example.com", 75, UserStatus::Active, date(2026, 2, 5)),
    ];

    users
        .into_iter()
        .map(|(id, name, email, score, status, joined_date)| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            score,
            status,
            joined_date,
        })
        .collect()
}

fn seed_submissions() -> Vec<Submission> {
    let submissions = vec![
        (101, 1, "Anish Kumar", "The ocean is vast and mysterious.", date(2026, 2, 10), "10:30 AM"),
        (102, 2, "Priya Dharshini", "She like to play piano every day.", date(2026, 2, 10), "11:15 AM"),
        (103, 4, "Sowmya G", "Resilience is key to success in any field.", date(2026, 2, 9), "09:00 PM"),
        (104, 5, "Karthik S", "I am reading a book now.", date(2026, 2, 9), "04:45 PM"),
    ];

    submissions
        .into_iter()
        .map(|(id, user_id, user_name, sentence, date, time)| Submission {
            id,
            user_id,
            user_name: user_name.to_string(),
            sentence: sentence.to_string(),
            date,
            time: time.to_string(),
        })
        .collect()
}

fn seed_activity() -> ActivityWeek {
    ActivityWeek([12, 18, 15, 25, 20, 30, 22])
}
