use chrono::NaiveDate;

use crate::models::{ActivityBar, ActivityWeek, LeaderboardEntry, Submission, User};

pub const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub fn submissions_on_date(submissions: &[Submission], date: NaiveDate) -> Vec<&Submission> {
    submissions.iter().filter(|s| s.date == date).collect()
}

pub fn average_score(users: &[User]) -> u32 {
    if users.is_empty() {
        return 0;
    }
    let total: u64 = users.iter().map(|u| u64::from(u.score)).sum();
    (total as f64 / users.len() as f64).round() as u32
}

/// Users ordered by descending score. Equal scores keep their original order.
pub fn leaderboard(users: &[User]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            rank: index + 1,
            user_id: user.id,
            name: user.name.clone(),
            score: user.score,
        })
        .collect()
}

pub fn top_performers(users: &[User], count: usize) -> Vec<LeaderboardEntry> {
    let mut entries = leaderboard(users);
    entries.truncate(count);
    entries
}

pub fn weekly_activity_total(activity: &ActivityWeek) -> u32 {
    activity.0.iter().sum()
}

pub fn progress_percent(user: &User, capacity: u32) -> u32 {
    if capacity == 0 {
        return if user.score > 0 { 100 } else { 0 };
    }
    let percent = (f64::from(user.score) / f64::from(capacity) * 100.0).round() as u32;
    percent.min(100)
}

pub fn activity_bars(activity: &ActivityWeek) -> Vec<ActivityBar> {
    let max = activity.0.iter().copied().max().unwrap_or(0);
    activity
        .0
        .iter()
        .zip(DAY_LABELS)
        .map(|(&count, label)| ActivityBar {
            label,
            count,
            height_percent: if max == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(max) * 100.0
            },
        })
        .collect()
}

pub fn search_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn search_submissions<'a>(submissions: &'a [Submission], query: &str) -> Vec<&'a Submission> {
    let needle = query.to_lowercase();
    submissions
        .iter()
        .filter(|s| {
            s.user_name.to_lowercase().contains(&needle)
                || s.sentence.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    fn user(id: u32, name: &str, score: u32) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            score,
            status: UserStatus::Active,
            joined_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    fn submission(id: u32, user_id: u32, sentence: &str, date: NaiveDate) -> Submission {
        Submission {
            id,
            user_id,
            user_name: format!("User {user_id}"),
            sentence: sentence.to_string(),
            date,
            time: "10:30 AM".to_string(),
        }
    }

    #[test]
    fn average_of_two_users() {
        let users = vec![user(1, "Anish", 100), user(2, "Priya", 200)];
        assert_eq!(average_score(&users), 150);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let users = vec![user(1, "A", 1), user(2, "B", 2)];
        assert_eq!(average_score(&users), 2);
        let users = vec![user(1, "A", 1), user(2, "B", 1), user(3, "C", 2)];
        assert_eq!(average_score(&users), 1);
    }

    #[test]
    fn average_of_no_users_is_zero() {
        assert_eq!(average_score(&[]), 0);
    }

    #[test]
    fn leaderboard_orders_by_score_descending() {
        let users = vec![user(1, "Anish", 100), user(2, "Priya", 200)];
        let board = leaderboard(&users);
        assert_eq!(board[0].user_id, 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].user_id, 1);
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn leaderboard_keeps_original_order_on_ties() {
        let users = vec![
            user(1, "A", 50),
            user(2, "B", 90),
            user(3, "C", 50),
            user(4, "D", 50),
        ];
        let ids: Vec<u32> = leaderboard(&users).iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn top_performers_truncates() {
        let users = vec![user(1, "A", 10), user(2, "B", 30), user(3, "C", 20), user(4, "D", 5)];
        let ids: Vec<u32> = top_performers(&users, 3).iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(top_performers(&users[..1], 3).len(), 1);
    }

    #[test]
    fn weekly_total_sums_all_days() {
        let week = ActivityWeek([12, 18, 15, 25, 20, 30, 22]);
        assert_eq!(weekly_activity_total(&week), 142);
    }

    #[test]
    fn progress_is_capped_at_full() {
        assert_eq!(progress_percent(&user(1, "A", 125), 250), 50);
        assert_eq!(progress_percent(&user(1, "A", 210), 250), 84);
        assert_eq!(progress_percent(&user(1, "A", 300), 250), 100);
        assert_eq!(progress_percent(&user(1, "A", 0), 250), 0);
        assert_eq!(progress_percent(&user(1, "A", 1), 0), 100);
    }

    #[test]
    fn bars_scale_against_busiest_day() {
        let bars = activity_bars(&ActivityWeek([15, 30, 0, 0, 0, 0, 0]));
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[0].label, "S");
        assert!((bars[0].height_percent - 50.0).abs() < 0.001);
        assert!((bars[1].height_percent - 100.0).abs() < 0.001);

        let empty = activity_bars(&ActivityWeek([0; 7]));
        assert!(empty.iter().all(|b| b.height_percent == 0.0));
    }

    #[test]
    fn filters_submissions_by_exact_date() {
        let feb9 = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        let feb10 = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let submissions = vec![
            submission(101, 1, "one", feb10),
            submission(102, 2, "two", feb9),
            submission(103, 3, "three", feb10),
        ];
        let ids: Vec<u32> = submissions_on_date(&submissions, feb10)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![101, 103]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let users = vec![user(1, "Anish", 10), user(2, "Priya", 20)];
        assert_eq!(search_users(&users, "PRI").len(), 1);
        assert_eq!(search_users(&users, "example.com").len(), 2);
        assert_eq!(search_users(&users, "").len(), 2);

        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let submissions = vec![
            submission(101, 1, "The ocean is vast.", date),
            submission(102, 2, "She likes piano.", date),
        ];
        let hits = search_submissions(&submissions, "OCEAN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 101);
        assert_eq!(search_submissions(&submissions, "user 2").len(), 1);
    }
}
