use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{AdminError, AdminResult};
use crate::models::{Submission, User, UserStatus};

#[derive(serde::Deserialize)]
struct UserRow {
    id: u32,
    name: String,
    email: String,
    score: u32,
    status: UserStatus,
    joined_date: NaiveDate,
}

#[derive(serde::Deserialize)]
struct SubmissionRow {
    id: u32,
    user_id: u32,
    user_name: String,
    sentence: String,
    date: NaiveDate,
    time: String,
}

pub fn read_users<R: Read>(source: R) -> AdminResult<Vec<User>> {
    let mut reader = csv::Reader::from_reader(source);
    let mut seen = HashSet::new();
    let mut users = Vec::new();

    for result in reader.deserialize::<UserRow>() {
        let row = result?;
        if !seen.insert(row.id) {
            return Err(AdminError::Validation(format!("duplicate user id {}", row.id)));
        }
        users.push(User {
            id: row.id,
            name: row.name,
            email: row.email,
            score: row.score,
            status: row.status,
            joined_date: row.joined_date,
        });
    }

    Ok(users)
}

/// Reads submissions in file order. Rows pointing at users outside `users`
/// are kept, since a submission may outlive its author.
pub fn read_submissions<R: Read>(source: R, users: &[User]) -> AdminResult<Vec<Submission>> {
    let known: HashSet<u32> = users.iter().map(|u| u.id).collect();
    let mut reader = csv::Reader::from_reader(source);
    let mut submissions = Vec::new();

    for result in reader.deserialize::<SubmissionRow>() {
        let row = result?;
        if !known.contains(&row.user_id) {
            warn!(submission_id = row.id, user_id = row.user_id, "submission references unknown user");
        }
        submissions.push(Submission {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            sentence: row.sentence,
            date: row.date,
            time: row.time,
        });
    }

    Ok(submissions)
}

pub fn load_users(path: &Path) -> AdminResult<Vec<User>> {
    let users = read_users(std::fs::File::open(path)?)?;
    info!(count = users.len(), path = %path.display(), "users imported");
    Ok(users)
}

pub fn load_submissions(path: &Path, users: &[User]) -> AdminResult<Vec<Submission>> {
    let submissions = read_submissions(std::fs::File::open(path)?, users)?;
    info!(count = submissions.len(), path = %path.display(), "submissions imported");
    Ok(submissions)
}
