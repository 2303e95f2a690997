use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::confirm::Action;
use crate::models::{DailyWord, UserStatus, WordEntry};
use crate::report;
use crate::stats;
use crate::store::{AdminStore, PublishOutcome};

#[derive(Parser)]
#[command(no_binary_name = true, name = "admin")]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Show today's figures
    Dashboard {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List users, optionally filtered by name or email
    Users { search: Vec<String> },
    /// List submissions, optionally filtered by date or text
    Submissions {
        #[arg(long)]
        date: Option<NaiveDate>,
        search: Vec<String>,
    },
    /// Rank users by score
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Flip a user between active and banned
    Toggle { user_id: u32 },
    /// Restrict a user's access
    Ban { user_id: u32 },
    /// Restore a user's access
    Unban { user_id: u32 },
    /// Delete a user's most recent submission
    Delete { user_id: u32 },
    /// Reset every score for a new cycle
    Reset,
    /// Publish the word of the day
    Publish {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Leave the console
    #[command(visible_alias = "exit")]
    Quit,
}

/// Line-oriented admin console. Commands apply strictly in input order.
pub struct Session<'a, R, W> {
    store: &'a mut AdminStore,
    input: R,
    output: W,
    today: NaiveDate,
    capacity: u32,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a mut AdminStore, input: R, output: W, today: NaiveDate, capacity: u32) -> Self {
        Self {
            store,
            input,
            output,
            today,
            capacity,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let command = match Line::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(self.output, "{}", err.render())?;
                    continue;
                }
            };

            if matches!(command, ShellCommand::Quit) {
                return Ok(());
            }
            self.dispatch(command)?;
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> io::Result<()> {
        match command {
            ShellCommand::Dashboard { date } => {
                let summary = self.store.dashboard(date.unwrap_or(self.today));
                writeln!(self.output, "{}", serde_json::to_string_pretty(&summary)?)?;
            }
            ShellCommand::Users { search } => {
                let query = search.join(" ");
                let users = stats::search_users(self.store.users(), &query);
                write!(self.output, "{}", report::render_users(&users))?;
            }
            ShellCommand::Submissions { date, search } => {
                let query = search.join(" ");
                let submissions: Vec<_> = stats::search_submissions(self.store.submissions(), &query)
                    .into_iter()
                    .filter(|s| date.map_or(true, |d| s.date == d))
                    .collect();
                write!(self.output, "{}", report::render_submissions(&submissions))?;
            }
            ShellCommand::Leaderboard { limit } => {
                let mut board = self.store.leaderboard();
                if board.is_empty() {
                    writeln!(self.output, "No users registered.")?;
                    return Ok(());
                }
                board.truncate(limit);
                let text = report::render_leaderboard(self.store, &board, self.capacity);
                write!(self.output, "{}", text)?;
            }
            ShellCommand::Toggle { user_id } => {
                self.confirm_and_apply(Action::ToggleUserStatus { user_id })?
            }
            ShellCommand::Ban { user_id } => self.confirm_and_apply(Action::SetUserStatus {
                user_id,
                status: UserStatus::Banned,
            })?,
            ShellCommand::Unban { user_id } => self.confirm_and_apply(Action::SetUserStatus {
                user_id,
                status: UserStatus::Active,
            })?,
            ShellCommand::Delete { user_id } => {
                self.confirm_and_apply(Action::DeleteMostRecentSubmission { user_id })?
            }
            ShellCommand::Reset => self.confirm_and_apply(Action::ResetAllScores)?,
            ShellCommand::Publish { date } => self.publish(date.unwrap_or(self.today))?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn confirm_and_apply(&mut self, action: Action) -> io::Result<()> {
        let pending = self.store.request_confirmation(action);
        writeln!(self.output, "{}", pending.title())?;
        writeln!(self.output, "{}", pending.message())?;
        write!(self.output, "Confirm? [y/N] ")?;
        self.output.flush()?;

        let accepted = self
            .read_line()?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);
        debug!(id = %pending.id(), action = ?pending.action(), accepted, "confirmation answered");

        let resolution = self.store.resolve(pending, accepted);
        writeln!(self.output, "{}", resolution.message())
    }

    fn publish(&mut self, date: NaiveDate) -> io::Result<()> {
        writeln!(self.output, "Publishing word for {date}")?;
        let english = self.prompt_entry("English")?;
        let tamil = self.prompt_entry("Tamil")?;

        let word = DailyWord { date, english, tamil };
        match self.store.publish_daily_word(word) {
            Ok(PublishOutcome::Created) => {
                writeln!(self.output, "Daily word published successfully!")
            }
            Ok(PublishOutcome::Replaced) => {
                writeln!(self.output, "Daily word for {date} updated.")
            }
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn prompt_entry(&mut self, language: &str) -> io::Result<WordEntry> {
        Ok(WordEntry {
            word: self.prompt(&format!("{language} word"))?,
            meaning: self.prompt(&format!("{language} meaning"))?,
            example: self.prompt(&format!("{language} example"))?,
        })
    }

    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default().trim().to_string())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
