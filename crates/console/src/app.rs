//! Read-eval-print loop over the scheduling engine.

use std::io::Write;
use std::sync::Arc;

use calendar_core::errors::CalendarResult;
use calendar_scheduler::Scheduler;
use eyre::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{parse_command, Command};

pub struct App {
    scheduler: Arc<Scheduler>,
    year: i32,
}

impl App {
    /// `year` is applied to every `DD/MM` date typed at the console.
    pub fn new(scheduler: Arc<Scheduler>, year: i32) -> Self {
        Self { scheduler, year }
    }

    /// Runs commands from `input` until it ends or a quit command arrives.
    ///
    /// Replies go to `out`; rejected requests are reported on `err` and the
    /// loop carries on. Store failures end the loop with an error.
    pub async fn run<R, W, E>(&self, input: R, out: &mut W, err: &mut E) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        E: Write,
    {
        writeln!(out, "Welcome to the Calendar console!")?;
        writeln!(out)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(command) = parse_command(&line, self.year) else {
                debug!("Ignoring unrecognised input: {:?}", line);
                continue;
            };

            if command == Command::Quit {
                break;
            }

            match self.execute(command).await {
                Ok(reply) => writeln!(out, "{reply}")?,
                Err(error) if error.is_fatal() => return Err(error.into()),
                Err(error) => writeln!(err, "{error}")?,
            }
        }

        out.flush()?;
        Ok(())
    }

    async fn execute(&self, command: Command) -> CalendarResult<String> {
        let reply = match command {
            Command::Create(start) => {
                self.scheduler.create(start, None).await?;
                "Successfully created".to_string()
            }
            Command::Delete(start) => {
                if self.scheduler.delete(start).await? {
                    "Successfully deleted".to_string()
                } else {
                    "No appointment to delete.".to_string()
                }
            }
            Command::Find(date) => match self.scheduler.first_available(date).await? {
                Some(slot) => format!(
                    "The first available appointment starts on {}.",
                    slot.start.format("%H:%M")
                ),
                None => "No appointments available on the day.".to_string(),
            },
            Command::Keep(start) => {
                if self.scheduler.keep(start, None).await? {
                    "Successfully set keep slot".to_string()
                } else {
                    "Slot is already kept.".to_string()
                }
            }
            Command::Quit => String::new(),
        };

        Ok(reply)
    }
}
