use std::fmt;

use tracing::debug;

use super::{Edit, Tracker};
use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Empty,
    Loaded,
    Modified,
    Submitting,
    ResultReady,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Empty => "empty",
            Phase::Loaded => "loaded",
            Phase::Modified => "modified",
            Phase::Submitting => "submitting",
            Phase::ResultReady => "result-ready",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The service reported the page count of a newly chosen file.
    Load(u32),
    Clear,
    Edit(Edit),
    Submit,
    Succeeded,
    Failed(String),
}

/// Submission lifecycle around a tracker.
///
/// `Submitting` doubles as the in-flight flag: while a request is
/// outstanding, edits, reloads and further submits are refused so the
/// payload that was sent stays the one the result belongs to.
#[derive(Debug, Default)]
pub struct Flow<T> {
    tracker: T,
    phase: Phase,
    in_flight: Option<Vec<u32>>,
    last_error: Option<String>,
}

impl<T: Tracker> Flow<T> {
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            phase: Phase::Empty,
            in_flight: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Payload of the outstanding submission, if any.
    pub fn in_flight(&self) -> Option<&[u32]> {
        self.in_flight.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dispatch(&mut self, event: Event) -> Result<Phase> {
        let from = self.phase();
        let to = self.transition(from, event)?;
        if from != to {
            debug!(%from, %to, "flow transition");
        }
        self.phase = to;
        Ok(to)
    }

    /// Run a fallible tracker mutation under the same rules as
    /// [`Event::Edit`]. Used for bulk edits that validate their input first.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        match self.phase {
            Phase::Empty => return Err(Error::NoDocument),
            Phase::Submitting => return Err(Error::SubmissionInFlight),
            _ => {}
        }
        let value = f(&mut self.tracker)?;
        self.phase = self.settled();
        Ok(value)
    }

    fn transition(&mut self, from: Phase, event: Event) -> Result<Phase> {
        match event {
            Event::Load(total_pages) => {
                if from == Phase::Submitting {
                    return Err(Error::SubmissionInFlight);
                }
                self.tracker.initialize(total_pages);
                self.last_error = None;
                Ok(Phase::Loaded)
            }
            Event::Clear => {
                if from == Phase::Submitting {
                    return Err(Error::SubmissionInFlight);
                }
                self.tracker.clear();
                self.last_error = None;
                Ok(Phase::Empty)
            }
            Event::Edit(edit) => match from {
                Phase::Empty => Err(Error::NoDocument),
                Phase::Submitting => Err(Error::SubmissionInFlight),
                _ => {
                    if !self.tracker.apply(&edit) {
                        debug!(?edit, "edit does not apply to this flow");
                    }
                    Ok(self.settled())
                }
            },
            Event::Submit => match from {
                Phase::Empty => Err(Error::NoDocument),
                Phase::Submitting => Err(Error::SubmissionInFlight),
                Phase::ResultReady => Err(Error::AlreadySubmitted),
                Phase::Loaded | Phase::Modified | Phase::Failed => {
                    let payload = self.tracker.build_submission()?;
                    self.in_flight = Some(payload);
                    self.last_error = None;
                    Ok(Phase::Submitting)
                }
            },
            Event::Succeeded => {
                self.expect_submitting(from)?;
                self.in_flight = None;
                Ok(Phase::ResultReady)
            }
            Event::Failed(message) => {
                self.expect_submitting(from)?;
                self.in_flight = None;
                self.last_error = Some(message);
                Ok(Phase::Failed)
            }
        }
    }

    fn expect_submitting(&self, from: Phase) -> Result<()> {
        if from == Phase::Submitting {
            Ok(())
        } else {
            Err(Error::invalid(format!("no submission in progress ({})", from)))
        }
    }

    fn settled(&self) -> Phase {
        if self.tracker.is_submittable() {
            Phase::Modified
        } else {
            Phase::Loaded
        }
    }
}
