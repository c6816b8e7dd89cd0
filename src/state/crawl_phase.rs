/// Crawl phase definitions for tracking a session's progress
///
/// A session walks `Start → Fetching → GuardChecking → Extracting →
/// ResolvingNext` once per page and ends in `Done`, `Aborted` or `Cancelled`.
use std::fmt;

/// Represents where a crawl session is in its page loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// Session created, search URL not yet requested
    Start,

    /// A results page is being requested
    Fetching,

    /// The fetched page is being checked for a challenge marker
    GuardChecking,

    /// Listings are being pulled out of the page
    Extracting,

    /// The page count indicator is being read to find the next page
    ResolvingNext,

    // ===== Terminal Phases =====
    /// Every results page has been processed
    Done,

    /// A fetch, challenge or pagination error ended the crawl
    Aborted,

    /// The caller asked the session to stop
    Cancelled,
}

impl CrawlPhase {
    /// Returns true if the session can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted | Self::Cancelled)
    }

    /// Returns true if moving from this phase to `next` is a legal step
    ///
    /// Any active phase may end in `Aborted` or `Cancelled`; terminal phases
    /// never move again.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        if self.is_terminal() {
            return false;
        }

        matches!(
            (*self, next),
            (Start, Fetching)
                | (Fetching, GuardChecking)
                | (GuardChecking, Extracting)
                | (Extracting, ResolvingNext)
                | (ResolvingNext, Fetching)
                | (ResolvingNext, Done)
                | (_, Aborted)
                | (_, Cancelled)
        )
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fetching => "fetching",
            Self::GuardChecking => "guard_checking",
            Self::Extracting => "extracting",
            Self::ResolvingNext => "resolving_next",
            Self::Done => "done",
            Self::Aborted => "aborted",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
