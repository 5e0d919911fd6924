//! Heartbeat telemetry grammar.
//!
//! Reroll tools post a heartbeat through a webhook every few minutes. The message
//! is free text, but the parts the policer needs follow a fixed shape:
//!
//! ```text
//! <identity>                 first non-empty line: member ID, prefix or username
//! ...
//! Time: <minutes>m Packs: <count>
//! ...
//! Opening: <pack>, <pack>, ...
//! ```
//!
//! Each part is parsed independently into an `Option`, so a message that only
//! partly matches still yields whatever did match, and "unparseable" is an explicit
//! `None` rather than a swallowed error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

static SAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)time:\s*(?P<minutes>\d+)\s*m.*?packs:\s*(?P<packs>\d+)")
        .expect("sample pattern is valid")
});

static OPENING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*opening:\s*(?P<packs>.*)$").expect("opening pattern is valid")
});

/// Progress snapshot reported by one heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatSample {
    /// Minutes since the reroll session started.
    pub elapsed_minutes: u32,
    /// Packs opened since the session started.
    pub pack_count: u32,
}

impl HeartbeatSample {
    /// Packs per minute for this session, zero before the first minute.
    pub fn packs_per_minute(&self) -> f64 {
        if self.elapsed_minutes == 0 {
            0.0
        } else {
            f64::from(self.pack_count) / f64::from(self.elapsed_minutes)
        }
    }
}

/// The parsed parts of a heartbeat message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeartbeatReport {
    /// First non-empty line, used to attribute the heartbeat to a member.
    pub identity: Option<String>,
    /// Elapsed time and pack count, when the `Time: ... Packs: ...` part parsed.
    pub sample: Option<HeartbeatSample>,
    /// Pack names listed after `Opening:`, when present.
    pub opening: Option<Vec<String>>,
}

impl HeartbeatReport {
    pub fn parse(content: &str) -> Self {
        let identity = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);

        let sample = SAMPLE_RE.captures(content).and_then(|caps| {
            Some(HeartbeatSample {
                elapsed_minutes: caps["minutes"].parse().ok()?,
                pack_count: caps["packs"].parse().ok()?,
            })
        });

        let opening = OPENING_RE.captures(content).map(|caps| {
            caps["packs"]
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        });

        Self {
            identity,
            sample,
            opening,
        }
    }
}

/// Why a heartbeat was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Message mentions a forbidden reroll technique.
    ForbiddenTechnique(String),
    /// Time advanced past the stall threshold without new packs.
    Stalling {
        previous: HeartbeatSample,
        current: HeartbeatSample,
    },
    /// Opening a pack that is not on the whitelist.
    ForbiddenPack(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ForbiddenTechnique(technique) => {
                write!(f, "forbidden technique `{}`", technique)
            }
            Violation::Stalling { previous, current } => write!(
                f,
                "stalling: {} packs at {}m and still {} packs at {}m",
                previous.pack_count,
                previous.elapsed_minutes,
                current.pack_count,
                current.elapsed_minutes
            ),
            Violation::ForbiddenPack(pack) => write!(f, "forbidden pack `{}`", pack),
        }
    }
}

/// Outcome of policing one heartbeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing wrong. Carries the sample to remember, if one parsed.
    Clean(Option<HeartbeatSample>),
    Violation(Violation),
}
