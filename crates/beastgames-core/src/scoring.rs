// Scoring rule table: quick-score rules, elimination penalty, money conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dollars of prize money per awarded point.
pub const DOLLARS_PER_POINT: u64 = 5000;

/// Entry label applied by elimination.
pub const ELIMINATED_LABEL: &str = "Eliminated";

/// Point value applied by elimination.
pub const ELIMINATED_POINTS: i64 = -10;

/// Quick-score rules that can be applied to a contestant from the score menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringRule {
    Survived,
    IndividualWin,
    TeamWin,
    GaveUpMoney,
    RiskyDeal,
    CausedElimination,
    LastStanding,
    HighestCash,
    ViralMoment,
}

impl ScoringRule {
    /// Every rule in menu order.
    pub const ALL: [ScoringRule; 9] = [
        ScoringRule::Survived,
        ScoringRule::IndividualWin,
        ScoringRule::TeamWin,
        ScoringRule::GaveUpMoney,
        ScoringRule::RiskyDeal,
        ScoringRule::CausedElimination,
        ScoringRule::LastStanding,
        ScoringRule::HighestCash,
        ScoringRule::ViralMoment,
    ];

    /// Parse a rule from its stable key (e.g. "survived", "team_win").
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "survived" => Some(ScoringRule::Survived),
            "individual_win" => Some(ScoringRule::IndividualWin),
            "team_win" => Some(ScoringRule::TeamWin),
            "gave_up_money" => Some(ScoringRule::GaveUpMoney),
            "risky_deal" => Some(ScoringRule::RiskyDeal),
            "caused_elim" | "caused_elimination" => Some(ScoringRule::CausedElimination),
            "last_standing" => Some(ScoringRule::LastStanding),
            "highest_cash" => Some(ScoringRule::HighestCash),
            "viral_moment" => Some(ScoringRule::ViralMoment),
            _ => None,
        }
    }

    /// Stable key used for lookups and logging.
    pub fn key(&self) -> &'static str {
        match self {
            ScoringRule::Survived => "survived",
            ScoringRule::IndividualWin => "individual_win",
            ScoringRule::TeamWin => "team_win",
            ScoringRule::GaveUpMoney => "gave_up_money",
            ScoringRule::RiskyDeal => "risky_deal",
            ScoringRule::CausedElimination => "caused_elim",
            ScoringRule::LastStanding => "last_standing",
            ScoringRule::HighestCash => "highest_cash",
            ScoringRule::ViralMoment => "viral_moment",
        }
    }

    /// Label written into the ledger entry. The duplicate-per-episode guard
    /// compares against this label.
    pub fn label(&self) -> &'static str {
        match self {
            ScoringRule::Survived => "Survived",
            ScoringRule::IndividualWin => "Individual Win",
            ScoringRule::TeamWin => "Team Win",
            ScoringRule::GaveUpMoney => "Gave Up Money",
            ScoringRule::RiskyDeal => "Risky Deal",
            ScoringRule::CausedElimination => "Caused Elim",
            ScoringRule::LastStanding => "Last Standing",
            ScoringRule::HighestCash => "Highest Cash",
            ScoringRule::ViralMoment => "Viral Moment",
        }
    }

    /// Longer description shown in the quick-score menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            ScoringRule::Survived => "Survived Episode",
            ScoringRule::IndividualWin => "Won Individual Game",
            ScoringRule::TeamWin => "Won Team Game",
            ScoringRule::GaveUpMoney => "Gave Up Money",
            ScoringRule::RiskyDeal => "Risky Deal",
            ScoringRule::CausedElimination => "Caused Elimination",
            ScoringRule::LastStanding => "Last in Challenge",
            ScoringRule::HighestCash => "Highest Cash Prize",
            ScoringRule::ViralMoment => "Viral Moment",
        }
    }

    /// Fixed point value.
    pub fn points(&self) -> i64 {
        match self {
            ScoringRule::Survived => 5,
            ScoringRule::IndividualWin => 15,
            ScoringRule::TeamWin => 10,
            ScoringRule::GaveUpMoney => 15,
            ScoringRule::RiskyDeal => 10,
            ScoringRule::CausedElimination => 10,
            ScoringRule::LastStanding => 10,
            ScoringRule::HighestCash => 10,
            ScoringRule::ViralMoment => 5,
        }
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Prize money
// ---------------------------------------------------------------------------

/// Parse a prize-money amount typed by the user.
///
/// Accepts a non-negative whole number, optionally with a leading `$` and
/// `,` thousands separators. Returns `None` for empty, negative, or
/// non-numeric input so the caller can treat it as a no-op.
pub fn parse_money(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Points awarded for a prize amount: one point per full $5,000.
pub fn money_points(dollars: u64) -> i64 {
    i64::try_from(dollars / DOLLARS_PER_POINT).unwrap_or(i64::MAX)
}

/// Ledger label for a prize amount, e.g. `Won $12,000`.
pub fn money_label(dollars: u64) -> String {
    format!("Won ${}", group_thousands(dollars))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

/// A display-only line in the scoring reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLine {
    pub label: &'static str,
    pub points: i64,
}

/// A titled group of reference lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSection {
    pub title: &'static str,
    pub lines: Vec<ReferenceLine>,
}

/// The static scoring reference. Endgame bonuses appear here only; there is
/// no operation that applies them.
pub fn reference_table() -> Vec<ReferenceSection> {
    vec![
        ReferenceSection {
            title: "Core Performance",
            lines: vec![
                ReferenceLine { label: "Survives episode", points: 5 },
                ReferenceLine { label: "Individual win", points: 15 },
                ReferenceLine { label: "Team win", points: 10 },
                ReferenceLine { label: "Eliminated", points: ELIMINATED_POINTS },
            ],
        },
        ReferenceSection {
            title: "Money & Bonuses",
            lines: vec![
                ReferenceLine { label: "$5,000 won", points: 1 },
                ReferenceLine { label: "Gives up money", points: 15 },
                ReferenceLine { label: "Highest cash", points: 10 },
                ReferenceLine { label: "Risky deal", points: 10 },
            ],
        },
        ReferenceSection {
            title: "Endgame",
            lines: vec![
                ReferenceLine { label: "Winner", points: 50 },
                ReferenceLine { label: "Final 3", points: 25 },
                ReferenceLine { label: "Final 5", points: 15 },
            ],
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
