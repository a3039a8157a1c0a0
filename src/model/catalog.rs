use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Branches offered at the campus. Batch lists and mentor assignments hang
/// off the batch codes below.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    ToSchema,
)]
pub enum Branch {
    #[serde(rename = "BTECH CS")]
    #[strum(serialize = "BTECH CS")]
    BtechCs,
    #[serde(rename = "BTECH CE")]
    #[strum(serialize = "BTECH CE")]
    BtechCe,
    #[serde(rename = "BTECH AI-ML")]
    #[strum(serialize = "BTECH AI-ML")]
    BtechAiMl,
    #[serde(rename = "BTECH IT")]
    #[strum(serialize = "BTECH IT")]
    BtechIt,
    #[serde(rename = "MBA TECH CE")]
    #[strum(serialize = "MBA TECH CE")]
    MbaTechCe,
    #[serde(rename = "B-PHARM")]
    #[strum(serialize = "B-PHARM")]
    BPharm,
    #[serde(rename = "TEXTILE")]
    #[strum(serialize = "TEXTILE")]
    Textile,
}

impl Branch {
    /// Batch codes belonging to this branch.
    pub fn batches(self) -> &'static [&'static str] {
        match self {
            Branch::BtechCs => &["A1", "A2", "B1", "B2"],
            Branch::BtechCe => &["C1", "C2", "D1", "D2"],
            Branch::BtechAiMl => &["F1", "F2"],
            Branch::BtechIt => &["E1", "E2"],
            Branch::MbaTechCe => &["AB1", "AB2"],
            Branch::BPharm => &["P1", "P2", "P3"],
            Branch::Textile => &["T1", "T2", "T3", "T4"],
        }
    }

    pub fn has_batch(self, batch: &str) -> bool {
        self.batches().contains(&batch)
    }
}

/// Full mentor roster.
pub const MENTORS: &[&str] = &[
    "Dileep Kumar",
    "Bagal",
    "Sugam Shivare",
    "Rajshekhar Pothala",
    "DJ",
    "ASHOK PANIGRAHI",
    "Sachin Bhandari",
    "Rehan",
    "Suraj Patil",
];

static MENTOR_BY_BATCH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("A1", "Sugam Shivare"),
        ("A2", "Dileep Kumar"),
        ("B1", "Rajshekhar Pothala"),
        ("B2", "DJ"),
        ("C1", "ASHOK PANIGRAHI"),
        ("C2", "Sachin Bhandari"),
        ("D1", "Suraj Patil"),
        ("D2", "Rehan"),
        ("F1", "Dileep Kumar"),
        ("F2", "DJ"),
        ("E1", "Bagal"),
        ("E2", "Dileep Kumar"),
        ("AB1", "Sachin Bhandari"),
        ("AB2", "Rehan"),
        ("P1", "Dileep Kumar"),
        ("P2", "Dileep Kumar"),
        ("P3", "Dileep Kumar"),
        ("T1", "DJ"),
        ("T2", "DJ"),
        ("T3", "DJ"),
        ("T4", "DJ"),
    ])
});

/// Mentor assigned to a batch code, if the code is known.
pub fn mentor_for(batch: &str) -> Option<&'static str> {
    MENTOR_BY_BATCH.get(batch).copied()
}
