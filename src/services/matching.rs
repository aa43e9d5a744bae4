use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::services::preferences::parse_preferences;

const NO_MATCH: &[&str] = &["No matching industry found"];

/// Waste types the suggestion table knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteKind {
    Plastic,
    Metal,
    Paper,
    Glass,
    Unknown,
}

impl WasteKind {
    /// Case-insensitive; anything outside the table is `Unknown`.
    pub fn classify(waste_type: &str) -> Self {
        match waste_type.trim().to_lowercase().as_str() {
            "plastic" => WasteKind::Plastic,
            "metal" => WasteKind::Metal,
            "paper" => WasteKind::Paper,
            "glass" => WasteKind::Glass,
            _ => WasteKind::Unknown,
        }
    }

    pub fn industries(&self) -> &'static [&'static str] {
        match self {
            WasteKind::Plastic => &["Recycling Industry A", "Recycling Industry B"],
            WasteKind::Metal => &["Metal Works Inc.", "Metal Recycler Ltd."],
            WasteKind::Paper => &["Paper Recycling Co."],
            WasteKind::Glass => &["Glass Recycling Ltd."],
            WasteKind::Unknown => NO_MATCH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub waste_type: String,
    pub industries: Vec<&'static str>,
}

/// One suggestion per preference, in the order given
pub fn suggest_industries<S: AsRef<str>>(preferences: &[S]) -> Vec<Suggestion> {
    preferences
        .iter()
        .map(|preference| {
            let preference = preference.as_ref();
            Suggestion {
                waste_type: capitalize(preference.trim()),
                industries: WasteKind::classify(preference).industries().to_vec(),
            }
        })
        .collect()
}

/// Suggestions driven by the buyer's stored preference list
pub async fn suggestions_for_buyer(
    pool: &Pool<Sqlite>,
    buyer_id: i64,
) -> Result<Vec<Suggestion>, AppError> {
    let buyer = UserRepository::get_by_id(pool, buyer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer not found.".to_string()))?;

    Ok(suggest_industries(&parse_preferences(buyer.waste_types.as_deref())))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
