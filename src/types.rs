use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Term {
    #[default]
    Long,
    Medium,
    Short,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::Long, Term::Medium, Term::Short];

    pub fn label(self) -> &'static str {
        match self {
            Term::Long => "Long Term",
            Term::Medium => "Medium Term",
            Term::Short => "Short Term",
        }
    }

    pub fn key(self) -> String {
        crate::utils::term_key(self.label())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Term {
    type Err = String;

    // Accepts UI labels ("Medium Term"), storage keys ("medium_term") and
    // the bare window name ("medium").
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = crate::utils::term_key(s.trim());
        Term::ALL
            .into_iter()
            .find(|t| t.key() == key || t.key().trim_end_matches("_term") == key)
            .ok_or_else(|| {
                format!(
                    "invalid term '{}'. Expected one of: Long Term, Medium Term, Short Term",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub song_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub song_url: Option<String>,
    #[serde(default)]
    pub song_uri: Option<String>,
    #[serde(default)]
    pub song_img: Option<String>,
}

impl Track {
    pub fn song_name(&self) -> Result<&str> {
        required(&self.song_name, "song_name")
    }

    pub fn artist_name(&self) -> Result<&str> {
        required(&self.artist_name, "artist_name")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_url: Option<String>,
    #[serde(default)]
    pub artist_img: Option<String>,
    #[serde(default)]
    pub artist_followers: Option<u64>,
}

impl Artist {
    pub fn artist_name(&self) -> Result<&str> {
        required(&self.artist_name, "artist_name")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistReference {
    pub playlist_id: String,
}

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Track Name")]
    pub track_name: String,
    #[tabled(rename = "Artist Name")]
    pub artist_name: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub song: String,
    pub artist: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub followers: String,
    pub url: String,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| DashboardError::FieldMissing(field.to_string()))
}
