//! Poster addressing.
//!
//! Each milestone's poster lives at `{poster_dir}/{DD}.{ext}` where `DD` is the
//! zero-padded day of month. Nothing here checks that the file exists; a
//! missing poster is the presentation layer's fallback to handle.

use serde::{Deserialize, Serialize};

use super::Milestone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterAssets {
    #[serde(default = "default_poster_dir")]
    pub poster_dir: String,
    #[serde(default = "default_poster_ext")]
    pub poster_ext: String,
}

fn default_poster_dir() -> String {
    "/posters".into()
}
fn default_poster_ext() -> String {
    "jpg".into()
}

impl Default for PosterAssets {
    fn default() -> Self {
        Self {
            poster_dir: default_poster_dir(),
            poster_ext: default_poster_ext(),
        }
    }
}

impl PosterAssets {
    pub fn poster_path(&self, milestone: &Milestone) -> String {
        format!(
            "{}/{:02}.{}",
            self.poster_dir.trim_end_matches('/'),
            milestone.date.day(),
            self.poster_ext
        )
    }

    /// Suggested file name when the poster is saved.
    pub fn download_name(&self, milestone: &Milestone) -> String {
        format!("{}-Poster.{}", milestone.title, self.poster_ext)
    }
}
