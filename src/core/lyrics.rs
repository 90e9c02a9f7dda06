//! Verse splitting and pagination for stored lyrics text
//!
//! Verses are delimited by a blank line (two consecutive newlines). The
//! split performs no trimming or normalization of verse content.

use serde::Serialize;

/// One page of verses plus the total verse count of the song.
#[derive(Debug, Clone, Serialize)]
pub struct VersePage {
    pub verses: Vec<String>,
    pub total: usize,
}

pub fn split_verses(lyrics: &str) -> Vec<String> {
    // Splitting an empty string yields a single empty verse; that outcome is
    // kept so a song without lyrics still reports total = 1.
    lyrics.split("\n\n").map(str::to_string).collect()
}

/// Returns the `[start, end)` slice of verses for the given page, clamped to
/// the verse count. A start past the end yields an empty page with the total
/// intact, not an error. `page` and `limit` are assumed already coerced to
/// >= 1 by the caller.
pub fn paginate(lyrics: &str, page: usize, limit: usize) -> VersePage {
    let verses = split_verses(lyrics);
    let total = verses.len();

    let start = (page - 1) * limit;
    if start > total {
        return VersePage { verses: Vec::new(), total };
    }

    let end = (start + limit).min(total);
    VersePage {
        verses: verses[start..end].to_vec(),
        total,
    }
}
