//! SQLite database operations for the song library
//!
//! This module owns the songs table: schema creation, the transactional
//! wrapper every statement runs under, and the filtered/paginated list
//! query. Handlers receive a `Database` handle explicitly; there is no
//! process-global connection.

use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DatabaseError, Result, SongshelfError};

/// A stored song row, serialized with the service's wire field names.
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    pub id: i64,
    pub group: String,
    #[serde(rename = "song")]
    pub title: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    #[serde(rename = "text")]
    pub lyrics: String,
    pub link: String,
}

/// Field set for inserts and full-replace updates; `id` is assigned by the
/// database and never supplied by callers.
#[derive(Debug, Clone, Default)]
pub struct NewSong {
    pub group: String,
    pub title: String,
    pub release_date: String,
    pub lyrics: String,
    pub link: String,
}

/// Optional substring filters for the list operation, matched
/// case-insensitively and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub group: Option<String>,
    pub title: Option<String>,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("Opening database at: {}", db_path.display());

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| SongshelfError::Database(DatabaseError::Connection(e)))?;

        // Enable WAL mode for better concurrent access
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| SongshelfError::Database(DatabaseError::Connection(e)))?;

        Self::migrate(&conn)?;

        Ok(Database { conn })
    }

    /// Idempotent schema setup: one songs table plus the indexes backing the
    /// list filters.
    fn migrate(conn: &Connection) -> Result<()> {
        debug!("Running database migration");

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS songs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                group_name TEXT NOT NULL,
                song_name TEXT NOT NULL,
                release_date TEXT,
                lyrics TEXT,
                link TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_songs_group_name ON songs(group_name);
            CREATE INDEX IF NOT EXISTS idx_songs_song_name ON songs(song_name);
            "#,
        )
        .map_err(|e| SongshelfError::Database(DatabaseError::Migration(e)))?;

        Ok(())
    }

    /// Runs `f` inside a single transaction. An `Err` from `f` drops the
    /// transaction handle, which rolls back; a panic unwinds through the same
    /// drop guard before propagating. Success commits. No nesting, no
    /// retries, default isolation.
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| SongshelfError::Database(DatabaseError::Transaction(e)))?;

        let value = f(&tx)?;

        tx.commit()
            .map_err(|e| SongshelfError::Database(DatabaseError::Transaction(e)))?;

        Ok(value)
    }

    /// Filtered, paginated SELECT over the songs table, ordered by id.
    /// `page` and `limit` are assumed already coerced to >= 1 by the caller.
    pub fn list_songs(&mut self, filter: &SongFilter, page: i64, limit: i64) -> Result<Vec<Song>> {
        let offset = (page - 1) * limit;

        let mut sql = String::from(
            "SELECT id, group_name, song_name, release_date, lyrics, link FROM songs WHERE 1=1",
        );

        let group_pattern = filter
            .group
            .as_ref()
            .map(|g| format!("%{}%", g.to_lowercase()));
        let title_pattern = filter
            .title
            .as_ref()
            .map(|t| format!("%{}%", t.to_lowercase()));

        let mut args: Vec<&dyn ToSql> = Vec::new();
        if let Some(pattern) = &group_pattern {
            sql.push_str(" AND LOWER(group_name) LIKE ?");
            args.push(pattern);
        }
        if let Some(pattern) = &title_pattern {
            sql.push_str(" AND LOWER(song_name) LIKE ?");
            args.push(pattern);
        }
        sql.push_str(" ORDER BY id LIMIT ? OFFSET ?");
        args.push(&limit);
        args.push(&offset);

        self.with_transaction(|tx| {
            let mut stmt = tx.prepare(&sql)?;
            let songs = stmt
                .query_map(&args[..], |row| {
                    Ok(Song {
                        id: row.get(0)?,
                        group: row.get(1)?,
                        title: row.get(2)?,
                        release_date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        lyrics: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        link: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    })
                })?
                .collect::<std::result::Result<Vec<Song>, _>>()?;

            Ok(songs)
        })
    }

    /// Fetch the stored lyrics text for a song. Unknown ids are a typed
    /// not-found, detected structurally from the empty result.
    pub fn get_lyrics(&mut self, id: i64) -> Result<String> {
        self.with_transaction(|tx| {
            let lyrics = tx
                .query_row(
                    "SELECT lyrics FROM songs WHERE id = ?1",
                    params![id],
                    |row| row.get::<_, Option<String>>(0),
                )
                .optional()?;

            match lyrics {
                Some(text) => Ok(text.unwrap_or_default()),
                None => Err(SongshelfError::SongNotFound { id }),
            }
        })
    }

    pub fn insert_song(&mut self, song: &NewSong) -> Result<i64> {
        self.with_transaction(|tx| {
            tx.execute(
                r#"
                INSERT INTO songs (group_name, song_name, release_date, lyrics, link)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    song.group,
                    song.title,
                    song.release_date,
                    song.lyrics,
                    song.link,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Full replace of the mutable fields. Returns the number of matched
    /// rows; the handler decides what zero means.
    pub fn update_song(&mut self, id: i64, song: &NewSong) -> Result<usize> {
        self.with_transaction(|tx| {
            let affected = tx.execute(
                r#"
                UPDATE songs
                SET group_name = ?1, song_name = ?2, release_date = ?3, lyrics = ?4, link = ?5
                WHERE id = ?6
                "#,
                params![
                    song.group,
                    song.title,
                    song.release_date,
                    song.lyrics,
                    song.link,
                    id,
                ],
            )?;
            Ok(affected)
        })
    }

    pub fn delete_song(&mut self, id: i64) -> Result<()> {
        self.with_transaction(|tx| {
            let affected = tx.execute("DELETE FROM songs WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(SongshelfError::SongNotFound { id });
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let conn = Connection::open_in_memory().unwrap();
        Database::migrate(&conn).unwrap();
        Database { conn }
    }

    fn sample_song(group: &str, title: &str) -> NewSong {
        NewSong {
            group: group.to_string(),
            title: title.to_string(),
            release_date: "16.07.2006".to_string(),
            lyrics: "Verse one\n\nVerse two".to_string(),
            link: "https://example.com/watch".to_string(),
        }
    }

    fn song_count(db: &mut Database) -> i64 {
        db.conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_insert_and_list() {
        let mut db = test_db();
        let id = db.insert_song(&sample_song("Muse", "Supermassive Black Hole")).unwrap();
        assert!(id > 0);

        let songs = db.list_songs(&SongFilter::default(), 1, 10).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, id);
        assert_eq!(songs[0].group, "Muse");
        assert_eq!(songs[0].title, "Supermassive Black Hole");
    }

    #[test]
    fn test_list_filters_are_case_insensitive_and_combined() {
        let mut db = test_db();
        db.insert_song(&sample_song("Muse", "Supermassive Black Hole")).unwrap();
        db.insert_song(&sample_song("ABBA", "Black")).unwrap();

        let filter = SongFilter {
            group: Some("muse".to_string()),
            title: Some("black".to_string()),
        };
        let songs = db.list_songs(&filter, 1, 10).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].group, "Muse");

        let filter = SongFilter {
            group: None,
            title: Some("BLACK".to_string()),
        };
        let songs = db.list_songs(&filter, 1, 10).unwrap();
        assert_eq!(songs.len(), 2);
    }

    #[test]
    fn test_list_pagination_is_ordered_by_id() {
        let mut db = test_db();
        let first = db.insert_song(&sample_song("A", "one")).unwrap();
        let second = db.insert_song(&sample_song("B", "two")).unwrap();
        let third = db.insert_song(&sample_song("C", "three")).unwrap();

        let page_one = db.list_songs(&SongFilter::default(), 1, 2).unwrap();
        assert_eq!(page_one.iter().map(|s| s.id).collect::<Vec<_>>(), vec![first, second]);

        let page_two = db.list_songs(&SongFilter::default(), 2, 2).unwrap();
        assert_eq!(page_two.iter().map(|s| s.id).collect::<Vec<_>>(), vec![third]);

        // Past the end: empty list, not an error
        let page_three = db.list_songs(&SongFilter::default(), 3, 2).unwrap();
        assert!(page_three.is_empty());
    }

    #[test]
    fn test_get_lyrics() {
        let mut db = test_db();
        let id = db.insert_song(&sample_song("Muse", "Starlight")).unwrap();

        assert_eq!(db.get_lyrics(id).unwrap(), "Verse one\n\nVerse two");
        assert!(matches!(
            db.get_lyrics(id + 1),
            Err(SongshelfError::SongNotFound { .. })
        ));
    }

    #[test]
    fn test_update_read_back_and_idempotence() {
        let mut db = test_db();
        let id = db.insert_song(&sample_song("Muse", "Starlight")).unwrap();

        let replacement = NewSong {
            group: "New Group".to_string(),
            title: "New Title".to_string(),
            release_date: "01.01.2000".to_string(),
            lyrics: "New lyrics".to_string(),
            link: "https://example.com/new".to_string(),
        };
        assert_eq!(db.update_song(id, &replacement).unwrap(), 1);

        let songs = db.list_songs(&SongFilter::default(), 1, 10).unwrap();
        assert_eq!(songs[0].group, "New Group");
        assert_eq!(songs[0].title, "New Title");
        assert_eq!(songs[0].release_date, "01.01.2000");
        assert_eq!(songs[0].lyrics, "New lyrics");
        assert_eq!(songs[0].link, "https://example.com/new");

        // Same update twice produces the same final row state
        assert_eq!(db.update_song(id, &replacement).unwrap(), 1);
        let again = db.list_songs(&SongFilter::default(), 1, 10).unwrap();
        assert_eq!(again[0].group, songs[0].group);
        assert_eq!(again[0].lyrics, songs[0].lyrics);

        // Zero matched rows is reported, not an error
        assert_eq!(db.update_song(id + 1, &replacement).unwrap(), 0);
    }

    #[test]
    fn test_delete_nonexistent_is_not_found_and_leaves_rows() {
        let mut db = test_db();
        let id = db.insert_song(&sample_song("Muse", "Starlight")).unwrap();

        assert!(matches!(
            db.delete_song(id + 1),
            Err(SongshelfError::SongNotFound { .. })
        ));
        assert_eq!(song_count(&mut db), 1);

        db.delete_song(id).unwrap();
        assert_eq!(song_count(&mut db), 0);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut db = test_db();

        let result: Result<()> = db.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO songs (group_name, song_name) VALUES ('G', 'S')",
                [],
            )?;
            Err(SongshelfError::Validation("boom".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(song_count(&mut db), 0);
    }

    #[test]
    fn test_inserted_lyrics_paginate_as_one_verse() {
        use crate::core::lyrics;

        let mut db = test_db();
        let id = db
            .insert_song(&NewSong {
                group: "G".to_string(),
                title: "S".to_string(),
                release_date: "01.01.2000".to_string(),
                lyrics: "X".to_string(),
                link: "http://x".to_string(),
            })
            .unwrap();

        let text = db.get_lyrics(id).unwrap();
        let page = lyrics::paginate(&text, 1, 1);
        assert_eq!(page.verses, vec!["X"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_song_serializes_with_wire_field_names() {
        let song = Song {
            id: 1,
            group: "Muse".to_string(),
            title: "Starlight".to_string(),
            release_date: "16.07.2006".to_string(),
            lyrics: "la".to_string(),
            link: "https://example.com".to_string(),
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["group"], "Muse");
        assert_eq!(value["song"], "Starlight");
        assert_eq!(value["releaseDate"], "16.07.2006");
        assert_eq!(value["text"], "la");
        assert_eq!(value["link"], "https://example.com");
    }
}
