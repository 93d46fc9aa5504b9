// crates/db/src/queries.rs
//! Character registry and snapshot history queries.

use crate::{Database, DbError, DbResult};
use chrono::{NaiveDate, Utc};
use levellog_types::{Character, Snapshot};
use std::collections::HashMap;

/// Last-N-days snapshot slices keyed by character id, as the ranking
/// engine consumes them.
pub type RecentLogs = HashMap<String, Vec<Snapshot>>;

/// Dates are stored as TEXT in this format so lexicographic order matches
/// chronological order and range scans stay index-friendly.
const DATE_FMT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FMT).map_err(|_| DbError::InvalidDate(raw.to_string()))
}

impl Database {
    // ========================================================================
    // Characters
    // ========================================================================

    /// Register a character. Fails on a duplicate id.
    pub async fn insert_character(&self, character: &Character) -> DbResult<()> {
        let created_at = character
            .created_at
            .unwrap_or_else(|| Utc::now().timestamp());
        sqlx::query(
            r#"
            INSERT INTO characters (id, name, world, vocation, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&character.id)
        .bind(&character.name)
        .bind(&character.world)
        .bind(&character.vocation)
        .bind(&character.category)
        .bind(created_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn get_character(&self, id: &str) -> DbResult<Option<Character>> {
        let row: Option<(String, String, String, String, String, Option<i64>)> = sqlx::query_as(
            "SELECT id, name, world, vocation, category, created_at FROM characters WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|(id, name, world, vocation, category, created_at)| Character {
            id,
            name,
            world,
            vocation,
            category,
            created_at,
        }))
    }

    /// All characters, oldest registration first.
    pub async fn list_characters(&self) -> DbResult<Vec<Character>> {
        let rows: Vec<(String, String, String, String, String, Option<i64>)> = sqlx::query_as(
            "SELECT id, name, world, vocation, category, created_at
             FROM characters ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, world, vocation, category, created_at)| Character {
                id,
                name,
                world,
                vocation,
                category,
                created_at,
            })
            .collect())
    }

    /// Remove a character and its entire snapshot history.
    ///
    /// Returns false when the id was unknown.
    pub async fn delete_character(&self, id: &str) -> DbResult<bool> {
        sqlx::query("DELETE FROM xp_logs WHERE character_id = ?1")
            .bind(id)
            .execute(self.pool())
            .await?;
        let result = sqlx::query("DELETE FROM characters WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Append one daily snapshot. A second write for the same
    /// (character, date) replaces the first — last write wins, the
    /// documented duplicate-ingestion policy.
    pub async fn upsert_snapshot(&self, character_id: &str, snapshot: &Snapshot) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO xp_logs (character_id, date, level, xp, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (character_id, date)
            DO UPDATE SET level = excluded.level, xp = excluded.xp, created_at = excluded.created_at
            "#,
        )
        .bind(character_id)
        .bind(snapshot.date.format(DATE_FMT).to_string())
        .bind(snapshot.level)
        .bind(snapshot.xp)
        .bind(Utc::now().timestamp())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Full snapshot history for one character, ascending by date.
    pub async fn logs_for_character(&self, character_id: &str) -> DbResult<Vec<Snapshot>> {
        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            "SELECT date, level, xp FROM xp_logs WHERE character_id = ?1 ORDER BY date ASC",
        )
        .bind(character_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|(date, level, xp)| {
                Ok(Snapshot {
                    date: parse_date(&date)?,
                    level,
                    xp,
                })
            })
            .collect()
    }

    /// Snapshots on or after `from` for one character, ascending by date.
    pub async fn logs_since(&self, character_id: &str, from: NaiveDate) -> DbResult<Vec<Snapshot>> {
        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            "SELECT date, level, xp FROM xp_logs
             WHERE character_id = ?1 AND date >= ?2 ORDER BY date ASC",
        )
        .bind(character_id)
        .bind(from.format(DATE_FMT).to_string())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|(date, level, xp)| {
                Ok(Snapshot {
                    date: parse_date(&date)?,
                    level,
                    xp,
                })
            })
            .collect()
    }

    /// One windowed query across all characters, grouped in memory —
    /// feeds the ranking engine without a per-character round trip.
    pub async fn recent_logs_by_character(&self, from: NaiveDate) -> DbResult<RecentLogs> {
        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
            "SELECT character_id, date, level, xp FROM xp_logs
             WHERE date >= ?1 ORDER BY character_id ASC, date ASC",
        )
        .bind(from.format(DATE_FMT).to_string())
        .fetch_all(self.pool())
        .await?;

        let mut grouped: RecentLogs = HashMap::new();
        for (character_id, date, level, xp) in rows {
            grouped.entry(character_id).or_default().push(Snapshot {
                date: parse_date(&date)?,
                level,
                xp,
            });
        }
        Ok(grouped)
    }

    pub async fn count_logs(&self, character_id: &str) -> DbResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM xp_logs WHERE character_id = ?1")
                .bind(character_id)
                .fetch_one(self.pool())
                .await?;
        Ok(count)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn character(id: &str, world: &str, vocation: &str) -> Character {
        Character {
            id: id.to_string(),
            name: format!("char-{id}"),
            world: world.to_string(),
            vocation: vocation.to_string(),
            category: "main".to_string(),
            created_at: Some(1_700_000_000),
        }
    }

    fn snap(date: NaiveDate, level: i64, xp: i64) -> Snapshot {
        Snapshot { date, level, xp }
    }

    #[tokio::test]
    async fn test_insert_and_get_character() {
        let db = Database::new_in_memory().await.unwrap();
        let c = character("c1", "Antica", "druid");
        db.insert_character(&c).await.unwrap();

        let fetched = db.get_character("c1").await.unwrap().unwrap();
        assert_eq!(fetched, c);
        assert!(db.get_character("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_character_id_rejected() {
        let db = Database::new_in_memory().await.unwrap();
        let c = character("c1", "Antica", "druid");
        db.insert_character(&c).await.unwrap();
        assert!(db.insert_character(&c).await.is_err());
    }

    #[tokio::test]
    async fn test_list_characters_ordered_by_registration() {
        let db = Database::new_in_memory().await.unwrap();
        let mut older = character("b", "Antica", "druid");
        older.created_at = Some(100);
        let mut newer = character("a", "Secura", "knight");
        newer.created_at = Some(200);
        db.insert_character(&newer).await.unwrap();
        db.insert_character(&older).await.unwrap();

        let all = db.list_characters().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_logs_sorted_ascending() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();

        // Inserted out of order; reads come back sorted.
        db.upsert_snapshot("c1", &snap(d(2024, 1, 3), 101, 300))
            .await
            .unwrap();
        db.upsert_snapshot("c1", &snap(d(2024, 1, 1), 100, 100))
            .await
            .unwrap();
        db.upsert_snapshot("c1", &snap(d(2024, 1, 2), 100, 200))
            .await
            .unwrap();

        let logs = db.logs_for_character("c1").await.unwrap();
        let dates: Vec<NaiveDate> = logs.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    }

    #[tokio::test]
    async fn test_upsert_duplicate_date_last_write_wins() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();

        db.upsert_snapshot("c1", &snap(d(2024, 1, 1), 100, 100))
            .await
            .unwrap();
        db.upsert_snapshot("c1", &snap(d(2024, 1, 1), 101, 999))
            .await
            .unwrap();

        let logs = db.logs_for_character("c1").await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, 101);
        assert_eq!(logs[0].xp, 999);
        assert_eq!(db.count_logs("c1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_logs_since_filters_by_date() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();
        for day in 1..=10 {
            db.upsert_snapshot("c1", &snap(d(2024, 1, day), 100, i64::from(day) * 100))
                .await
                .unwrap();
        }

        let recent = db.logs_since("c1", d(2024, 1, 8)).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].date, d(2024, 1, 8));
    }

    #[tokio::test]
    async fn test_recent_logs_grouped_by_character() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();
        db.insert_character(&character("c2", "Secura", "knight"))
            .await
            .unwrap();

        db.upsert_snapshot("c1", &snap(d(2024, 1, 9), 100, 100))
            .await
            .unwrap();
        db.upsert_snapshot("c1", &snap(d(2024, 1, 10), 100, 200))
            .await
            .unwrap();
        db.upsert_snapshot("c2", &snap(d(2024, 1, 10), 50, 900))
            .await
            .unwrap();
        // Outside the window.
        db.upsert_snapshot("c2", &snap(d(2024, 1, 1), 49, 800))
            .await
            .unwrap();

        let grouped = db.recent_logs_by_character(d(2024, 1, 4)).await.unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["c1"].len(), 2);
        assert_eq!(grouped["c2"].len(), 1);
        // Within each group, ascending by date.
        assert_eq!(grouped["c1"][0].date, d(2024, 1, 9));
    }

    #[tokio::test]
    async fn test_delete_character_removes_logs() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();
        db.upsert_snapshot("c1", &snap(d(2024, 1, 1), 100, 100))
            .await
            .unwrap();

        assert!(db.delete_character("c1").await.unwrap());
        assert!(db.get_character("c1").await.unwrap().is_none());
        assert_eq!(db.count_logs("c1").await.unwrap(), 0);
        // Deleting again reports not-found.
        assert!(!db.delete_character("c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_history_reads_empty() {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_character(&character("c1", "Antica", "druid"))
            .await
            .unwrap();
        assert!(db.logs_for_character("c1").await.unwrap().is_empty());
        assert!(db
            .recent_logs_by_character(d(2024, 1, 1))
            .await
            .unwrap()
            .is_empty());
    }
}
