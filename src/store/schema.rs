/// Table for completed matches, one row per match with its turns as JSON.
#[rustfmt::skip]
pub const MATCHES: &str = "matches";
/// Table for individual turns, keyed to their match.
#[rustfmt::skip]
pub const TURNS:   &str = "turns";

/// Table metadata for the match store.
///
/// Describes structure only; statements are assembled at compile time with
/// [`const_format::concatcp!`] and executed by [`super::Postgres`].
pub trait Schema {
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Returns PostgreSQL column types of the insert statement, in order.
    fn columns() -> &'static [tokio_postgres::types::Type];
}

impl Schema for crate::rally::Match {
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            MATCHES,
            " (
                id              BIGSERIAL PRIMARY KEY,
                match_number    INTEGER NOT NULL,
                start_time      TIMESTAMPTZ NOT NULL,
                end_time        TIMESTAMPTZ NULL,
                winner          TEXT NULL,
                turns           JSONB NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            MATCHES,
            "_number ON ",
            MATCHES,
            " (match_number);"
        )
    }
    fn columns() -> &'static [tokio_postgres::types::Type] {
        &[
            tokio_postgres::types::Type::INT4,
            tokio_postgres::types::Type::TIMESTAMPTZ,
            tokio_postgres::types::Type::TIMESTAMPTZ,
            tokio_postgres::types::Type::TEXT,
        ]
    }
}

impl Schema for crate::rally::Turn {
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            TURNS,
            " (
                id              BIGSERIAL PRIMARY KEY,
                turn_number     INTEGER NOT NULL,
                time            TIMESTAMPTZ NOT NULL,
                player          TEXT NOT NULL,
                ball_power      INTEGER NOT NULL,
                routine_id      TEXT NOT NULL,
                match_number    INTEGER NOT NULL,
                match_id        BIGINT NOT NULL REFERENCES ",
            MATCHES,
            "(id)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            TURNS,
            "_match ON ",
            TURNS,
            " (match_id, turn_number);"
        )
    }
    fn columns() -> &'static [tokio_postgres::types::Type] {
        &[
            tokio_postgres::types::Type::INT4,
            tokio_postgres::types::Type::TIMESTAMPTZ,
            tokio_postgres::types::Type::TEXT,
            tokio_postgres::types::Type::INT4,
            tokio_postgres::types::Type::TEXT,
            tokio_postgres::types::Type::INT4,
            tokio_postgres::types::Type::INT8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::*;

    #[test]
    fn turns_reference_matches() {
        assert!(Turn::creates().contains("REFERENCES matches(id)"));
        assert!(Match::creates().starts_with("CREATE TABLE IF NOT EXISTS matches"));
        assert_eq!(Turn::columns().len(), 7);
        assert_eq!(Match::columns().len(), 4);
    }
}
