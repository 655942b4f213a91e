use super::*;
use crate::Power;
use serde::Serialize;
use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;

/// One ledger line. Field order is the column order.
#[derive(Debug, Serialize)]
struct Row<'a> {
    time: String,
    turn_number: u32,
    player: String,
    ball_power: Power,
    routine_id: &'a str,
    match_number: u32,
}

impl<'a> From<&'a Turn> for Row<'a> {
    fn from(turn: &'a Turn) -> Self {
        Self {
            time: turn.time().to_rfc3339(),
            turn_number: turn.number(),
            player: turn.player().to_string(),
            ball_power: turn.power(),
            routine_id: turn.routine().as_str(),
            match_number: turn.match_number(),
        }
    }
}

/// CSV file ledger. The header is written only into an empty file,
/// so restarts keep appending to the same table.
pub struct Csv {
    writer: ::csv::Writer<File>,
}

impl Csv {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let empty = file.metadata()?.len() == 0;
        let writer = ::csv::WriterBuilder::new()
            .has_headers(empty)
            .from_writer(file);
        log::info!("[ledger] appending turns to {}", path.display());
        Ok(Self { writer })
    }
}

impl Ledger for Csv {
    fn append(&mut self, turn: &Turn) -> anyhow::Result<()> {
        self.writer.serialize(Row::from(turn))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::*;
    use chrono::Utc;

    fn turn(n: u32, player: Player, power: Power) -> Turn {
        Turn::new(n, Utc::now(), player, power, Routine::from("match-1-r"), 1)
    }

    #[test]
    fn writes_header_once_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match_log.csv");
        let mut ledger = Csv::open(&path).unwrap();
        ledger.append(&turn(1, Player::A, 80)).unwrap();
        drop(ledger);
        let mut ledger = Csv::open(&path).unwrap();
        ledger.append(&turn(2, Player::B, 95)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "time,turn_number,player,ball_power,routine_id,match_number"
        );
        assert!(lines[1].ends_with(",1,A,80,match-1-r,1"));
        assert!(lines[2].ends_with(",2,B,95,match-1-r,1"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Csv::open(dir.path().join("missing").join("log.csv")).is_err());
    }
}
