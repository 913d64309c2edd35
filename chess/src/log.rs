use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Line written after every game.
const SEPARATOR: &str = "----------------------------------------";

/// Move log of the current game, appended to a file when the game ends.
#[derive(Debug, Default)]
pub struct GameLog {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl GameLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        GameLog {
            path,
            lines: Vec::new(),
        }
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Appends the recorded lines and a separator to the log file, if there is one.
    #[instrument(level = "debug", skip(self), fields(lines = self.lines.len()), err)]
    pub fn flush(&mut self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if self.lines.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);

        for line in self.lines.drain(..) {
            writeln!(writer, "{}", line)?;
        }

        writeln!(writer, "{}", SEPARATOR)?;
        writer.flush()?;

        debug!(path = %path.display(), "appended game log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_games_are_appended_with_separators() {
        let name = format!("deep-chess-log-{}.txt", std::process::id());
        let path = std::env::temp_dir().join(name);
        let _ = fs::remove_file(&path);

        let mut log = GameLog::new(Some(path.clone()));
        log.record("Turn 1, White: pe2->e4");
        log.flush().unwrap();
        assert!(log.lines().is_empty());

        log.record("Turn 1, White: pd2->d4");
        log.record("It's a tie by stalemate!");
        log.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            text,
            format!(
                "Turn 1, White: pe2->e4\n{0}\n\
                 Turn 1, White: pd2->d4\nIt's a tie by stalemate!\n{0}\n",
                SEPARATOR
            )
        );
        assert_eq!(SEPARATOR.len(), 40);
    }

    #[test]
    fn test_no_file_without_a_path() {
        let mut log = GameLog::default();
        log.record("Turn 1, White: pe2->e4");
        log.flush().unwrap();
        assert_eq!(log.lines().len(), 1);
    }
}
