//! Line-oriented audit logs

use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Append-only log of rejected or modified lines
///
/// With no path every write is discarded.
pub struct AuditLog {
    writer: Option<Box<dyn Write>>,
    lines: usize,
}

impl AuditLog {
    /// Log into `path`, truncating it
    pub fn create(path: &Path) -> Result<Self> {
        let file = super::open_output(path, false)?;
        Ok(Self {
            writer: Some(Box::new(file)),
            lines: 0,
        })
    }

    /// Log into `path` when given, otherwise discard
    pub fn optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::create(path),
            None => Ok(Self::disabled()),
        }
    }

    pub fn disabled() -> Self {
        Self {
            writer: None,
            lines: 0,
        }
    }

    pub fn line(&mut self, line: &str) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{line}")?;
            self.lines += 1;
        }
        Ok(())
    }

    /// Lines written so far
    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_audit_log_writes_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rebutjades.log");

        let mut log = AuditLog::create(&path).unwrap();
        log.line("3: [too_short] Capítol 3").unwrap();
        log.line("7: [duplicate] Bon dia").unwrap();
        log.finish().unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "3: [too_short] Capítol 3\n7: [duplicate] Bon dia\n"
        );
    }

    #[test]
    fn test_disabled_log_discards() {
        let mut log = AuditLog::optional(None).unwrap();
        log.line("1: [UNKNOWN] ???").unwrap();
        log.finish().unwrap();
        assert!(log.is_empty());
    }
}
