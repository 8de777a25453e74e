use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{json, Value};

use crate::color::Rgb;
use crate::mixing::{AbsorptionRange, PaletteEntry};
use crate::spectrum::ColorMode;

pub const MIX_LOG_FILE: &str = "mixes.jsonl";

fn open_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(MIX_LOG_FILE))
}

fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    let mut line = serde_json::to_vec(value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    line.push(b'\n');
    writer.write_all(&line)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// One resolved color and what produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixLogEntry {
    pub operation: String,
    pub mode: Option<ColorMode>,
    pub inputs: Value,
    pub color: String,
    pub timestamp_ms: u128,
}

impl MixLogEntry {
    pub fn new(operation: &str, mode: Option<ColorMode>, inputs: Value, color: Rgb) -> Self {
        Self {
            operation: operation.to_string(),
            mode,
            inputs,
            color: color.to_hex(),
            timestamp_ms: now_ms(),
        }
    }

    pub fn wavelengths(wavelengths: &[f64], mode: ColorMode, color: Rgb) -> Self {
        Self::new("observed_color", Some(mode), json!(wavelengths), color)
    }

    pub fn ranges(ranges: &[AbsorptionRange], mode: ColorMode, color: Rgb) -> Self {
        let inputs: Vec<[f64; 2]> = ranges.iter().map(|r| [r.min_nm, r.max_nm]).collect();
        Self::new("multi_range", Some(mode), json!(inputs), color)
    }

    pub fn spectrum(excluded: &[AbsorptionRange], step_nm: f64, color: Rgb) -> Self {
        let excluded: Vec<[f64; 2]> = excluded.iter().map(|r| [r.min_nm, r.max_nm]).collect();
        Self::new(
            "active_spectrum",
            None,
            json!({ "excluded": excluded, "step_nm": step_nm }),
            color,
        )
    }

    pub fn palette(entries: &[PaletteEntry], mode: ColorMode, color: Rgb) -> Self {
        let names: Vec<&str> = entries.iter().map(|entry| entry.name).collect();
        Self::new("palette", Some(mode), json!(names), color)
    }
}

/// Appends `entry` to `<dir>/mixes.jsonl`, creating the directory on demand.
pub fn log_mix<P: AsRef<Path>>(dir: P, entry: &MixLogEntry) -> io::Result<()> {
    let mut file = open_log(dir.as_ref())?;
    write_json_line(&mut file, entry)
}

/// In-memory record of mixes, flushed to disk only on request.
#[derive(Debug, Clone, Default)]
pub struct MixJournal {
    entries: Vec<MixLogEntry>,
}

impl MixJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: MixLogEntry) {
        tracing::debug!(operation = %entry.operation, color = %entry.color, "recorded mix");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MixLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_color(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.color.as_str())
    }

    /// Writes every entry to the journal file in `dir` and empties the journal.
    ///
    /// On failure only the entries already written are removed, so a retry
    /// picks up where the failed flush stopped.
    pub fn flush<P: AsRef<Path>>(&mut self, dir: P) -> io::Result<usize> {
        let mut file = open_log(dir.as_ref())?;
        let mut written = 0;
        let result = self.entries.iter().try_for_each(|entry| {
            write_json_line(&mut file, entry)?;
            written += 1;
            Ok::<(), io::Error>(())
        });
        self.entries.drain(..written);
        result.map(|()| written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixing::PALETTE;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("spectro_logging_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn entries_serialize_as_flat_json() {
        let entry = MixLogEntry::wavelengths(&[450.0], ColorMode::Ideal, Rgb::new(255, 128, 0));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["operation"], "observed_color");
        assert_eq!(value["mode"], "ideal");
        assert_eq!(value["inputs"], json!([450.0]));
        assert_eq!(value["color"], "#ff8000");
    }

    #[test]
    fn spectrum_entries_have_no_mode() {
        let excluded = [AbsorptionRange::new(500.0, 550.0)];
        let entry = MixLogEntry::spectrum(&excluded, 2.0, Rgb::WHITE);
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value["mode"].is_null());
        assert_eq!(value["inputs"]["excluded"], json!([[500.0, 550.0]]));
    }

    #[test]
    fn journal_keeps_order_and_flushes_lines() {
        let mut journal = MixJournal::new();
        journal.record(MixLogEntry::palette(
            &PALETTE[..2],
            ColorMode::Real,
            Rgb::new(107, 0, 193),
        ));
        journal.record(MixLogEntry::ranges(
            &[AbsorptionRange::new(420.0, 440.0)],
            ColorMode::Ideal,
            Rgb::new(255, 255, 0),
        ));
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.last_color(), Some("#ffff00"));

        let dir = scratch_dir("flush");
        assert_eq!(journal.flush(&dir).unwrap(), 2);
        assert!(journal.is_empty());

        let contents = fs::read_to_string(dir.join(MIX_LOG_FILE)).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["inputs"], json!(["Violet", "Indigo"]));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn repeated_flush_does_not_duplicate_lines() {
        let mut journal = MixJournal::new();
        journal.record(MixLogEntry::wavelengths(&[450.0], ColorMode::Ideal, Rgb::new(255, 128, 0)));
        journal.record(MixLogEntry::wavelengths(&[530.0], ColorMode::Ideal, Rgb::new(255, 0, 255)));

        let dir = scratch_dir("repeat");
        assert_eq!(journal.flush(&dir).unwrap(), 2);
        assert_eq!(journal.flush(&dir).unwrap(), 0);

        let contents = fs::read_to_string(dir.join(MIX_LOG_FILE)).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_flush_keeps_unwritten_entries() {
        let mut journal = MixJournal::new();
        journal.record(MixLogEntry::wavelengths(&[450.0], ColorMode::Real, Rgb::new(255, 128, 0)));

        // A plain file where the journal directory should be.
        let blocker = scratch_dir("blocked");
        fs::write(&blocker, b"not a directory").unwrap();
        assert!(journal.flush(&blocker).is_err());
        assert_eq!(journal.len(), 1);

        let _ = fs::remove_file(&blocker);
        let dir = scratch_dir("retry");
        assert_eq!(journal.flush(&dir).unwrap(), 1);
        assert!(journal.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_lines_stop_at_the_first_write_error() {
        struct Budget(usize);

        impl Write for Budget {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if buf.len() > self.0 {
                    return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
                }
                self.0 -= buf.len();
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let entry = MixLogEntry::wavelengths(&[450.0], ColorMode::Ideal, Rgb::WHITE);
        let line_len = serde_json::to_vec(&entry).unwrap().len() + 1;
        let mut sink = Budget(line_len);
        assert!(write_json_line(&mut sink, &entry).is_ok());
        assert!(write_json_line(&mut sink, &entry).is_err());
    }
}
