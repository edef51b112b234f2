//! Output formatting for derived views.
//!
//! Views are written either as JSON (one document), JSON Lines (one record
//! per line, handy for piping into `jq`) or tab-separated text for humans.

use crate::types::TagCount;
use serde::Serialize;
use std::io::{self, Write};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
    /// One tab-separated line per record
    Text,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            "text" | "txt" | "plain" => Some(Self::Text),
            _ => None,
        }
    }
}

/// A record that can be shown as a single line of text.
pub trait TextLine {
    fn text_line(&self) -> String;
}

impl TextLine for TagCount {
    fn text_line(&self) -> String {
        format!("{}\t{}", self.count, self.name)
    }
}

/// A writer that serializes records in the chosen [`OutputFormat`].
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects [`OutputFormat::Json`].
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single record.
    pub fn write<T: Serialize + TextLine>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json if self.pretty => {
                serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
            }
            OutputFormat::Json | OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
            }
            OutputFormat::Text => {
                self.writer.write_all(item.text_line().as_bytes())?;
            }
        }
        writeln!(self.writer)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write a list of records.
    ///
    /// JSON writes one array; the line formats write one line per record,
    /// so an empty list produces no output at all.
    pub fn write_all<T: Serialize + TextLine>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
                self.items_written += items.len();
            }
            OutputFormat::JsonLines | OutputFormat::Text => {
                for item in items {
                    self.write(item)?;
                }
            }
        }
        Ok(())
    }

    /// Get the number of records written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<TagCount> {
        vec![
            TagCount {
                name: "street".to_string(),
                count: 4,
            },
            TagCount {
                name: "bw".to_string(),
                count: 1,
            },
        ]
    }

    fn render(format: OutputFormat, pretty: bool) -> (String, usize) {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, format, pretty);
        writer.write_all(&tags()).unwrap();
        let written = writer.items_written();
        (String::from_utf8(buffer).unwrap(), written)
    }

    #[test]
    fn test_write_all_json_array() {
        let (output, written) = render(OutputFormat::Json, false);
        assert_eq!(written, 2);
        assert!(output.starts_with('['));
        assert!(output.contains("\"name\":\"street\""));
        assert!(output.trim().ends_with(']'));
    }

    #[test]
    fn test_write_all_jsonl_one_record_per_line() {
        let (output, written) = render(OutputFormat::JsonLines, true);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(written, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"count\":1"));
    }

    #[test]
    fn test_write_all_text() {
        let (output, _) = render(OutputFormat::Text, false);
        assert_eq!(output, "4\tstreet\n1\tbw\n");
    }

    #[test]
    fn test_empty_list() {
        let mut buffer = Vec::new();
        OutputWriter::new(&mut buffer, OutputFormat::Json, false)
            .write_all::<TagCount>(&[])
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("JSONL"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}
