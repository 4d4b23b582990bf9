use serde::Deserialize;
use tracing::debug;

/// One decoded line of a test-run log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Default)]
pub struct ParsedLog {
    pub records: Vec<LogRecord>,
    /// Non-blank lines that failed to decode and were skipped.
    pub malformed_lines: usize,
}

/// Parse JSON Lines content. Blank lines are ignored; lines that fail to
/// decode are skipped and counted.
pub fn parse(content: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<LogRecord>(line) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                debug!("Skipping malformed log line {}: {}", idx + 1, e);
                parsed.malformed_lines += 1;
            }
        }
    }

    parsed
}

/// Decode raw file bytes, replacing invalid UTF-8 instead of failing.
pub fn decode(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "\n   \n{\"type\":\"test_result\",\"status\":\"success\",\"timestamp\":\"a\"}\n\n";
        let parsed = parse(content);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.malformed_lines, 0);
    }

    #[test]
    fn test_parse_counts_malformed_lines() {
        let content = concat!(
            "{\"type\":\"test_result\",\"status\":\"success\",\"duration\":12,\"timestamp\":\"t1\"}\n",
            "{\"type\":\"test_result\",\"status\":\"err\n",
            "not json\n",
            "{\"type\":\"test_result\",\"status\":\"error\",\"timestamp\":\"t2\"}\n",
        );
        let parsed = parse(content);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.malformed_lines, 2);
        assert_eq!(parsed.records[0].duration, Some(12.0));
        assert_eq!(parsed.records[1].status, "error");
    }

    #[test]
    fn test_non_object_lines_are_malformed() {
        let parsed = parse("42\n\"text\"\n[1,2]\n");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.malformed_lines, 3);
    }

    #[test]
    fn test_unknown_fields_and_types_are_kept() {
        let parsed = parse(
            "{\"type\":\"run_started\",\"network\":\"datil\",\"pkp\":{\"id\":1},\"timestamp\":\"t0\"}",
        );
        assert_eq!(parsed.malformed_lines, 0);
        assert_eq!(parsed.records[0].kind, "run_started");
        assert_eq!(parsed.records[0].status, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("{\"type\":\"test_result\",\"status\":\"error\",\"timestamp\":\"t\"}\r\n\r\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.malformed_lines, 0);
    }

    #[test]
    fn test_decode_is_lossy() {
        let text = decode(b"{\"type\":\"x\"}\n\xff\xfe\n");
        let parsed = parse(&text);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.malformed_lines, 1);
    }
}
