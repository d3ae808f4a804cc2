use std::io::{self, Write};

use anyhow::{anyhow, Result};
use bat::PrettyPrinter;
use console::style;
use serde_json::Value;

/// Where streamed output goes.
pub trait StreamSink {
    /// One generated token, written without any separator
    fn token(&mut self, text: &str) -> Result<()>;

    /// The terminal event of a stream
    fn stream_end(&mut self, event: &Value) -> Result<()>;

    /// An event kind that is otherwise skipped
    fn ignored(&mut self, _event_type: &str) -> Result<()> {
        Ok(())
    }
}

/// Break between the streamed tokens and the stream-end summary
pub fn end_token_line<W: Write + ?Sized>(writer: &mut W) -> io::Result<()> {
    writeln!(writer)?;
    writer.flush()
}

/// Terminal output: tokens as they arrive, the summary highlighted as JSON.
pub struct ConsoleSink {
    show_events: bool,
}

impl ConsoleSink {
    pub fn new(show_events: bool) -> Self {
        Self { show_events }
    }
}

impl StreamSink for ConsoleSink {
    fn token(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn stream_end(&mut self, event: &Value) -> Result<()> {
        end_token_line(&mut io::stdout().lock())?;
        let summary = serde_json::to_string_pretty(event)?;
        PrettyPrinter::new()
            .input_from_bytes(summary.as_bytes())
            .language("json")
            .print()
            .map_err(|e| anyhow!("Failed to render stream summary: {}", e))?;
        println!();
        Ok(())
    }

    fn ignored(&mut self, event_type: &str) -> Result<()> {
        if self.show_events {
            println!("{}", style(format!("[{}]", event_type)).dim());
        }
        Ok(())
    }
}

/// Plain output to any writer, used when stdout is not a terminal.
pub struct WriterSink<W: Write> {
    writer: W,
    show_events: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_events: false,
        }
    }

    pub fn show_events(mut self, show_events: bool) -> Self {
        self.show_events = show_events;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StreamSink for WriterSink<W> {
    fn token(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn stream_end(&mut self, event: &Value) -> Result<()> {
        end_token_line(&mut self.writer)?;
        writeln!(self.writer, "{}", serde_json::to_string_pretty(event)?)?;
        self.writer.flush()?;
        Ok(())
    }

    fn ignored(&mut self, event_type: &str) -> Result<()> {
        if self.show_events {
            writeln!(self.writer, "[{}]", event_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(sink: WriterSink<Vec<u8>>) -> String {
        String::from_utf8_lossy(&sink.into_inner()).to_string()
    }

    #[test]
    fn test_tokens_have_no_separator() -> Result<()> {
        let mut sink = WriterSink::new(Vec::new());
        sink.token("Hel")?;
        sink.token("lo")?;
        assert_eq!(output(sink), "Hello");
        Ok(())
    }

    #[test]
    fn test_stream_end_prints_object() -> Result<()> {
        let event = json!({"event_type": "stream-end", "finish_reason": "COMPLETE"});
        let mut sink = WriterSink::new(Vec::new());
        sink.token("Hi")?;
        sink.stream_end(&event)?;

        let text = output(sink);
        let (tokens, summary) = text.split_once('\n').unwrap_or_default();
        assert_eq!(tokens, "Hi");
        assert_eq!(serde_json::from_str::<Value>(summary.trim())?, event);
        Ok(())
    }

    #[test]
    fn test_single_newline_before_summary() -> Result<()> {
        let mut line_break = Vec::new();
        end_token_line(&mut line_break)?;
        assert_eq!(line_break, b"\n");

        let mut sink = WriterSink::new(Vec::new());
        sink.token("Hi")?;
        sink.stream_end(&json!({}))?;
        assert_eq!(output(sink), "Hi\n{}\n");
        Ok(())
    }

    #[test]
    fn test_ignored_is_silent_by_default() -> Result<()> {
        let mut sink = WriterSink::new(Vec::new());
        sink.ignored("search-results")?;
        assert_eq!(output(sink), "");

        let mut sink = WriterSink::new(Vec::new()).show_events(true);
        sink.ignored("search-results")?;
        assert_eq!(output(sink), "[search-results]\n");
        Ok(())
    }
}
