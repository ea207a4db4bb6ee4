//! Presentation of log segments and runner events on stdout.

use std::io::Write;

use chrono::Utc;
use crossterm::style::{style, Color, Stylize};
use serde::Serialize;
use stegsuite_core::api::{
    JobStatus, LogBuffer, LogSegment, RunState, RunnerEvent, Severity, ToolId,
};

use crate::commands::cli::StreamFormat;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    success: Option<Color>,
    error: Option<Color>,
    warning: Option<Color>,
    info: Option<Color>,
}

impl Palette {
    pub fn for_theme(theme: &str) -> Self {
        match theme.trim().to_ascii_lowercase().as_str() {
            "light" => Self {
                success: Some(Color::DarkGreen),
                error: Some(Color::DarkRed),
                warning: Some(Color::DarkYellow),
                info: Some(Color::DarkBlue),
            },
            "mono" => Self::mono(),
            _ => Self {
                success: Some(Color::Green),
                error: Some(Color::Red),
                warning: Some(Color::Yellow),
                info: Some(Color::Cyan),
            },
        }
    }

    pub fn mono() -> Self {
        Self {
            success: None,
            error: None,
            warning: None,
            info: None,
        }
    }

    fn color(&self, severity: Severity) -> Option<Color> {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Normal => None,
        }
    }
}

/// One JSONL record.
#[derive(Debug, Serialize)]
struct StreamEvent {
    v: u8,
    #[serde(rename = "type")]
    event_type: &'static str,
    ts: String,
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<ToolId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<RunState>,
}

impl StreamEvent {
    fn new(event_type: &'static str, run_id: &str) -> Self {
        Self {
            v: 1,
            event_type,
            ts: Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            tool: None,
            text: None,
            severity: None,
            status: None,
            state: None,
        }
    }
}

/// Writes segments to `out` and keeps a copy of everything shown for export.
pub struct Renderer<W: Write> {
    out: W,
    format: StreamFormat,
    palette: Palette,
    run_id: String,
    log: LogBuffer,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, format: StreamFormat, palette: Palette) -> Self {
        Self {
            out,
            format,
            palette,
            run_id: uuid::Uuid::new_v4().to_string(),
            log: LogBuffer::new(),
        }
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: impl Into<String>, severity: Severity) -> Result<(), CliError> {
        self.segment(LogSegment::new(text, severity))
    }

    pub fn segment(&mut self, segment: LogSegment) -> Result<(), CliError> {
        match self.format {
            StreamFormat::Text => match self.palette.color(segment.severity) {
                Some(color) => write!(self.out, "{}", style(&segment.text).with(color))?,
                None => write!(self.out, "{}", segment.text)?,
            },
            StreamFormat::Jsonl => {
                let mut ev = StreamEvent::new("log", &self.run_id);
                ev.text = Some(segment.text.clone());
                ev.severity = Some(segment.severity);
                writeln!(self.out, "{}", serde_json::to_string(&ev)?)?;
            }
        }
        self.out.flush()?;
        self.log.push(segment);
        Ok(())
    }

    pub fn event(&mut self, event: RunnerEvent) -> Result<(), CliError> {
        match event {
            RunnerEvent::Log { text, severity } => self.line(text, severity),
            RunnerEvent::JobStarted { tool } => {
                tracing::debug!(tool = %tool, "job started");
                let mut ev = StreamEvent::new("job.start", &self.run_id);
                ev.tool = Some(tool);
                self.meta(ev)
            }
            RunnerEvent::JobFinished(result) => {
                let mut ev = StreamEvent::new("job.end", &self.run_id);
                ev.tool = Some(result.tool);
                ev.status = Some(result.status);
                self.meta(ev)
            }
            RunnerEvent::RunComplete { state } => {
                let mut ev = StreamEvent::new("run.end", &self.run_id);
                ev.state = Some(state);
                self.meta(ev)
            }
        }
    }

    /// Lifecycle events only exist in the JSONL stream; text mode shows the log lines.
    fn meta(&mut self, ev: StreamEvent) -> Result<(), CliError> {
        if self.format != StreamFormat::Jsonl {
            return Ok(());
        }
        writeln!(self.out, "{}", serde_json::to_string(&ev)?)?;
        self.out.flush()?;
        Ok(())
    }
}
