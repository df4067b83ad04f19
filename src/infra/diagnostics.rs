//! # Diagnostics Module / 诊断模块
//!
//! This module defines the logging port the entity graph reports through.
//! Nothing in the core writes to stdout directly: every non-fatal event is
//! handed to a `DiagnosticsSink` that the caller injects at construction.
//!
//! 此模块定义了实体图用于报告的日志端口。
//! 核心代码不会直接写入 stdout：每个非致命事件都会交给调用方在构建时注入的
//! `DiagnosticsSink`。

use colored::*;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic event.
/// 诊断事件的严重级别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warning",
        };
        f.write_str(s)
    }
}

/// Stable identifier of what happened, independent of the message locale.
/// 事件的稳定标识符，与消息的语言无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    /// A functional suite declares no test references.
    SuiteWithoutTests,
    /// A performance suite declares no pattern references.
    PerformanceSuiteWithoutPatterns,
    /// A performance pattern declares no run references.
    PatternWithoutRuns,
    /// A performance suite references a pattern name that no record carries.
    UnresolvedPattern,
    /// A performance pattern references a run name that no record carries.
    UnresolvedRun,
    /// More than one record of the same kind shares a name.
    DuplicateName,
    /// A field lookup hit a suite whose config lacks the field.
    UnknownQueryField,
    /// Construction finished.
    GraphBuilt,
}

/// A single structured event: level, code, rendered message and key/value context.
///
/// 单个结构化事件：级别、代码、渲染后的消息以及键值上下文。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub level: Level,
    pub code: EventCode,
    pub message: String,
    pub context: BTreeMap<&'static str, String>,
}

impl DiagnosticEvent {
    pub fn new(level: Level, code: EventCode, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn warn(code: EventCode, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, code, message)
    }

    pub fn info(code: EventCode, message: impl Into<String>) -> Self {
        Self::new(Level::Info, code, message)
    }

    /// The context rendered as ` [key=value, ...]`, or empty when there is none.
    pub fn context_suffix(&self) -> String {
        if self.context.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .context
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!(" [{}]", pairs.join(", "))
    }

    /// Attaches a context entry, replacing any previous value under `key`.
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.insert(key, value.to_string());
        self
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", self.level, self.message, self.context_suffix())
    }
}

/// The logging port. Implementations decide where events go.
///
/// 日志端口。由实现决定事件的去向。
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: DiagnosticEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _event: DiagnosticEvent) {}
}

/// Collects events in memory, in emission order.
///
/// 在内存中按发出顺序收集事件。
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every event received so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns only the `Warn` events.
    pub fn warnings(&self) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::Warn)
            .collect()
    }

    /// Returns the events carrying `code`.
    pub fn with_code(&self, code: EventCode) -> Vec<DiagnosticEvent> {
        self.events().into_iter().filter(|e| e.code == code).collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn emit(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Prints events to the console with colors, dropping anything below `min_level`.
/// Warnings go to stderr, everything else to stdout.
///
/// 以彩色形式将事件打印到控制台，丢弃低于 `min_level` 的事件。
/// 警告输出到 stderr，其余输出到 stdout。
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    min_level: Level,
}

impl ConsoleSink {
    pub fn new(min_level: Level) -> Self {
        Self { min_level }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(Level::Warn)
    }
}

impl ConsoleSink {
    /// One console line: colored level tag, message and context.
    pub fn render(event: &DiagnosticEvent) -> String {
        let tag = match event.level {
            Level::Warn => "warning:".yellow().bold(),
            Level::Info => "info:".cyan(),
            Level::Debug => "debug:".dimmed(),
        };
        format!("{} {}{}", tag, event.message, event.context_suffix().dimmed())
    }
}

impl DiagnosticsSink for ConsoleSink {
    fn emit(&self, event: DiagnosticEvent) {
        if event.level < self.min_level {
            return;
        }
        match event.level {
            Level::Warn => eprintln!("{}", Self::render(&event)),
            Level::Info | Level::Debug => println!("{}", Self::render(&event)),
        }
    }
}
