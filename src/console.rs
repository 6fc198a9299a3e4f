//! Console logging boundary
//!
//! Records take a variable list of heterogeneous arguments and are emitted
//! as tracing events under the `console` target. A console can also keep
//! the formatted records in memory.

use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::common::Error;

/// Build a `&[ConsoleArg]` from mixed values
///
/// ```ignore
/// console.log(console_args!["User:", json!({"name": "John"}), 30, ConsoleArg::Undefined]);
/// ```
#[macro_export]
macro_rules! console_args {
    ($($arg:expr),* $(,)?) => {
        &[$($crate::console::ConsoleArg::from($arg)),*]
    };
}

/// Console severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// One console argument
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleArg {
    Str(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    Undefined,
    Json(Value),
    Error(String),
}

impl fmt::Display for ConsoleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleArg::Str(s) => f.write_str(s),
            ConsoleArg::Number(n) => write!(f, "{}", n),
            ConsoleArg::Bool(b) => write!(f, "{}", b),
            ConsoleArg::Null => f.write_str("null"),
            ConsoleArg::Undefined => f.write_str("undefined"),
            ConsoleArg::Json(Value::String(s)) => f.write_str(s),
            ConsoleArg::Json(v) => write!(f, "{}", v),
            ConsoleArg::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl From<&str> for ConsoleArg {
    fn from(s: &str) -> Self {
        ConsoleArg::Str(s.to_string())
    }
}

impl From<String> for ConsoleArg {
    fn from(s: String) -> Self {
        ConsoleArg::Str(s)
    }
}

impl From<i32> for ConsoleArg {
    fn from(n: i32) -> Self {
        ConsoleArg::Number(n.into())
    }
}

impl From<i64> for ConsoleArg {
    fn from(n: i64) -> Self {
        ConsoleArg::Number(n.into())
    }
}

impl From<u16> for ConsoleArg {
    fn from(n: u16) -> Self {
        ConsoleArg::Number(n.into())
    }
}

impl From<usize> for ConsoleArg {
    fn from(n: usize) -> Self {
        ConsoleArg::Number((n as u64).into())
    }
}

impl From<f64> for ConsoleArg {
    fn from(n: f64) -> Self {
        match serde_json::Number::from_f64(n) {
            Some(n) => ConsoleArg::Number(n),
            None if n.is_nan() => ConsoleArg::Str("NaN".to_string()),
            None if n > 0.0 => ConsoleArg::Str("Infinity".to_string()),
            None => ConsoleArg::Str("-Infinity".to_string()),
        }
    }
}

impl From<bool> for ConsoleArg {
    fn from(b: bool) -> Self {
        ConsoleArg::Bool(b)
    }
}

impl From<Value> for ConsoleArg {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => ConsoleArg::Null,
            Value::Bool(b) => ConsoleArg::Bool(b),
            Value::Number(n) => ConsoleArg::Number(n),
            other => ConsoleArg::Json(other),
        }
    }
}

impl From<&Value> for ConsoleArg {
    fn from(v: &Value) -> Self {
        v.clone().into()
    }
}

impl From<&Error> for ConsoleArg {
    fn from(e: &Error) -> Self {
        ConsoleArg::Error(e.to_string())
    }
}

impl<T: Into<ConsoleArg>> From<Option<T>> for ConsoleArg {
    fn from(v: Option<T>) -> Self {
        v.map_or(ConsoleArg::Null, Into::into)
    }
}

/// A formatted console record
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleRecord {
    pub level: ConsoleLevel,
    pub line: String,
}

/// Join arguments the way a console prints them: space separated
pub fn join_args(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Default)]
pub struct Console {
    capture: Option<Arc<Mutex<Vec<ConsoleRecord>>>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that also keeps every record in memory
    pub fn capturing() -> Self {
        Self {
            capture: Some(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    pub fn log(&self, args: &[ConsoleArg]) {
        self.emit(ConsoleLevel::Log, args);
    }

    pub fn info(&self, args: &[ConsoleArg]) {
        self.emit(ConsoleLevel::Info, args);
    }

    pub fn warn(&self, args: &[ConsoleArg]) {
        self.emit(ConsoleLevel::Warn, args);
    }

    pub fn error(&self, args: &[ConsoleArg]) {
        self.emit(ConsoleLevel::Error, args);
    }

    pub fn debug(&self, args: &[ConsoleArg]) {
        self.emit(ConsoleLevel::Debug, args);
    }

    pub fn emit(&self, level: ConsoleLevel, args: &[ConsoleArg]) {
        let line = join_args(args);
        match level {
            ConsoleLevel::Log | ConsoleLevel::Info => {
                tracing::info!(target: "console", level = %level, "{}", line)
            }
            ConsoleLevel::Warn => tracing::warn!(target: "console", level = %level, "{}", line),
            ConsoleLevel::Error => tracing::error!(target: "console", level = %level, "{}", line),
            ConsoleLevel::Debug => tracing::debug!(target: "console", level = %level, "{}", line),
        }

        if let Some(capture) = &self.capture {
            capture
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(ConsoleRecord { level, line });
        }
    }

    /// Captured records, empty unless built with [`Console::capturing`]
    pub fn records(&self) -> Vec<ConsoleRecord> {
        match &self.capture {
            Some(capture) => capture.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }
}
