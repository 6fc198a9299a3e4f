//! Console probes

use serde_json::json;

use crate::catalog::LogProbe;
use crate::common::Error;
use crate::console::{Console, ConsoleArg};
use crate::console_args;

pub(super) fn run(probe: LogProbe, console: &Console) -> String {
    match probe {
        LogProbe::Basic => {
            console.info(console_args!["Info: Application started successfully"]);
            console.warn(console_args!["Warning: Low disk space"]);
            console.error(console_args!["Exception: Undefined is not a function"]);
            console.debug(console_args!["exception: Wrote 5 entries to database."]);
            console.error(console_args!["https://ui.shadcn.com/docs/components/alert-dialog"]);
            "Sent various console logs - check console tab".to_string()
        }

        LogProbe::ObjectsAndArrays => {
            console.log(console_args![
                "User:",
                json!({ "name": "John", "age": 30, "nested": { "value": 123 } })
            ]);
            console.log(console_args!["Array test:", json!([1, 2, 3, 4, 5])]);
            console.log(console_args![
                "Multiple args:",
                "string",
                123,
                true,
                ConsoleArg::Null,
                ConsoleArg::Undefined
            ]);
            "Sent object/array console logs - check console tab".to_string()
        }

        LogProbe::Errors => {
            let caught = fail("exception: Wrote 5 entries to database.");
            if let Err(e) = &caught {
                console.error(console_args!["Caught exception:", e]);
            }
            console.error(console_args!["Error: Network request failed"]);
            console.error(console_args!["Exception: Undefined is not a function"]);
            "Sent error console logs - check console tab".to_string()
        }

        LogProbe::Performance => {
            console.log(console_args!["Performance: Render took 245ms"]);
            console.warn(console_args!["Performance: Slow component detected"]);
            console.log(console_args!["FPS dropped to 45"]);
            console.log(console_args!["Memory usage: 125MB"]);
            "Sent performance logs - check console tab".to_string()
        }
    }
}

fn fail(message: &str) -> Result<(), Error> {
    Err(Error::Internal(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleLevel;

    #[test]
    fn test_basic_levels() {
        let console = Console::capturing();
        run(LogProbe::Basic, &console);
        let levels: Vec<ConsoleLevel> = console.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                ConsoleLevel::Info,
                ConsoleLevel::Warn,
                ConsoleLevel::Error,
                ConsoleLevel::Debug,
                ConsoleLevel::Error
            ]
        );
    }

    #[test]
    fn test_basic_logs_alert_dialog_docs_url() {
        let console = Console::capturing();
        run(LogProbe::Basic, &console);
        assert_eq!(
            console.records()[4].line,
            "https://ui.shadcn.com/docs/components/alert-dialog"
        );
    }

    #[test]
    fn test_caught_exception_is_logged_not_raised() {
        let console = Console::capturing();
        let result = run(LogProbe::Errors, &console);
        assert_eq!(result, "Sent error console logs - check console tab");
        let first = &console.records()[0];
        assert_eq!(first.level, ConsoleLevel::Error);
        assert!(first.line.starts_with("Caught exception: Error: "));
        assert!(first.line.contains("Wrote 5 entries"));
    }

    #[test]
    fn test_mixed_args_line() {
        let console = Console::capturing();
        run(LogProbe::ObjectsAndArrays, &console);
        assert_eq!(
            console.records()[2].line,
            "Multiple args: string 123 true null undefined"
        );
    }
}
