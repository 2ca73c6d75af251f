//! The global sink for statistics. Nothing is written until [`configure_statistic_logging`] has
//! been called.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticSink {
    /// Printed in front of every statistic.
    prefix: &'static str,
    /// Printed once after a block of statistics, see [`log_statistic_postfix`].
    postfix: Option<&'static str>,
    /// The casing into which statistic names are converted.
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl Debug for StatisticSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticSink")
            .field("prefix", &self.prefix)
            .field("postfix", &self.postfix)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Enables the logging of statistics.
///
/// Every statistic is written as `{prefix} {name}={value}` to `writer`, or to stdout if no writer
/// is given, with the name converted to `casing` if one is given. Only the first call has an
/// effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            postfix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Writes one statistic, if statistic logging has been configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };
    let Ok(mut sink) = sink.lock() else {
        return;
    };

    let name = match sink.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let prefix = sink.prefix;
    let _ = writeln!(sink.writer, "{prefix} {name}={value}");
}

/// Writes the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };
    let Ok(mut sink) = sink.lock() else {
        return;
    };

    if let Some(postfix) = sink.postfix {
        let _ = writeln!(sink.writer, "{postfix}");
    }
}
