use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    discovery::full::{AbstractionStep, DiscoveryPhase, DiscoveryResult},
    error::Result,
    event_log::{
        action::{action_as_char, action_label, sequence_label, Action},
        statistics::LogStatistics,
    },
    relations::RelationMatrix,
};

/// Width of every column of a printed matrix
const COLUMN_WIDTH: usize = 5;
/// Width of banner and separator lines
const LINE_WIDTH: usize = 37;

fn banner(title: &str) -> String {
    format!("=={:=<width$}", title, width = LINE_WIDTH - 2)
}

/// Label of an action in the stage 0 listing
///
/// ASCII actions are shown as their character, all others by their number.
fn stage_zero_label(action: Action) -> String {
    match action_as_char(action) {
        Some(c) if c.is_ascii() => c.to_string(),
        _ => action.to_string(),
    }
}

///
/// Write a [`RelationMatrix`] as right-aligned table with a header row
///
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &RelationMatrix) -> std::io::Result<()> {
    write!(writer, "{:w$}", "", w = COLUMN_WIDTH)?;
    for a in matrix.actions() {
        write!(writer, "{:>w$}", action_label(*a), w = COLUMN_WIDTH)?;
    }
    writeln!(writer)?;
    for (a, row) in matrix.rows() {
        write!(writer, "{:>w$}", action_label(a), w = COLUMN_WIDTH)?;
        for v in row {
            write!(writer, "{:>w$}", v, w = COLUMN_WIDTH)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn write_statistics<W: Write>(writer: &mut W, stats: &LogStatistics) -> std::io::Result<()> {
    writeln!(writer, "{}", banner("STAGE 0"))?;
    writeln!(writer, "Number of distinct events: {}", stats.distinct_actions)?;
    writeln!(writer, "Number of distinct traces: {}", stats.distinct_traces)?;
    writeln!(writer, "Total number of events: {}", stats.total_events)?;
    writeln!(writer, "Total number of traces: {}", stats.total_traces)?;
    writeln!(writer, "Most frequent trace frequency: {}", stats.max_frequency)?;
    for t in &stats.most_frequent_traces {
        writeln!(writer, "{}", sequence_label(t))?;
    }
    for (a, count) in &stats.action_occurrences {
        writeln!(writer, "{} = {}", stage_zero_label(*a), count)?;
    }
    Ok(())
}

fn write_step<W: Write>(writer: &mut W, step: &AbstractionStep) -> std::io::Result<()> {
    write_matrix(writer, &step.support)?;
    writeln!(writer, "{}", "-".repeat(LINE_WIDTH))?;
    writeln!(writer, "{} = {}", step.abstraction, step.pattern)?;
    writeln!(writer, "Number of events removed: {}", step.events_removed)?;
    for (a, count) in &step.action_occurrences {
        writeln!(writer, "{} = {}", action_label(*a), count)?;
    }
    Ok(())
}

///
/// Write the report of all discovery stages
///
/// Stage 0 lists the log statistics, stages 1 and 2 list every abstraction step with the support
/// matrix it was selected from, the introduced abstraction and the resulting action counts.
///
pub fn write_text_report<W: Write>(
    writer: &mut W,
    result: &DiscoveryResult,
) -> std::io::Result<()> {
    write_statistics(writer, &result.initial)?;
    for phase in [DiscoveryPhase::Sequential, DiscoveryPhase::General] {
        writeln!(writer, "{}", banner(&format!("STAGE {}", phase.stage())))?;
        for (i, step) in result.steps_in(phase).enumerate() {
            if i > 0 {
                writeln!(writer, "{}", "=".repeat(LINE_WIDTH))?;
            }
            write_step(writer, step)?;
        }
    }
    writeln!(writer, "{}", banner("THE END"))?;
    Ok(())
}

///
/// Render the text report (see [`write_text_report`]) into a [`String`]
///
pub fn text_report_to_string(result: &DiscoveryResult) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_text_report(&mut buf, result)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

///
/// Export the text report to a file at the specified path
///
pub fn export_text_report<P: AsRef<Path>>(result: &DiscoveryResult, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_text_report(&mut writer, result)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        discovery::full::discover, utils::test_utils::store_from_lines, DiscoveryConfig,
    };

    const ABC_ACB_REPORT: &str = "\
==STAGE 0============================
Number of distinct events: 3
Number of distinct traces: 2
Total number of events: 12
Total number of traces: 4
Most frequent trace frequency: 3
abc
a = 4
b = 4
c = 4
==STAGE 1============================
         a    b    c
    a    0    3    1
    b    0    0    3
    c    0    1    0
-------------------------------------
256 = SEQ(a,b)
Number of events removed: 3
c = 4
256 = 5
==STAGE 2============================
         c  256
    c    0    1
  256    4    0
-------------------------------------
257 = CON(c,256)
Number of events removed: 5
257 = 4
==THE END============================
";

    #[test]
    fn report_of_abc_acb() {
        let store = store_from_lines("a,b,c\na,b,c\na,c,b\na,b,c\n");
        let result = discover(store, DiscoveryConfig::default());
        assert_eq!(text_report_to_string(&result).unwrap(), ABC_ACB_REPORT);
    }

    #[test]
    fn steps_within_a_stage_are_separated() {
        // Two independent sequences: both are abstracted in stage 1
        let store = store_from_lines("a,b\nc,d\n");
        let result = discover(store, DiscoveryConfig::default());
        let report = text_report_to_string(&result).unwrap();
        let stage_one = report
            .split("==STAGE 1============================\n")
            .nth(1)
            .and_then(|s| s.split("==STAGE 2").next())
            .unwrap();
        assert!(stage_one.contains("256 = SEQ(a,b)"));
        assert!(stage_one.contains("=====================================\n"));
        assert!(stage_one.contains("257 = SEQ(c,d)"));
    }

    #[test]
    fn empty_log_report() {
        let result = discover(crate::TraceStore::new(), DiscoveryConfig::default());
        assert_eq!(
            text_report_to_string(&result).unwrap(),
            "\
==STAGE 0============================
Number of distinct events: 0
Number of distinct traces: 0
Total number of events: 0
Total number of traces: 0
Most frequent trace frequency: 0
==STAGE 1============================
==STAGE 2============================
==THE END============================
"
        );
    }

    #[test]
    fn stage_zero_labels() {
        assert_eq!(stage_zero_label(b'a'.into()), "a");
        assert_eq!(stage_zero_label(b'7'.into()), "7");
        assert_eq!(stage_zero_label(0xE9), "233");
        assert_eq!(stage_zero_label(0x80), "128");
    }

    #[test]
    fn export_to_file() {
        let store = store_from_lines("a,b\n");
        let result = discover(store, DiscoveryConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        export_text_report(&result, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, text_report_to_string(&result).unwrap());
    }
}
