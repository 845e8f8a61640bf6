use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::bufread::GzDecoder;
use itertools::Itertools;

use super::{action::Action, trace_store_struct::TraceStore};
use crate::error::Result;

/// Default separator between the actions of a line
pub const DEFAULT_SEPARATOR: u8 = b',';

///
/// Options for importing a line-based text log
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextImportOptions {
    /// Byte separating the actions of a line
    pub separator: u8,
    /// Stop reading at the first empty line (`true`) or skip empty lines (`false`)
    pub stop_at_empty_line: bool,
    /// Maximum number of distinct traces (unbounded if `None`)
    pub max_distinct_traces: Option<usize>,
}

impl Default for TextImportOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            stop_at_empty_line: true,
            max_distinct_traces: None,
        }
    }
}

///
/// Parse one line of a text log into its action sequence
///
/// The first byte of the line is an action, as is every byte directly following a `separator`.
/// All other bytes are ignored. A trailing `\r` is removed first.
///
pub fn parse_trace_line(line: &[u8], separator: u8) -> Vec<Action> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let Some(first) = line.first() else {
        return Vec::new();
    };
    std::iter::once(Action::from(*first))
        .chain(
            line.iter()
                .tuple_windows()
                .filter_map(|(prev, cur)| (*prev == separator).then_some(Action::from(*cur))),
        )
        .collect()
}

///
/// Import a [`TraceStore`] from a buffered reader with one trace per line
///
pub fn import_text_log<R: BufRead>(
    mut reader: R,
    options: TextImportOptions,
) -> Result<TraceStore> {
    let mut store = match options.max_distinct_traces {
        Some(limit) => TraceStore::with_capacity_limit(limit),
        None => TraceStore::new(),
    };
    let mut buf: Vec<u8> = Vec::new();
    let mut lines_read: usize = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let actions = parse_trace_line(line, options.separator);
        if actions.is_empty() {
            if options.stop_at_empty_line {
                break;
            }
            continue;
        }
        store.insert(actions)?;
        lines_read += 1;
    }
    tracing::debug!(
        lines_read,
        distinct_traces = store.distinct_traces(),
        "imported text log"
    );
    Ok(store)
}

///
/// Import a [`TraceStore`] from a file path
///
/// Files ending with `.gz` are decompressed while reading.
///
pub fn import_text_log_file<P: AsRef<Path>>(
    path: P,
    options: TextImportOptions,
) -> Result<TraceStore> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        let dec = GzDecoder::new(BufReader::new(file));
        import_text_log(BufReader::new(dec), options)
    } else {
        import_text_log(BufReader::new(file), options)
    }
}

///
/// Import a [`TraceStore`] directly from a string
///
pub fn import_text_log_str(log: &str, options: TextImportOptions) -> Result<TraceStore> {
    import_text_log(log.as_bytes(), options)
}

///
/// Import a [`TraceStore`] from a byte slice (&\[u8\])
///
/// * `is_compressed_gz`: Parse the passed `data` as a compressed .gz archive
///
pub fn import_text_log_slice(
    data: &[u8],
    is_compressed_gz: bool,
    options: TextImportOptions,
) -> Result<TraceStore> {
    if is_compressed_gz {
        let gz: GzDecoder<&[u8]> = GzDecoder::new(data);
        return import_text_log(BufReader::new(gz), options);
    }
    import_text_log(data, options)
}
