pub mod test_utils {
    use std::path::PathBuf;

    use crate::{
        event_log::{action::Action, trace_store_struct::TraceStore},
        import_text_log_str, TextImportOptions,
    };

    pub fn get_test_data_path() -> PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data")
    }

    /// Build a [`TraceStore`] from comma-separated lines (e.g., `"a,b,c\na,c,b"`)
    pub fn store_from_lines(log: &str) -> TraceStore {
        import_text_log_str(log, TextImportOptions::default()).unwrap()
    }

    pub fn act(c: char) -> Action {
        Action::from(c)
    }
}
