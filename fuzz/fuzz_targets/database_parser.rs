#![no_main]

use compdb_filter::compdb::CompilationDatabase;
use compdb_filter::excludes::ExclusionFragment;
use compdb_filter::partition::partition_entries;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing must reject bad input with an error, never a panic
        if let Ok(database) = CompilationDatabase::from_json(text, Path::new("fuzz.json")) {
            let total = database.len();
            let excludes = [ExclusionFragment::from_segments(&["vendor"])];
            let partition = partition_entries(database.entries, &excludes, Path::new("/proj"));
            assert_eq!(partition.total(), total);
        }
    }
});
