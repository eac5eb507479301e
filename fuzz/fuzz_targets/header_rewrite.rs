#![no_main]

use compdb_filter::excludes::ExclusionFragment;
use compdb_filter::rewrite::HeaderRewriter;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(command) = std::str::from_utf8(data) {
        let excludes = [
            ExclusionFragment::from_segments(&["vendor"]),
            ExclusionFragment::from_segments(&["third_party", "fmt"]),
        ];
        let rewriter = HeaderRewriter::new(&excludes, Path::new("/proj"));

        // A rewritten command must be a fixed point
        if let Some(once) = rewriter.rewrite_command(command) {
            assert!(rewriter.rewrite_command(&once).is_none());
        }

        let arguments: Vec<&str> = command.split_whitespace().collect();
        if let Some(once) = rewriter.rewrite_arguments(&arguments) {
            let once: Vec<&str> = once.iter().map(String::as_str).collect();
            assert!(rewriter.rewrite_arguments(&once).is_none());
        }
    }
});
