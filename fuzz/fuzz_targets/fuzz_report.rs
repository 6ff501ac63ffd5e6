#![no_main]

//! Arbitrary descriptions and messages must yield bounded UTF-8 report lines.

use annotated_errors::{ErrorReport, MAX_FIELD_OUTPUT_LEN, with_human_message, with_tags};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut mid = text.len() / 2;
    while !text.is_char_boundary(mid) {
        mid -= 1;
    }
    let (description, message) = text.split_at(mid);
    let root: annotated_errors::BoxError = description.to_string().into();

    let err = with_human_message(
        with_tags(Some(root), [message.to_string(), description.to_string()]),
        message.to_string(),
    );

    if let Some(report) = ErrorReport::new(err.as_ref()) {
        let mut line = String::new();
        let _ = report.write_to(&mut line);
        assert!(line.len() <= 4 * MAX_FIELD_OUTPUT_LEN + 64);
    }
});
