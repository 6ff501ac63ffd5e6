#![no_main]

//! Builds a chain from raw bytes and runs every extractor over it.

use annotated_errors::{
    BoxError, Named, Tags, WithErrorCode, WithHttpStatus, WithHumanMessage, WithTags,
    error_code, http_status, human_message, is_any_cause_named, is_root_cause_named, tag_map,
    tags,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut err: BoxError = String::from_utf8_lossy(data).into_owned().into();

    for chunk in data.chunks(3) {
        let value = chunk.iter().fold(0i64, |acc, b| (acc << 8) | i64::from(*b));
        err = match chunk[0] % 5 {
            0 => Box::new(WithHumanMessage::new(err, format!("m{value}"))),
            1 => Box::new(WithErrorCode::new(err, value)),
            2 => Box::new(WithHttpStatus::new(err, value as u16)),
            3 => {
                // odd lengths exercise the unbalanced-tag path
                let list: Tags = chunk.iter().map(|b| i64::from(*b)).collect();
                Box::new(WithTags::new(err, list))
            }
            _ => Box::new(Named::new(err, format!("N{}", chunk[0]), tags!["k", value])),
        };
    }

    let _ = human_message(err.as_ref());
    let _ = error_code(err.as_ref());
    let _ = http_status(err.as_ref());
    let _ = tag_map(err.as_ref()).to_string();
    let _ = is_any_cause_named(err.as_ref(), "N0");
    let _ = is_root_cause_named(err.as_ref(), "N0");
    let _ = format!("{err:#}");
});
