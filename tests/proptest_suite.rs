//! Property-based tests for annotated_errors
//!
//! These tests use proptest to generate random chains and verify the
//! retrieval rules hold.

use annotated_errors::{
    BoxError, ErrorReport, MAX_FIELD_OUTPUT_LEN, TagValue, Tags, UNBALANCED_TAG, error_code,
    http_status, human_message, is_any_cause_named, is_root_cause_named, new_named, tag_map, tags,
    walk, with_error_code, with_http_status, with_human_message, with_tags,
};
use proptest::prelude::*;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
struct Root(String);

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Root {}

/// One annotation step applied while building a chain.
#[derive(Debug, Clone)]
enum Step {
    Message(String),
    Code(i64),
    Status(u16),
    Tag(String, i64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "\\PC{0,20}".prop_map(Step::Message),
        any::<i64>().prop_map(Step::Code),
        any::<u16>().prop_map(Step::Status),
        ("[a-c]", any::<i64>()).prop_map(|(k, v)| Step::Tag(k, v)),
    ]
}

/// Apply steps innermost first; the last step is the outermost link.
fn build(root: &str, steps: &[Step]) -> BoxError {
    let mut err: BoxError = Box::new(Root(root.to_string()));
    for step in steps {
        err = match step.clone() {
            Step::Message(m) => Box::new(annotated_errors::WithHumanMessage::new(err, m)),
            Step::Code(c) => Box::new(annotated_errors::WithErrorCode::new(err, c)),
            Step::Status(s) => Box::new(annotated_errors::WithHttpStatus::new(err, s)),
            Step::Tag(k, v) => Box::new(annotated_errors::WithTags::new(err, tags![k, v])),
        };
    }
    err
}

// ============================================================================
// IDENTITY PROPERTIES
// ============================================================================

proptest! {
    /// An error code attached to a present error is retrieved unchanged
    #[test]
    fn error_code_identity(code in any::<i64>(), root in "\\PC{0,50}") {
        let err = with_error_code(Some(Root(root)), code);
        prop_assert_eq!(error_code(err.as_ref()), code);
    }

    /// An HTTP status attached to a present error is retrieved unchanged
    #[test]
    fn http_status_identity(status in any::<u16>()) {
        let err = with_http_status(Some(Root("x".into())), status);
        prop_assert_eq!(http_status(err.as_ref()), status);
    }

    /// Wrapping an absent error never produces a wrapper
    #[test]
    fn absent_stays_absent(code in any::<i64>(), status in any::<u16>(), message in "\\PC{0,20}") {
        prop_assert!(with_error_code(None::<Root>, code).is_none());
        prop_assert!(with_http_status(None::<Root>, status).is_none());
        prop_assert!(with_human_message(None::<Root>, message).is_none());
    }
}

// ============================================================================
// PRECEDENCE PROPERTIES
// ============================================================================

proptest! {
    /// Singular extractors return the outermost non-zero value
    #[test]
    fn outermost_non_zero_wins(steps in prop::collection::vec(step(), 0..12)) {
        let err = build("root", &steps);

        let expected_code = steps.iter().rev().find_map(|s| match s {
            Step::Code(c) if *c != 0 => Some(*c),
            _ => None,
        }).unwrap_or(0);
        let expected_status = steps.iter().rev().find_map(|s| match s {
            Step::Status(v) if *v != 0 => Some(*v),
            _ => None,
        }).unwrap_or(0);
        let expected_message = steps.iter().rev().find_map(|s| match s {
            Step::Message(m) if !m.is_empty() => Some(m.as_str()),
            _ => None,
        }).unwrap_or("");

        prop_assert_eq!(error_code(err.as_ref()), expected_code);
        prop_assert_eq!(http_status(err.as_ref()), expected_status);
        prop_assert_eq!(human_message(err.as_ref()), expected_message);
    }

    /// Merged tags take the innermost value for each key
    #[test]
    fn tag_map_innermost_wins(steps in prop::collection::vec(step(), 0..12)) {
        let err = build("root", &steps);
        let map = tag_map(err.as_ref());

        for key in ["a", "b", "c"] {
            let expected = steps.iter().find_map(|s| match s {
                Step::Tag(k, v) if k == key => Some(*v),
                _ => None,
            });
            prop_assert_eq!(map.get(key).and_then(TagValue::as_i64), expected);
        }
    }

    /// The tag list keeps every entry
    #[test]
    fn tag_list_keeps_everything(steps in prop::collection::vec(step(), 0..12)) {
        let err = build("root", &steps);
        let tagged = steps.iter().filter(|s| matches!(s, Step::Tag(..))).count();
        prop_assert_eq!(annotated_errors::tags(err.as_ref()).len(), tagged * 2);
    }

    /// Every link is visited exactly once
    #[test]
    fn walk_visits_each_link_once(steps in prop::collection::vec(step(), 0..12)) {
        let err = build("root", &steps);
        let mut visits = 0;
        let found = walk(err.as_ref(), |_| {
            visits += 1;
            false
        });
        prop_assert!(!found);
        prop_assert_eq!(visits, steps.len() + 1);
    }
}

// ============================================================================
// TAG PROPERTIES
// ============================================================================

proptest! {
    /// Odd-length tag lists are padded with the sentinel, never dropped
    #[test]
    fn unbalanced_tags_are_padded(keys in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let list: Tags = keys.iter().cloned().collect();
        let err = with_tags(Some(Root("x".into())), list);
        let map = tag_map(err.as_ref());

        let last = keys.last().unwrap();
        let last_is_unique = keys.iter().filter(|k| *k == last).count() == 1;
        if keys.len() % 2 == 1 && last_is_unique {
            prop_assert_eq!(map.get(last.as_str()), Some(&UNBALANCED_TAG));
        }
        prop_assert!(map.len() <= keys.len().div_ceil(2));
    }

    /// Padding stays within each link when several tag lists are combined
    #[test]
    fn padding_is_per_link(
        outer in prop::collection::vec("[a-z]{1,8}", 1..6),
        inner_value in any::<i64>(),
    ) {
        let inner = with_tags(Some(Root("x".into())), tags!["INNER", inner_value]);
        let outer_list: Tags = outer.iter().cloned().collect();
        let err = with_tags(inner, outer_list);

        let map = tag_map(err.as_ref());
        prop_assert_eq!(map.get("INNER").and_then(TagValue::as_i64), Some(inner_value));

        let report = ErrorReport::new(err.as_ref()).unwrap();
        let mut line = String::new();
        report.write_to(&mut line).unwrap();
        let expected = format!(" INNER='{inner_value}'");
        prop_assert!(line.ends_with(&expected), "{}", line);
        if outer.len() % 2 == 1 {
            let padded = format!(" {}='unbalanced tag'", outer.last().unwrap());
            prop_assert!(line.contains(&padded), "{}", line);
        }
    }
}

// ============================================================================
// NAME PROPERTIES
// ============================================================================

proptest! {
    /// A name on a wrapped link is found as a cause but never as the root
    #[test]
    fn named_link_is_cause_not_root(
        name in "[A-Z_]{1,16}",
        steps in prop::collection::vec(step(), 0..6),
    ) {
        let named = new_named(Some(Root("root".into())), name.clone(), Tags::new())
            .map(|n| Box::new(n) as BoxError);
        let mut err = named.unwrap();
        for s in &steps {
            err = match s.clone() {
                Step::Code(c) => Box::new(annotated_errors::WithErrorCode::new(err, c)),
                _ => Box::new(annotated_errors::WithTags::new(err, tags!["k", "v"])),
            };
        }

        prop_assert!(is_any_cause_named(err.as_ref(), &name));
        prop_assert!(!is_root_cause_named(err.as_ref(), &name));
    }
}

// ============================================================================
// RENDERING AND LOGGING PROPERTIES
// ============================================================================

proptest! {
    /// Rendering ends with the root description and never panics
    #[test]
    fn rendering_ends_with_root(root in "\\PC{0,50}", steps in prop::collection::vec(step(), 0..8)) {
        let err = build(&root, &steps);
        let short = err.to_string();
        prop_assert!(short.ends_with(&root));

        let verbose = format!("{err:#}");
        prop_assert!(verbose.ends_with(&short));
    }

    /// Report output is valid UTF-8 and bounded
    #[test]
    fn report_is_bounded(root in "\\PC{0,5000}", message in "\\PC{0,5000}") {
        let err = with_human_message(Some(Root(root)), message);
        let report = ErrorReport::new(err.as_ref()).unwrap();

        let mut buffer = String::new();
        report.write_to(&mut buffer).unwrap();

        prop_assert!(std::str::from_utf8(buffer.as_bytes()).is_ok());
        prop_assert!(buffer.len() <= 2 * MAX_FIELD_OUTPUT_LEN + 64);
    }
}
