//! Snippet highlighting.
//!
//! The service marks matched words with `<hlword>` inside titles, headlines
//! and passages. [`highlight`] turns those into `<strong>` and drops any
//! other markup. Text stays XML-escaped.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Signature of a highlight transform applied to raw snippet markup.
pub type Highlighter = fn(&str) -> String;

static TAG: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z_][\w.:-]*)[^>]*>").expect("tag pattern is valid")
    })
}

/// Replaces `<hlword>` markup with `<strong>` and strips other tags.
pub fn highlight(raw: &str) -> String {
    tag_regex()
        .replace_all(raw, |caps: &Captures<'_>| {
            if &caps[2] == "hlword" {
                if caps[1].is_empty() && !caps[0].ends_with("/>") {
                    "<strong>".to_string()
                } else if !caps[1].is_empty() {
                    "</strong>".to_string()
                } else {
                    String::new()
                }
            } else {
                String::new()
            }
        })
        .into_owned()
}
