use serde::Serialize;

use crate::error::Result;
use crate::verifier::Response;

use super::{OutputFormatter, distinct_roots};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    summary: Summary,
    matches: Vec<MatchRecord>,
}

#[derive(Serialize)]
struct Summary {
    matches: usize,
    roots: usize,
}

#[derive(Serialize)]
struct MatchRecord {
    structure: String,
    root: String,
    anchor: String,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, matches: &[Response<'_>]) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                matches: matches.len(),
                roots: distinct_roots(matches),
            },
            matches: matches.iter().map(convert_match).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_match(response: &Response<'_>) -> MatchRecord {
    MatchRecord {
        structure: response.structure.name().to_string(),
        root: response.root.display().to_string(),
        anchor: response.anchor.display().to_string(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
