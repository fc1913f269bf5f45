//! Built-in snippets shipped with every repository.
//!
//! Built-ins are re-synthesized identically on every `initialize` and are
//! never persisted; [`BUILTIN_IDS`] is the single canonical id list used both
//! for registration and for the custom/built-in persistence partition.

use chrono::{DateTime, Utc};

use crate::snippet::Snippet;

/// Ids of the built-in snippets. Stable across versions.
pub const BUILTIN_IDS: [&str; 5] = [
    "js-function",
    "py-class",
    "md-code-block",
    "md-table",
    "note-template",
];

/// Whether an id belongs to the built-in set.
pub fn is_builtin(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

/// The fixed built-in snippet set, timestamped at `now` (process start).
///
/// `usage_count` starts at 0 for every entry.
pub fn builtins(now: DateTime<Utc>) -> Vec<Snippet> {
    let make = |id: &str,
                name: &str,
                prefix: &str,
                body: &[&str],
                description: &str,
                scope: &[&str]| Snippet {
        id: id.to_string(),
        name: name.to_string(),
        prefixes: vec![prefix.to_string()],
        body: body.iter().map(|s| s.to_string()).collect(),
        description: Some(description.to_string()),
        scope: scope.iter().map(|s| s.to_string()).collect(),
        created_at: now,
        updated_at: now,
        usage_count: 0,
    };

    vec![
        make(
            "js-function",
            "JavaScript Function",
            "func",
            &[
                "function ${1:functionName}(${2:parameters}) {",
                "\t${3:// TODO: implement}",
                "\treturn ${4:undefined};",
                "}",
            ],
            "Create a JavaScript function",
            &["javascript", "typescript"],
        ),
        make(
            "py-class",
            "Python Class",
            "class",
            &[
                "class ${1:ClassName}:",
                "\t\"\"\"${2:Class description}\"\"\"",
                "\t",
                "\tdef __init__(self${3:, parameters}):",
                "\t\t\"\"\"${4:Constructor description}\"\"\"",
                "\t\t${5:pass}",
            ],
            "Create a Python class",
            &["python"],
        ),
        make(
            "md-code-block",
            "Markdown Code Block",
            "code",
            &["```${1:language}", "${2:// your code here}", "```"],
            "Create a markdown code block",
            &["markdown"],
        ),
        make(
            "md-table",
            "Markdown Table",
            "table",
            &[
                "| ${1:Header 1} | ${2:Header 2} | ${3:Header 3} |",
                "|--------------|--------------|--------------|",
                "| ${4:Cell 1}   | ${5:Cell 2}   | ${6:Cell 3}   |",
                "| ${7:Cell 4}   | ${8:Cell 5}   | ${9:Cell 6}   |",
            ],
            "Create a markdown table",
            &["markdown"],
        ),
        make(
            "note-template",
            "Note Template",
            "note",
            &[
                "# ${1:Note Title}",
                "",
                "**Created:** {{date}}",
                "**Tags:** #${2:tag}",
                "",
                "## Summary",
                "${3:Brief summary of the note}",
                "",
                "## Content",
                "${4:Main content goes here}",
                "",
                "## References",
                "- ${5:Reference links or notes}",
            ],
            "Create a note from a template",
            &[],
        ),
    ]
}
