pub mod method;
pub mod model;
pub mod module;
pub mod parameter;
pub mod resolve;
pub mod service;

use minijinja::{AutoEscape, Environment};

const TEMPLATES: [(&str, &str); 5] = [
    ("model.ts.j2", include_str!("../../templates/model.ts.j2")),
    ("service.ts.j2", include_str!("../../templates/service.ts.j2")),
    ("resolve.ts.j2", include_str!("../../templates/resolve.ts.j2")),
    ("module.ts.j2", include_str!("../../templates/module.ts.j2")),
    ("index.ts.j2", include_str!("../../templates/index.ts.j2")),
];

/// Template environment with every file shape registered.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

/// Split a description into JSDoc lines.
pub fn doc_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.lines().map(|line| escape_jsdoc(line.trim_end())).collect())
        .unwrap_or_default()
}

/// Prefix every non-empty line with `levels` four-space indents.
pub fn indent(text: &str, levels: usize) -> String {
    let pad = "    ".repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing whitespace from every line and end with exactly one `\n`.
pub fn finish(text: &str) -> String {
    let mut out = text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_loads_templates() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_doc_lines_escape_comment_close() {
        assert_eq!(
            doc_lines(Some("first */ line\r\nsecond  ")),
            ["first *\\/ line", "second"]
        );
        assert!(doc_lines(None).is_empty());
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\n  b", 1), "    a\n\n      b");
    }

    #[test]
    fn test_finish() {
        assert_eq!(finish("a  \r\nb\t\n\n\n"), "a\nb\n");
    }
}
