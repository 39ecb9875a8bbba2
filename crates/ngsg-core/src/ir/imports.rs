use indexmap::IndexSet;

/// Characters that separate identifiers inside a type expression.
const TYPE_PUNCTUATION: &[char] = &[',', '|', ' ', '(', ')', '[', ']', '&'];

/// Known type names referenced by `exprs`, in first-appearance order.
///
/// Each expression is split on structural punctuation and whitespace; the
/// tokens are intersected with `known`. `own_name` is never returned.
pub fn referenced_names<'a>(
    exprs: impl IntoIterator<Item = &'a str>,
    known: &IndexSet<String>,
    own_name: Option<&str>,
) -> Vec<String> {
    let mut found: IndexSet<&str> = IndexSet::new();
    for expr in exprs {
        for token in expr.split(TYPE_PUNCTUATION).filter(|t| !t.is_empty()) {
            if Some(token) != own_name && known.contains(token) {
                found.insert(token);
            }
        }
    }
    found.into_iter().map(String::from).collect()
}
