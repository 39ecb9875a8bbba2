use heck::{ToLowerCamelCase, ToPascalCase};

use crate::ir::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: guard_leading_digit(sanitized.to_pascal_case()),
        camel_case: guard_leading_digit(sanitized.to_lower_camel_case()),
    }
}

/// Case conversion drops a leading `_`, so digits are guarded again after it.
fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Lowercase only the first character; the rest is kept as written.
/// e.g. "GetPetById" → "getPetById", "PET" → "pET"
pub fn first_char_to_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}

/// Whether `s` can be used as a TypeScript identifier as-is.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Derive a camelCase method name from HTTP method + path, used when an
/// operation has no operationId.
///
/// Examples:
/// - `GET /users` → `listUsers`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `PUT /users/{userId}` → `updateUser`
/// - `DELETE /users/{userId}` → `deleteUser`
pub fn route_to_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut resource_parts: Vec<String> = Vec::new();
    let mut ends_with_param = false;

    for seg in &segments {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg.to_string());
            ends_with_param = false;
        }
    }

    let method_lower = method.to_lowercase();
    let prefix = match method_lower.as_str() {
        "get" if ends_with_param => "get",
        "get" => "list",
        "post" => "create",
        "put" => "update",
        "delete" => "delete",
        "patch" => "patch",
        "options" => "options",
        "head" => "head",
        other => other,
    };

    if resource_parts.is_empty() {
        return prefix.to_string();
    }

    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&sanitize_identifier(&word).to_pascal_case());
    }

    format!("{prefix}{pascal_parts}")
}

/// Naive singularization: strips trailing 's' if present.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let n = normalize_name("listModels");
        assert_eq!(n.pascal_case, "ListModels");
        assert_eq!(n.camel_case, "listModels");
    }

    #[test]
    fn test_spaced_tag() {
        let n = normalize_name("pet store");
        assert_eq!(n.pascal_case, "PetStore");
        assert_eq!(n.camel_case, "petStore");
    }

    #[test]
    fn test_leading_digit_is_guarded() {
        let n = normalize_name("2fa-code");
        assert_eq!(n.camel_case, "_2faCode");
        assert_eq!(n.pascal_case, "_2faCode");
        assert!(is_identifier(&n.camel_case));
        assert_eq!(normalize_name("3d models").pascal_case, "_3dModels");
    }

    #[test]
    fn test_first_char_to_lower() {
        assert_eq!(first_char_to_lower("GetPetById"), "getPetById");
        assert_eq!(first_char_to_lower("getPetById"), "getPetById");
        assert_eq!(first_char_to_lower("Api"), "api");
        assert_eq!(first_char_to_lower(""), "");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("pet"));
        assert!(is_identifier("_private$1"));
        assert!(!is_identifier("pet store"));
        assert!(!is_identifier("3d"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_route_to_name_list() {
        assert_eq!(route_to_name("get", "/users"), "listUsers");
    }

    #[test]
    fn test_route_to_name_get_single() {
        assert_eq!(route_to_name("get", "/users/{userId}"), "getUser");
    }

    #[test]
    fn test_route_to_name_nested_single() {
        assert_eq!(
            route_to_name("GET", "/users/{userId}/messages/{messageId}"),
            "getUsersMessage"
        );
    }

    #[test]
    fn test_route_to_name_hyphenated() {
        assert_eq!(route_to_name("post", "/pet-owners"), "createPetOwners");
    }
}
