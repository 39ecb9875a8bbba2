use ngsg_core::config::NullBody;
use ngsg_core::ir::{MethodDefinition, ParameterKind};
use ngsg_core::transform::escape_single_quoted;
use ngsg_core::transform::name_normalizer::first_char_to_lower;

use super::doc_lines;
use super::parameter::ParameterModel;

const INDENT: &str = "    ";

/// Element types that `FormData.append` accepts as-is.
const BLOB_TYPES: [&str; 3] = ["File", "Blob", "any"];

/// Line buffer with a current indentation depth.
#[derive(Debug, Default)]
struct CodeWriter {
    lines: Vec<String>,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(self.depth), text.as_ref()));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render one operation as a method of an `HttpClient`-backed service class.
///
/// The result is unindented and has no trailing newline.
pub fn render_method(method: &MethodDefinition, null_body: NullBody) -> String {
    let params: Vec<ParameterModel<'_>> = method
        .ordered_parameters()
        .into_iter()
        .map(ParameterModel::new)
        .collect();
    let of_kind = |kind: ParameterKind| {
        params
            .iter()
            .filter(move |p| p.definition.kind == kind)
            .copied()
    };

    let mut w = CodeWriter::default();
    write_doc(&mut w, method, &params);
    write_signature(&mut w, method, &params);
    w.depth += 1;

    let mutable_url = method.has_kind(ParameterKind::Path) || method.has_kind(ParameterKind::Query);
    w.line(format!(
        "{} url = '{}';",
        if mutable_url { "let" } else { "const" },
        escape_single_quoted(&method.url)
    ));

    for p in of_kind(ParameterKind::Path) {
        w.line(format!(
            "url = url.replace('{{{}}}', {}.toString());",
            escape_single_quoted(p.name()),
            p.variable()
        ));
    }

    if method.has_kind(ParameterKind::Query) {
        w.blank();
        w.line("const queryList: string[] = [];");
        for p in of_kind(ParameterKind::Query) {
            let var = p.variable();
            w.open(format!("if ({var} !== null && {var} !== undefined) {{"));
            if p.definition.is_array() {
                w.open(format!("for (const item of {var}) {{"));
                w.open("if (item !== null && item !== undefined) {");
                w.line(query_push(p.name(), "item"));
                w.close("}");
                w.close("}");
            } else {
                w.line(query_push(p.name(), &var));
            }
            w.close("}");
        }
        w.open("if (queryList.length > 0) {");
        w.line("url += '?' + queryList.join('&');");
        w.close("}");
    }

    let form_params: Vec<ParameterModel<'_>> = of_kind(ParameterKind::FormData).collect();
    if !form_params.is_empty() {
        w.blank();
        w.line("const formData = new FormData();");
        for p in &form_params {
            let var = p.variable();
            let element_type = p.definition.type_expr.trim_end_matches("[]");
            w.open(format!("if ({var} !== null && {var} !== undefined) {{"));
            if p.definition.is_array() {
                w.open(format!("for (const item of {var}) {{"));
                w.line(form_append(p.name(), "item", element_type));
                w.close("}");
            } else {
                w.line(form_append(p.name(), &var, element_type));
            }
            w.close("}");
        }
    }

    let body = if !form_params.is_empty() {
        Some("formData".to_string())
    } else if let Some(p) = of_kind(ParameterKind::Body).next() {
        Some(p.variable())
    } else if method.http_method.requires_body() && null_body == NullBody::Emit {
        Some("null".to_string())
    } else {
        None
    };

    w.blank();
    w.line(format!(
        "return this.http.{}<{}>(url{});",
        method.http_method.as_str(),
        method.return_type,
        body.map(|b| format!(", {b}")).unwrap_or_default()
    ));

    w.close("}");
    w.finish()
}

fn write_doc(w: &mut CodeWriter, method: &MethodDefinition, params: &[ParameterModel<'_>]) {
    let has_param_docs = params.iter().any(|p| p.definition.description.is_some());
    if method.description.is_none() && !has_param_docs {
        return;
    }

    w.line("/**");
    for line in doc_lines(method.description.as_deref()) {
        w.line(format!(" * {line}"));
    }
    for p in params {
        let text = doc_lines(p.definition.description.as_deref()).join(" ");
        let text = if text.is_empty() { p.variable() } else { text };
        w.line(format!(" * @param {} {text}", p.variable()));
    }
    w.line(" */");
}

fn write_signature(w: &mut CodeWriter, method: &MethodDefinition, params: &[ParameterModel<'_>]) {
    let name = first_char_to_lower(&method.name);
    let returns = format!("): Observable<{}> {{", method.return_type);

    if params.is_empty() {
        w.line(format!("{name}({returns}"));
        return;
    }

    w.line(format!("{name}("));
    w.depth += 1;
    for (i, p) in params.iter().enumerate() {
        let separator = if i + 1 < params.len() { "," } else { "" };
        w.line(format!("{}{separator}", p.token()));
    }
    w.depth -= 1;
    w.line(returns);
}

fn query_push(name: &str, value: &str) -> String {
    format!(
        "queryList.push('{}=' + encodeURIComponent({value}.toString()));",
        escape_single_quoted(name)
    )
}

fn form_append(name: &str, value: &str, element_type: &str) -> String {
    if BLOB_TYPES.contains(&element_type) {
        format!("formData.append('{}', {value});", escape_single_quoted(name))
    } else {
        format!("formData.append('{}', {value}.toString());", escape_single_quoted(name))
    }
}

#[cfg(test)]
mod tests {
    use ngsg_core::ir::{HttpMethod, ParameterDefinition};
    use serde_json::json;

    use super::*;

    fn param(name: &str, kind: ParameterKind, type_expr: &str, optional: bool) -> ParameterDefinition {
        ParameterDefinition {
            name: name.to_string(),
            kind,
            type_expr: type_expr.to_string(),
            is_optional: optional,
            default_value: None,
            description: None,
        }
    }

    fn method(http_method: HttpMethod, url: &str, parameters: Vec<ParameterDefinition>) -> MethodDefinition {
        MethodDefinition {
            tag: "pet".to_string(),
            http_method,
            url: url.to_string(),
            name: "DoThing".to_string(),
            description: None,
            return_type: "Pet".to_string(),
            is_form_data: false,
            parameters,
        }
    }

    #[test]
    fn test_path_parameter() {
        let mut m = method(
            HttpMethod::Get,
            "/pet/{petId}",
            vec![param("petId", ParameterKind::Path, "number", false)],
        );
        m.description = Some("Find pet by ID\nReturns a single pet".to_string());
        insta::assert_snapshot!(render_method(&m, NullBody::Emit), @r"
        /**
         * Find pet by ID
         * Returns a single pet
         * @param petId petId
         */
        doThing(
            petId: number
        ): Observable<Pet> {
            let url = '/pet/{petId}';
            url = url.replace('{petId}', petId.toString());

            return this.http.get<Pet>(url);
        }
        ");
    }

    #[test]
    fn test_query_parameters() {
        let m = method(
            HttpMethod::Get,
            "/pet/findByStatus",
            vec![
                param("status", ParameterKind::Query, "('available' | 'sold')[]", false),
                param("limit", ParameterKind::Query, "number", true),
            ],
        );
        insta::assert_snapshot!(render_method(&m, NullBody::Emit), @r"
        doThing(
            status: ('available' | 'sold')[],
            limit?: number
        ): Observable<Pet> {
            let url = '/pet/findByStatus';

            const queryList: string[] = [];
            if (status !== null && status !== undefined) {
                for (const item of status) {
                    if (item !== null && item !== undefined) {
                        queryList.push('status=' + encodeURIComponent(item.toString()));
                    }
                }
            }
            if (limit !== null && limit !== undefined) {
                queryList.push('limit=' + encodeURIComponent(limit.toString()));
            }
            if (queryList.length > 0) {
                url += '?' + queryList.join('&');
            }

            return this.http.get<Pet>(url);
        }
        ");
    }

    #[test]
    fn test_query_suffix_is_guarded() {
        let m = method(
            HttpMethod::Get,
            "/pets",
            vec![param("tag", ParameterKind::Query, "string", true)],
        );
        let out = render_method(&m, NullBody::Emit);
        let lines: Vec<&str> = out.lines().map(str::trim).collect();
        let append = lines
            .iter()
            .position(|l| l.starts_with("url += '?'"))
            .unwrap();
        assert_eq!(lines[append - 1], "if (queryList.length > 0) {");
        assert_eq!(out.matches("url += '?'").count(), 1);
        assert!(!out.contains("'/pets?"));
    }

    #[test]
    fn test_parameters_do_not_shadow_locals() {
        let m = method(
            HttpMethod::Get,
            "/a",
            vec![
                param("url", ParameterKind::Query, "string", false),
                param("delete", ParameterKind::Query, "boolean", true),
            ],
        );
        insta::assert_snapshot!(render_method(&m, NullBody::Emit), @r"
        doThing(
            url_: string,
            delete_?: boolean
        ): Observable<Pet> {
            let url = '/a';

            const queryList: string[] = [];
            if (url_ !== null && url_ !== undefined) {
                queryList.push('url=' + encodeURIComponent(url_.toString()));
            }
            if (delete_ !== null && delete_ !== undefined) {
                queryList.push('delete=' + encodeURIComponent(delete_.toString()));
            }
            if (queryList.length > 0) {
                url += '?' + queryList.join('&');
            }

            return this.http.get<Pet>(url);
        }
        ");
    }

    #[test]
    fn test_form_data_wins_over_body() {
        let mut m = method(
            HttpMethod::Post,
            "/pet/{petId}/uploadImage",
            vec![
                param("body", ParameterKind::Body, "Pet", false),
                param("file", ParameterKind::FormData, "File[]", true),
                param("note", ParameterKind::FormData, "string", true),
            ],
        );
        m.is_form_data = true;
        let out = render_method(&m, NullBody::Emit);
        assert!(out.contains("return this.http.post<Pet>(url, formData);"));
        assert!(!out.contains("(url, body)"));
        assert!(out.contains("formData.append('file', item);"));
        assert!(out.contains("formData.append('note', note.toString());"));
        assert!(out.starts_with("doThing(\n    body: Pet,\n    file?: File[],"));
    }

    #[test]
    fn test_body_dispatch() {
        let m = method(
            HttpMethod::Put,
            "/pet",
            vec![param("pet", ParameterKind::Body, "Pet", false)],
        );
        let out = render_method(&m, NullBody::Omit);
        assert!(out.contains("const url = '/pet';"));
        assert!(out.contains("return this.http.put<Pet>(url, pet);"));
    }

    #[test]
    fn test_null_body() {
        let m = method(HttpMethod::Post, "/logout", vec![]);
        assert!(render_method(&m, NullBody::Emit).contains("this.http.post<Pet>(url, null);"));
        assert!(render_method(&m, NullBody::Omit).contains("this.http.post<Pet>(url);"));

        let get = method(HttpMethod::Get, "/logout", vec![]);
        assert!(render_method(&get, NullBody::Emit).contains("this.http.get<Pet>(url);"));
    }

    #[test]
    fn test_no_parameters() {
        let m = method(HttpMethod::Delete, "/cache", vec![]);
        insta::assert_snapshot!(render_method(&m, NullBody::Emit), @r"
        doThing(): Observable<Pet> {
            const url = '/cache';

            return this.http.delete<Pet>(url);
        }
        ");
    }

    #[test]
    fn test_parameter_order_and_docs() {
        let mut p1 = param("p1", ParameterKind::Query, "number", true);
        p1.description = Some("First".to_string());
        let p2 = param("p2", ParameterKind::Query, "number", false);
        let mut p3 = param("p3", ParameterKind::Query, "number", true);
        p3.default_value = Some(json!(5));
        let m = method(HttpMethod::Get, "/", vec![p1, p2, p3]);

        let out = render_method(&m, NullBody::Emit);
        assert!(out.starts_with(
            "/**\n * @param p2 p2\n * @param p1 First\n * @param p3 p3\n */\ndoThing(\n    p2: number,\n    p1?: number,\n    p3: number = 5\n)"
        ));
    }
}
