use indexmap::IndexSet;
use minijinja::{Environment, context};
use ngsg_core::ir::imports::referenced_names;
use ngsg_core::ir::{TypeDefinition, TypeShape};
use ngsg_core::transform::escape_single_quoted;
use ngsg_core::transform::name_normalizer::is_identifier;

use super::{doc_lines, finish};

/// Render `models/<Name>.ts` for one type definition.
pub fn emit_model(
    env: &Environment<'_>,
    ty: &TypeDefinition,
    known: &IndexSet<String>,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("model.ts.j2")?;

    let imports = referenced_names(ty.referenced_types(), known, Some(&ty.name));
    let alias = match &ty.shape {
        TypeShape::Alias(target) => Some(target.clone()),
        TypeShape::Interface => None,
    };
    let properties: Vec<minijinja::Value> = ty
        .properties
        .iter()
        .map(|p| {
            context! {
                name => property_key(&p.name),
                doc => doc_lines(p.description.as_deref()),
                type_expr => p.type_expr.clone(),
                required => p.required,
            }
        })
        .collect();

    let rendered = tmpl.render(context! {
        name => ty.name.clone(),
        doc => doc_lines(ty.description.as_deref()),
        imports => imports,
        supertypes => ty.extends.clone(),
        alias => alias,
        properties => properties,
    })?;
    Ok(finish(&rendered))
}

/// Property names that are not identifiers are quoted.
fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", escape_single_quoted(name))
    }
}
