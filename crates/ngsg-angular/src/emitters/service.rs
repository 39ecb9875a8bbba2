use indexmap::IndexSet;
use minijinja::{Environment, context};
use ngsg_core::config::NullBody;
use ngsg_core::ir::ServiceDefinition;
use ngsg_core::ir::imports::referenced_names;
use ngsg_core::transform::name_normalizer::first_char_to_lower;

use super::method::render_method;
use super::{finish, indent};

/// `petService` for tag `pet`.
pub fn service_class(service: &ServiceDefinition) -> String {
    format!("{}Service", service.identifier)
}

/// File stem under `services/`, e.g. `pet.service`.
pub fn service_module(service: &ServiceDefinition) -> String {
    format!("{}.service", first_char_to_lower(&service.identifier))
}

/// Render `services/<tag>.service.ts`: one injectable class per tag.
pub fn emit_service(
    env: &Environment<'_>,
    service: &ServiceDefinition,
    known: &IndexSet<String>,
    null_body: NullBody,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("service.ts.j2")?;

    let imports = referenced_names(service.referenced_types(), known, None);
    let methods: Vec<String> = service
        .methods
        .iter()
        .map(|m| indent(&render_method(m, null_body), 1))
        .collect();

    let rendered = tmpl.render(context! {
        class_name => service_class(service),
        imports => imports,
        methods => methods,
    })?;
    Ok(finish(&rendered))
}
