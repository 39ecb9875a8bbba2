use indexmap::IndexSet;
use minijinja::{Environment, context};
use ngsg_core::ir::imports::referenced_names;
use ngsg_core::ir::{MethodDefinition, ServiceDefinition};
use ngsg_core::transform::name_normalizer::first_char_to_lower;

use super::finish;
use super::service::service_class;

/// `petgetPetByIdResolve` for method `getPetById` of tag `pet`. The method
/// name is appended as is.
pub fn resolve_class(service: &ServiceDefinition, method: &MethodDefinition) -> String {
    format!("{}{}Resolve", service.identifier, method.name)
}

/// File stem under `resolves/`.
pub fn resolve_module(service: &ServiceDefinition, method: &MethodDefinition) -> String {
    first_char_to_lower(&resolve_class(service, method))
}

/// Render a route resolver that calls one service method, taking each
/// argument from route data, then route params, then query params.
pub fn emit_resolve(
    env: &Environment<'_>,
    service: &ServiceDefinition,
    method: &MethodDefinition,
    known: &IndexSet<String>,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("resolve.ts.j2")?;

    let arguments: Vec<&str> = method
        .ordered_parameters()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    let imports = referenced_names([method.return_type.as_str()], known, None);

    let rendered = tmpl.render(context! {
        class_name => resolve_class(service, method),
        service_class => service_class(service),
        method_name => first_char_to_lower(&method.name),
        return_type => method.return_type.clone(),
        imports => imports,
        arguments => arguments,
    })?;
    Ok(finish(&rendered))
}
