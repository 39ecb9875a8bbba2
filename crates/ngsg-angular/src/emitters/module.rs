use minijinja::{Environment, context};

use super::finish;

/// Render `<module>.module.ts`, providing every service and resolver.
pub fn emit_module(
    env: &Environment<'_>,
    module_name: &str,
    services: &[String],
    resolves: &[String],
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("module.ts.j2")?;
    let providers: Vec<&String> = services.iter().chain(resolves).collect();

    let rendered = tmpl.render(context! {
        module_name => module_name,
        services => services,
        resolves => resolves,
        providers => providers,
    })?;
    Ok(finish(&rendered))
}

/// Render a barrel file re-exporting each relative module.
pub fn emit_index<S: AsRef<str>>(
    env: &Environment<'_>,
    exports: &[S],
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("index.ts.j2")?;
    let exports: Vec<&str> = exports.iter().map(AsRef::as_ref).collect();
    let rendered = tmpl.render(context! { exports => exports })?;
    Ok(finish(&rendered))
}
