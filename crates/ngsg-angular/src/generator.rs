use log::debug;
use ngsg_core::config::{NgsgConfig, NullBody};
use ngsg_core::ir::ApiIr;
use ngsg_core::transform::name_normalizer::first_char_to_lower;
use ngsg_core::{CodeGenerator, GeneratedFile};

use crate::emitters::{self, model, module, resolve, service};
use crate::error::EmitError;

/// Options for the Angular target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngularOptions {
    /// NgModule name without the `Module` suffix.
    pub module_name: String,
    pub resolves: bool,
    pub null_body: NullBody,
}

impl Default for AngularOptions {
    fn default() -> Self {
        Self {
            module_name: "Api".to_string(),
            resolves: false,
            null_body: NullBody::Emit,
        }
    }
}

impl From<&NgsgConfig> for AngularOptions {
    fn from(config: &NgsgConfig) -> Self {
        Self {
            module_name: config.module.clone(),
            resolves: config.resolves,
            null_body: config.null_body,
        }
    }
}

/// Angular `HttpClient` service generator.
pub struct AngularGenerator;

impl CodeGenerator for AngularGenerator {
    type Config = AngularOptions;
    type Error = EmitError;

    fn generate(
        &self,
        ir: &ApiIr,
        options: &AngularOptions,
    ) -> Result<Vec<GeneratedFile>, EmitError> {
        let env = emitters::environment()?;
        let known = ir.type_names();
        let mut files = Vec::new();

        for ty in &ir.types {
            debug!("emitting model {}", ty.name);
            files.push(GeneratedFile {
                path: format!("models/{}.ts", ty.name),
                content: model::emit_model(&env, ty, &known)?,
            });
        }
        let model_exports: Vec<String> = ir
            .types
            .iter()
            .map(|t| first_char_to_lower(&t.name))
            .collect();
        files.push(GeneratedFile {
            path: "models/index.ts".to_string(),
            content: module::emit_index(&env, &model_exports)?,
        });

        for svc in &ir.services {
            debug!("emitting service {}", svc.name);
            files.push(GeneratedFile {
                path: format!("services/{}.ts", service::service_module(svc)),
                content: service::emit_service(&env, svc, &known, options.null_body)?,
            });
        }
        let service_exports: Vec<String> = ir.services.iter().map(service::service_module).collect();
        files.push(GeneratedFile {
            path: "services/index.ts".to_string(),
            content: module::emit_index(&env, &service_exports)?,
        });

        let mut resolve_classes = Vec::new();
        if options.resolves {
            let mut resolve_exports = Vec::new();
            for svc in &ir.services {
                for method in &svc.methods {
                    let stem = resolve::resolve_module(svc, method);
                    files.push(GeneratedFile {
                        path: format!("resolves/{stem}.ts"),
                        content: resolve::emit_resolve(&env, svc, method, &known)?,
                    });
                    resolve_exports.push(stem);
                    resolve_classes.push(resolve::resolve_class(svc, method));
                }
            }
            files.push(GeneratedFile {
                path: "resolves/index.ts".to_string(),
                content: module::emit_index(&env, &resolve_exports)?,
            });
        }

        let module_stem = format!("{}.module", first_char_to_lower(&options.module_name));
        let service_classes: Vec<String> = ir.services.iter().map(service::service_class).collect();
        files.push(GeneratedFile {
            path: format!("{module_stem}.ts"),
            content: module::emit_module(
                &env,
                &options.module_name,
                &service_classes,
                &resolve_classes,
            )?,
        });

        let mut root_exports = vec!["models".to_string(), "services".to_string()];
        if options.resolves {
            root_exports.push("resolves".to_string());
        }
        root_exports.push(module_stem);
        files.push(GeneratedFile {
            path: "index.ts".to_string(),
            content: module::emit_index(&env, &root_exports)?,
        });

        Ok(files)
    }
}
