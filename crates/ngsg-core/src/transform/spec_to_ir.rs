use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::TransformError;
use crate::ir::grouping::{UNKNOWN_TAG, group_by_tag};
use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::{CollectionFormat, Parameter, ParameterLocation};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::spec::SwaggerSpec;

use super::name_normalizer::route_to_name;
use super::schema_graph::{SchemaGraph, SchemaId, SchemaKind, SchemaNode};
use super::schema_resolver::{FALLBACK_TYPE, TypeResolver};

/// Media types that make an operation a form submission.
const FORM_MEDIA_TYPES: [&str; 2] = ["multipart/form-data", "application/x-www-form-urlencoded"];

/// Transform a parsed Swagger document into generator-ready definitions.
///
/// Runs in two phases: every schema node (definitions, parameters, response
/// bodies) is interned first, then all types are resolved against the
/// finished graph. Operations that cannot be loaded are skipped.
pub fn transform(spec: &SwaggerSpec) -> ApiIr {
    let mut graph = SchemaGraph::from_definitions(&spec.definitions);
    let pending = intern_operations(spec, &mut graph);

    let resolver = TypeResolver::new(&graph);
    let types = load_types(&resolver);
    let methods = pending
        .into_iter()
        .map(|op| build_method(op, &resolver))
        .collect();

    ApiIr {
        info: IrInfo {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
        },
        types,
        services: group_by_tag(methods),
    }
}

// --- Types ---

/// One type definition per non-enumeration definition, in document order.
fn load_types(resolver: &TypeResolver<'_>) -> Vec<TypeDefinition> {
    let graph = resolver.graph();
    graph
        .definitions()
        .filter(|(_, id)| !graph.is_enumeration_definition(*id))
        .filter_map(|(name, id)| {
            graph
                .node(id)
                .map(|node| build_type(name, id, node, resolver))
        })
        .collect()
}

fn build_type(
    name: &str,
    id: SchemaId,
    node: &SchemaNode,
    resolver: &TypeResolver<'_>,
) -> TypeDefinition {
    let shape = if is_alias(node) {
        TypeShape::Alias(resolver.resolve(id))
    } else {
        TypeShape::Interface
    };

    let mut extends = Vec::new();
    let mut properties = IndexMap::new();
    collect_members(id, resolver, &mut extends, &mut properties);

    TypeDefinition {
        name: name.to_string(),
        description: node.description.clone(),
        extends,
        properties: properties.into_values().collect(),
        shape,
    }
}

/// Arrays, plain scalars and pure unions have no members to declare.
fn is_alias(node: &SchemaNode) -> bool {
    if node.reference.is_some() || !node.properties.is_empty() || !node.all_of.is_empty() {
        return false;
    }
    match node.kind {
        SchemaKind::Array => true,
        kind if kind.is_scalar() => !node.is_enumeration(),
        SchemaKind::None => !node.one_of.is_empty() || !node.any_of.is_empty(),
        _ => false,
    }
}

/// Walk a definition and its inline `allOf` members. References become
/// supertypes; properties are taken first-seen-wins.
fn collect_members(
    id: SchemaId,
    resolver: &TypeResolver<'_>,
    extends: &mut Vec<String>,
    properties: &mut IndexMap<String, PropertyDefinition>,
) {
    let Some(node) = resolver.graph().node(id) else {
        return;
    };

    if node.reference.is_some() {
        let supertype = resolver.resolve(id);
        if !extends.contains(&supertype) {
            extends.push(supertype);
        }
        return;
    }

    for (prop_name, prop_id) in &node.properties {
        if properties.contains_key(prop_name) {
            debug!("property `{prop_name}` already declared, keeping the first");
            continue;
        }
        properties.insert(
            prop_name.clone(),
            PropertyDefinition {
                name: prop_name.clone(),
                description: resolver
                    .graph()
                    .node(*prop_id)
                    .and_then(|p| p.description.clone()),
                type_expr: resolver.resolve(*prop_id),
                required: node.required.contains(prop_name),
            },
        );
    }

    for member in &node.all_of {
        collect_members(*member, resolver, extends, properties);
    }
}

// --- Operations ---

/// What an operation declares for its `200` response.
#[derive(Debug, Clone, Copy)]
enum SuccessResponse {
    Undeclared,
    Empty,
    Body(SchemaId),
}

/// An operation whose schema nodes are interned but not yet resolved.
#[derive(Debug)]
struct PendingOperation<'s> {
    http_method: HttpMethod,
    path: &'s str,
    operation: &'s Operation,
    parameters: Vec<(Parameter, SchemaId)>,
    success: SuccessResponse,
    is_form_data: bool,
}

fn intern_operations<'s>(spec: &'s SwaggerSpec, graph: &mut SchemaGraph) -> Vec<PendingOperation<'s>> {
    let refs = RefResolver::new(spec);
    let mut pending = Vec::new();

    for (path, item) in &spec.paths {
        let shared = match refs.resolve_path_item(item) {
            Ok(params) => params,
            Err(err) => {
                warn!("skipping path {path}: {err}");
                continue;
            }
        };

        for (verb, operation) in &item.operations {
            match intern_operation(spec, &refs, graph, path, verb, operation, &shared) {
                Ok(op) => pending.push(op),
                Err(err) => warn!("skipping {} {path}: {err}", verb.to_uppercase()),
            }
        }
    }

    pending
}

fn intern_operation<'s>(
    spec: &'s SwaggerSpec,
    refs: &RefResolver<'_>,
    graph: &mut SchemaGraph,
    path: &'s str,
    verb: &str,
    operation: &'s Operation,
    shared: &[Parameter],
) -> Result<PendingOperation<'s>, TransformError> {
    let http_method = verb.parse::<HttpMethod>().map_err(TransformError::Other)?;

    let mut merged: Vec<Parameter> = shared.to_vec();
    for param in refs.resolve_operation_parameters(operation)? {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }

    let success = match operation.responses.get("200") {
        None => SuccessResponse::Undeclared,
        Some(response) => match refs.resolve_response(response)?.schema {
            Some(schema) => SuccessResponse::Body(graph.intern(&schema)),
            None => SuccessResponse::Empty,
        },
    };

    let parameters = merged
        .into_iter()
        .map(|param| {
            let id = graph.intern_parameter(&param);
            (param, id)
        })
        .collect();

    let consumes = operation.consumes.as_deref().unwrap_or(&spec.consumes);
    let is_form_data = consumes
        .iter()
        .any(|media| FORM_MEDIA_TYPES.contains(&media.as_str()));

    Ok(PendingOperation {
        http_method,
        path,
        operation,
        parameters,
        success,
        is_form_data,
    })
}

fn build_method(pending: PendingOperation<'_>, resolver: &TypeResolver<'_>) -> MethodDefinition {
    let op = pending.operation;

    let return_type = match pending.success {
        SuccessResponse::Undeclared => FALLBACK_TYPE.to_string(),
        SuccessResponse::Empty => "void".to_string(),
        SuccessResponse::Body(id) => match resolver.resolve(id) {
            expr if expr == "file" => "void".to_string(),
            expr => expr,
        },
    };

    let parameters = pending
        .parameters
        .into_iter()
        .map(|(param, id)| build_parameter(param, id, resolver))
        .collect();

    MethodDefinition {
        tag: op
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TAG.to_string()),
        http_method: pending.http_method,
        url: pending.path.to_string(),
        name: method_name(op, pending.http_method, pending.path),
        description: op.description.clone().or_else(|| op.summary.clone()),
        return_type,
        is_form_data: pending.is_form_data,
        parameters,
    }
}

fn build_parameter(param: Parameter, id: SchemaId, resolver: &TypeResolver<'_>) -> ParameterDefinition {
    let resolved = resolver.resolve(id);
    let type_expr = if resolved == "file" {
        match param.collection_format {
            Some(CollectionFormat::Multi) => "File[]".to_string(),
            _ => FALLBACK_TYPE.to_string(),
        }
    } else {
        resolved
    };

    ParameterDefinition {
        kind: match param.location {
            ParameterLocation::Path => ParameterKind::Path,
            ParameterLocation::Query => ParameterKind::Query,
            ParameterLocation::Header => ParameterKind::Header,
            ParameterLocation::Body => ParameterKind::Body,
            ParameterLocation::FormData => ParameterKind::FormData,
        },
        is_optional: !param.required || param.nullable.unwrap_or(false),
        type_expr,
        default_value: param.default_value,
        description: param.description,
        name: param.name,
    }
}

/// The operationId minus its leading `tag_` segment, or a route-derived
/// name when the operation has no id.
/// e.g. "pet_getPetById" → "getPetById", "getPetById" → "getPetById"
fn method_name(op: &Operation, method: HttpMethod, path: &str) -> String {
    match op.operation_id.as_deref() {
        Some(id) => {
            let stripped = id.split('_').skip(1).collect::<Vec<_>>().join("_");
            if stripped.trim().is_empty() {
                id.to_string()
            } else {
                stripped
            }
        }
        None => route_to_name(method.as_str(), path),
    }
}
