use ngsg_core::error::ParseError;
use ngsg_core::parse;
use ngsg_core::parse::parameter::{CollectionFormat, ParameterLocation, ParameterOrRef};
use ngsg_core::parse::response::ResponseOrRef;
use ngsg_core::parse::schema::SchemaType;

const PETSTORE: &str = include_str!("fixtures/petstore.json");
const ZOO: &str = include_str!("fixtures/zoo.yaml");

#[test]
fn parse_petstore_json() {
    let spec = parse::from_json(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.swagger, "2.0");
    assert_eq!(spec.info.title, "Swagger Petstore");
    assert_eq!(spec.base_path.as_deref(), Some("/v2"));
    assert_eq!(spec.paths.len(), 10);
    assert_eq!(spec.definitions.len(), 6);
    assert_eq!(spec.tags.len(), 3);

    let definitions: Vec<&str> = spec.definitions.keys().map(String::as_str).collect();
    assert_eq!(
        definitions,
        ["ApiResponse", "Category", "Pet", "Tag", "Order", "User"]
    );

    let pet = &spec.definitions["Pet"];
    assert_eq!(pet.schema_type, Some(SchemaType::Object));
    assert_eq!(pet.required, ["name", "photoUrls"]);
    assert_eq!(pet.properties["status"].enum_values.len(), 3);
}

#[test]
fn parse_keeps_verb_order() {
    let spec = parse::from_json(PETSTORE).unwrap();
    let verbs: Vec<&str> = spec.paths["/pet/{petId}"]
        .operations
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(verbs, ["get", "post", "delete"]);

    let verbs: Vec<&str> = spec.paths["/pet"]
        .operations
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(verbs, ["post", "put"]);
}

#[test]
fn parse_parameters() {
    let spec = parse::from_json(PETSTORE).unwrap();
    let op = &spec.paths["/pet/findByStatus"].operations["get"];
    let ParameterOrRef::Parameter(status) = &op.parameters[0] else {
        panic!("expected inline parameter");
    };
    assert_eq!(status.location, ParameterLocation::Query);
    assert_eq!(status.param_type, Some(SchemaType::Array));
    assert_eq!(status.collection_format, Some(CollectionFormat::Multi));
    assert!(status.required);
    assert_eq!(status.items.as_ref().unwrap().enum_values.len(), 3);

    let upload = &spec.paths["/pet/{petId}/uploadImage"].operations["post"];
    assert_eq!(
        upload.consumes.as_deref(),
        Some(&["multipart/form-data".to_string()][..])
    );
}

#[test]
fn parse_zoo_yaml() {
    let spec = parse::from_yaml(ZOO).expect("should parse zoo.yaml");
    assert_eq!(spec.info.version, "2.1");
    assert_eq!(spec.consumes, ["application/json"]);
    assert!(spec.parameters.contains_key("pageSize"));
    assert!(spec.responses.contains_key("NotFound"));

    let animals = &spec.paths["/animals"];
    assert_eq!(animals.parameters.len(), 1);
    assert!(matches!(
        animals.operations["get"].parameters[0],
        ParameterOrRef::Ref { .. }
    ));

    let delete = &spec.paths["/animals/{animalId}"].operations["delete"];
    assert!(delete.operation_id.is_none());
    assert!(matches!(
        delete.responses["404"],
        ResponseOrRef::Ref { .. }
    ));

    let pet = &spec.definitions["Pet"];
    assert_eq!(pet.all_of.len(), 2);
    assert_eq!(
        pet.all_of[0].ref_path.as_deref(),
        Some("#/definitions/Animal")
    );
}

#[test]
fn parse_detects_format() {
    let json = parse::from_str(PETSTORE).unwrap();
    assert_eq!(json.info.title, "Swagger Petstore");

    let yaml = parse::from_str(ZOO).unwrap();
    assert_eq!(yaml.info.title, "Zoo");

    let with_bom = format!("\u{feff}  {PETSTORE}");
    assert!(parse::from_str(&with_bom).is_ok());
}

#[test]
fn parse_rejects_other_versions() {
    let err = parse::from_str("swagger: '3.0'\ninfo:\n  title: x\n  version: '1'\n").unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "3.0"));

    let err = parse::from_str(r#"{"openapi": "3.0.0"}"#).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}
