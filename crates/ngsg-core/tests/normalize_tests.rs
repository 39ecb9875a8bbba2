use ngsg_core::transform::name_normalizer::{
    first_char_to_lower, is_identifier, normalize_name, route_to_name,
};

#[test]
fn test_camel_case_input() {
    let n = normalize_name("createChatCompletion");
    assert_eq!(n.pascal_case, "CreateChatCompletion");
    assert_eq!(n.camel_case, "createChatCompletion");
}

#[test]
fn test_snake_case_input() {
    let n = normalize_name("pet_store");
    assert_eq!(n.pascal_case, "PetStore");
    assert_eq!(n.camel_case, "petStore");
}

#[test]
fn test_kebab_case_input() {
    let n = normalize_name("pet-store-api");
    assert_eq!(n.pascal_case, "PetStoreApi");
    assert_eq!(n.camel_case, "petStoreApi");
}

#[test]
fn test_header_name() {
    let n = normalize_name("X-Request-Id");
    assert_eq!(n.camel_case, "xRequestId");
    assert_eq!(n.original, "X-Request-Id");
}

#[test]
fn test_first_char_to_lower() {
    assert_eq!(first_char_to_lower("UserService"), "userService");
    assert_eq!(first_char_to_lower("placeOrder"), "placeOrder");
}

#[test]
fn test_identifiers() {
    assert!(is_identifier("store"));
    assert!(is_identifier("PetStore"));
    assert!(!is_identifier("zoo keeper"));
    assert!(!is_identifier("x-rating"));
}

#[test]
fn test_route_names() {
    assert_eq!(route_to_name("delete", "/animals/{animalId}"), "deleteAnimal");
    assert_eq!(route_to_name("put", "/categories/{id}"), "updateCategory");
    assert_eq!(route_to_name("post", "/"), "create");
}

#[test]
fn test_digit_led_names_stay_identifiers() {
    let n = normalize_name("2fa-code");
    assert_eq!(n.camel_case, "_2faCode");
    assert!(is_identifier(&n.camel_case));
    assert!(is_identifier(&normalize_name("1st tag").pascal_case));
}
