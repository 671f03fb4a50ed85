//! Synthesized examples must validate against the schemas generated alongside them.

use serde_json::Value;
use sigdoc_core::{
    assemble_document, generate_example, generate_schema, ModuleDescriptor, OperationDescriptor,
    ParameterDescriptor, TypeTag,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn every_tag_operation() -> OperationDescriptor {
    TypeTag::VALUES
        .iter()
        .fold(OperationDescriptor::new("everything"), |op, tag| {
            op.param(ParameterDescriptor::new(format!("p_{}", tag), *tag))
        })
}

#[test]
fn test_request_example_validates() {
    init_tracing();
    let op = every_tag_operation();
    let schema = serde_json::to_value(generate_schema(&op).unwrap()).unwrap();
    let example = Value::Object(generate_example(&op).unwrap());

    let validator = jsonschema::validator_for(&schema).unwrap();
    assert!(validator.is_valid(&example));
}

#[test]
fn test_missing_required_field_is_rejected() {
    let op = every_tag_operation();
    let schema = serde_json::to_value(generate_schema(&op).unwrap()).unwrap();
    let mut example = generate_example(&op).unwrap();
    example.remove("p_string");

    let validator = jsonschema::validator_for(&schema).unwrap();
    assert!(!validator.is_valid(&Value::Object(example)));
}

#[test]
fn test_out_of_range_integer_is_rejected() {
    let op = OperationDescriptor::new("count")
        .param(ParameterDescriptor::new("n", TypeTag::Integer));
    let schema = serde_json::to_value(generate_schema(&op).unwrap()).unwrap();
    let validator = jsonschema::validator_for(&schema).unwrap();

    assert!(validator.is_valid(&serde_json::json!({"n": i32::MAX})));
    assert!(!validator.is_valid(&serde_json::json!({"n": i64::from(i32::MAX) + 1})));
}

#[test]
fn test_response_examples_validate() {
    init_tracing();
    let module = [TypeTag::String, TypeTag::Void, TypeTag::Object, TypeTag::Long]
        .into_iter()
        .enumerate()
        .fold(ModuleDescriptor::new("EnvelopeController"), |m, (i, tag)| {
            m.with_operation(
                OperationDescriptor::new(format!("op{}", i))
                    .get(&format!("/op{}", i))
                    .returns(tag),
            )
        });

    let doc = assemble_document(&module).unwrap();
    assert_eq!(doc.base_path, "/envelope");
    for endpoint in &doc.endpoints {
        let schema = serde_json::to_value(&endpoint.response_schema).unwrap();
        let example = Value::Object(endpoint.response_example.clone());
        let validator = jsonschema::validator_for(&schema).unwrap();
        assert!(
            validator.is_valid(&example),
            "{} response example does not match its schema",
            endpoint.method_name
        );
    }
}
