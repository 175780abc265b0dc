//! End-to-end generation tests: Avro declarations in, Python source out.

use recordgen_codegen::{
    CodegenError, Generator, GeneratorConfig, generate_from_avsc, generate_from_avsc_with,
    generate_from_file,
};
use recordgen_schema::{Field, RecordSchema, SchemaStore, parse_schema_str};

const ORDER_AVSC: &str = r#"{
    "type": "record",
    "name": "Order",
    "namespace": "shop",
    "fields": [
        {"name": "id", "type": "long"},
        {"name": "customer", "type": {
            "type": "record",
            "name": "Customer",
            "fields": [
                {"name": "name", "type": "string"},
                {"name": "billing", "type": {
                    "type": "record",
                    "name": "Address",
                    "fields": [{"name": "city", "type": ["null", "string"]}]
                }}
            ]
        }},
        {"name": "lines", "type": {"type": "array", "items": {
            "type": "record",
            "name": "Line",
            "fields": [
                {"name": "sku", "type": "string"},
                {"name": "quantity", "type": "int", "default": 1}
            ]
        }}},
        {"name": "shipping", "type": {"type": "map", "values": "Address"}},
        {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["OPEN", "PAID"]}}
    ]
}"#;

fn class_position(source: &str, name: &str) -> usize {
    source
        .find(&format!("class {}(pyschema.Record):", name))
        .unwrap_or_else(|| panic!("class {} not emitted", name))
}

#[test]
fn test_order_classes_follow_dependencies() {
    let source = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");

    let address = class_position(&source, "Address");
    let customer = class_position(&source, "Customer");
    let line = class_position(&source, "Line");
    let order = class_position(&source, "Order");

    assert!(address < customer);
    assert!(customer < order);
    assert!(line < order);
    assert_eq!(source.matches("(pyschema.Record):").count(), 4);
}

#[test]
fn test_order_field_lines() {
    let source = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");
    let order_block = &source[class_position(&source, "Order")..];

    let field_lines: Vec<&str> = order_block
        .lines()
        .filter(|l| l.starts_with("    ") && !l.trim_start().starts_with('#'))
        .collect();
    assert_eq!(
        field_lines,
        [
            "    _namespace = 'shop'",
            "    id = Integer(nullable=False)",
            "    customer = SubRecord(Customer, nullable=False)",
            "    lines = List(SubRecord(Line, nullable=False), nullable=False)",
            "    shipping = Map(SubRecord(Address, nullable=False), nullable=False)",
            "    status = Enum(['OPEN', 'PAID'], nullable=False)",
        ]
    );

    assert!(source.contains("    city = Text()\n"));
    assert!(source.contains("    quantity = Integer(size=4, nullable=False, default=1)\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");
    let second = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");
    assert_eq!(first, second);
}

#[test]
fn test_blocks_separated_by_single_blank_line() {
    let source = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");
    assert!(!source.contains("\n\n\n"));
    assert_eq!(source.matches("\n\nclass ").count(), 4);
}

#[test]
fn test_generate_with_tabs() {
    let config = GeneratorConfig::new().with_tabs();
    let source = generate_from_avsc_with(ORDER_AVSC, config).expect("Failed to generate");
    assert!(source.contains("\tid = Integer(nullable=False)\n"));
    assert!(!source.contains("    id ="));
}

#[test]
fn test_generate_from_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("order.avsc");
    std::fs::write(&path, ORDER_AVSC).expect("Failed to write schema");

    let from_file = generate_from_file(&path).expect("Failed to generate");
    let from_str = generate_from_avsc(ORDER_AVSC).expect("Failed to generate");
    assert_eq!(from_file, from_str);
}

#[test]
fn test_generate_from_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = generate_from_file(&dir.path().join("absent.avsc"));
    assert!(matches!(result, Err(CodegenError::Io(_))));
}

#[test]
fn test_parse_errors_propagate() {
    let result = generate_from_avsc(
        r#"{"type": "record", "name": "Bad", "fields": [{"name": "x", "type": ["int", "string"]}]}"#,
    );
    assert!(matches!(result, Err(CodegenError::Parse(_))));
}

#[test]
fn test_fixed_fields_rejected() {
    let result = generate_from_avsc(
        r#"{"type": "record", "name": "Blob", "fields": [
            {"name": "digest", "type": {"type": "fixed", "name": "MD5", "size": 16}}
        ]}"#,
    );
    assert!(matches!(
        result,
        Err(CodegenError::UnsupportedConstruct { ref construct, .. }) if construct.contains("MD5")
    ));
}

#[test]
fn test_multiple_roots_share_dependencies() {
    let mut store = SchemaStore::new();
    let address = parse_schema_str(
        r#"{"type": "record", "name": "Address", "fields": [{"name": "city", "type": "string"}]}"#,
        &mut store,
    )
    .expect("Failed to parse Address");
    let office = parse_schema_str(
        r#"{"type": "record", "name": "Office", "fields": [{"name": "site", "type": "Address"}]}"#,
        &mut store,
    )
    .expect("Failed to parse Office");
    let home = parse_schema_str(
        r#"{"type": "record", "name": "Home", "fields": [{"name": "site", "type": "Address"}]}"#,
        &mut store,
    )
    .expect("Failed to parse Home");

    let source = Generator::new(&store)
        .render(&[office, home, address])
        .expect("Failed to render");

    assert_eq!(source.matches("class Address(").count(), 1);
    let address_pos = class_position(&source, "Address");
    let home_pos = class_position(&source, "Home");
    let office_pos = class_position(&source, "Office");
    assert!(address_pos < home_pos);
    assert!(home_pos < office_pos);
}

#[test]
fn test_self_referential_record_rejected() {
    let mut store = SchemaStore::new();
    let node = store.add(RecordSchema::new("Node").with_field("value", Field::integer()));
    store
        .get_mut(node)
        .expect("Node missing")
        .add_field("next", Field::sub_record(node));

    let result = Generator::new(&store).render(&[node]);
    assert!(matches!(result, Err(CodegenError::CyclicReference { .. })));
}
