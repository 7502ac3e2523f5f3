//! End-to-end tests over code generated from `tests/fixtures` by the build
//! script.

#[allow(dead_code)]
mod fhir {
    include!(concat!(env!("OUT_DIR"), "/fhir.rs"));
}

use fhir::{
    HumanName, Patient, PatientContact, Period, Reference, Sample, SampleComponent,
    SampleReferenceRange,
};
use resgen_core::{Validate, ValidationError};
use serde_json::json;

fn sample(value: serde_json::Value) -> Sample {
    serde_json::from_value(value).expect("sample deserializes")
}

fn valid_sample() -> Sample {
    sample(json!({"name": "x", "tags": ["a", "b"]}))
}

#[test]
fn test_required_text_and_sequence() {
    let err = sample(json!({"name": "", "tags": ["a", "b"]}))
        .validate()
        .expect_err("empty name");
    assert_eq!(err, ValidationError::required("name"));
    assert_eq!(err.to_string(), "name required");

    let err = sample(json!({"name": "x", "tags": ["a"]}))
        .validate()
        .expect_err("one tag");
    assert_eq!(err.to_string(), "tags needs at least 2");

    assert!(valid_sample().validate().is_ok());
}

#[test]
fn test_required_fields_always_serialized() {
    let value = serde_json::to_value(Sample::default()).expect("serializes");
    assert_eq!(value, json!({"name": "", "tags": []}));
}

#[test]
fn test_choice_fields_keep_typed_keys() {
    let mut value = valid_sample();
    value.value_integer = Some(5);
    assert!(value.value_string.is_none());

    let encoded = serde_json::to_value(&value).expect("serializes");
    assert_eq!(encoded["valueInteger"], json!(5));
    assert!(encoded.get("value").is_none());
    assert!(encoded.get("valueString").is_none());

    let decoded = sample(json!({"name": "x", "tags": ["a", "b"], "valueString": "high"}));
    assert_eq!(decoded.value_string.as_deref(), Some("high"));

    let xml = resgen_core::xml::to_string(&value, "Sample").expect("xml");
    assert!(xml.contains(r#"<valueInteger value="5"/>"#));
    assert!(!xml.contains("<value "));
    assert!(!xml.contains("valueString"));
}

#[test]
fn test_content_reference_reuses_nested_type() {
    let range = SampleReferenceRange {
        low: Some(1.5),
        text: "normal".to_string(),
    };
    let component = SampleComponent {
        code: "systolic".to_string(),
        reference_range: vec![range.clone()],
    };
    let mut value = valid_sample();
    value.reference_range = vec![range];
    value.component = vec![component];
    assert!(value.validate().is_ok());

    let encoded = serde_json::to_value(&value).expect("serializes");
    assert_eq!(
        encoded["component"][0]["referenceRange"][0],
        json!({"low": 1.5, "text": "normal"})
    );

    value.component[0].reference_range[0].text.clear();
    let err = value.validate().expect_err("missing range text");
    assert_eq!(err.to_string(), "component[0]: referenceRange[0]: text required");
    assert_eq!(err.root_cause(), &ValidationError::required("text"));
}

#[test]
fn test_length_and_pattern() {
    let mut value = valid_sample();
    value.status = Some("final".to_string());
    assert!(value.validate().is_ok());

    value.status = Some("FINAL".to_string());
    assert_eq!(
        value.validate().expect_err("pattern"),
        ValidationError::pattern("status", "[a-z]+")
    );

    value.status = Some("preliminary".to_string());
    assert_eq!(
        value.validate().expect_err("too long"),
        ValidationError::max_length("status", 8, 11)
    );
}

#[test]
fn test_fixed_value() {
    let mut value = valid_sample();
    value.version = Some("1.0".to_string());
    assert!(value.validate().is_ok());

    value.version = Some("2.0".to_string());
    let err = value.validate().expect_err("fixed");
    assert_eq!(err.to_string(), "version must equal 1.0");
}

#[test]
fn test_placeholders_are_empty_types() {
    let mut value = valid_sample();
    value.period = Some(Box::new(Period {}));
    assert!(value.validate().is_ok());

    let encoded = serde_json::to_value(&value).expect("serializes");
    assert_eq!(encoded["period"], json!({}));

    let reference = Reference {};
    assert!(reference.is_valid());
}

fn patient() -> Patient {
    serde_json::from_value(json!({
        "resourceType": "Patient",
        "id": "example",
        "contained": [{"resourceType": "Organization", "name": "ACME"}],
        "active": true,
        "name": [{"use": "official", "family": "Chalmers", "given": ["Peter", "James"]}],
        "gender": "male",
        "birthDate": "1974-12-25",
        "deceasedBoolean": false,
        "contact": [{"name": {"family": "du Marché"}, "telecom": ["+33 6 12 34 56 78"]}]
    }))
    .expect("patient deserializes")
}

#[test]
fn test_resource_discriminator() {
    assert_eq!(Patient::RESOURCE_TYPE, "Patient");
    let empty = Patient::default();
    assert_eq!(empty.resource_type, "Patient");
    assert!(empty.validate().is_ok());

    let encoded = serde_json::to_value(&empty).expect("serializes");
    assert_eq!(encoded, json!({"resourceType": "Patient"}));

    let wrong: Patient =
        serde_json::from_value(json!({"resourceType": "Observation"})).expect("deserializes");
    assert_eq!(
        wrong.validate().expect_err("wrong type").to_string(),
        r#"resourceType must be "Patient", found "Observation""#
    );
}

#[test]
fn test_patient_json_round_trip() {
    let value = patient();
    assert!(value.validate().is_ok());
    assert_eq!(value.name[0].r#use.as_deref(), Some("official"));
    assert_eq!(value.deceased_boolean, Some(false));
    assert!(value.deceased_date_time.is_none());
    assert_eq!(value.contained[0]["name"], json!("ACME"));

    let encoded = serde_json::to_value(&value).expect("serializes");
    let decoded: Patient = serde_json::from_value(encoded.clone()).expect("deserializes");
    assert_eq!(decoded, value);
    assert_eq!(encoded["birthDate"], json!("1974-12-25"));
    assert!(encoded.get("managingOrganization").is_none());
}

#[test]
fn test_nested_validation() {
    let mut value = patient();
    value.contact.push(PatientContact::default());
    assert_eq!(
        value.validate().expect_err("contact without name").to_string(),
        "contact[1]: name required"
    );

    let mut value = patient();
    value.name.push(HumanName {
        family: Some("A".repeat(21)),
        ..HumanName::default()
    });
    assert_eq!(
        value.validate().expect_err("long family").to_string(),
        "name[1]: family exceeds max length 20 (21 characters)"
    );
}

#[test]
fn test_opaque_values_are_not_validated() {
    let mut value = patient();
    value.contained.push(json!({"resourceType": 7}));
    assert!(value.validate().is_ok());
}

#[test]
fn test_patient_xml() {
    let xml = resgen_core::xml::to_string(&patient(), "Patient").expect("xml");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"<Patient xmlns="http://hl7.org/fhir">"#));
    assert!(xml.contains(r#"<id value="example"/>"#));
    assert!(xml.contains(
        r#"<contained><Organization><name value="ACME"/></Organization></contained>"#
    ));
    assert!(xml.contains(r#"<active value="true"/>"#));
    assert!(xml.contains(
        r#"<name><use value="official"/><family value="Chalmers"/><given value="Peter"/><given value="James"/></name>"#
    ));
    assert!(xml.contains(r#"<deceasedBoolean value="false"/>"#));
    assert!(xml.contains(r#"<contact><name><family value="du Marché"/></name>"#));
    assert!(!xml.contains("resourceType"));
    assert!(!xml.contains("managingOrganization"));
    assert!(xml.ends_with("</Patient>"));
}

#[test]
fn test_primitive_wrapper() {
    let value = fhir::String {
        id: None,
        value: "hello".to_string(),
    };
    assert!(value.validate().is_ok());
    assert!(fhir::String::default().validate().is_ok());

    let encoded = serde_json::to_value(&value).expect("serializes");
    assert_eq!(encoded, json!({"value": "hello"}));
}

#[test]
fn test_profiles_and_logical_models_are_not_generated() {
    let source = include_str!(concat!(env!("OUT_DIR"), "/fhir.rs"));
    assert!(source.contains("pub mod patient {"));
    assert!(source.contains("pub mod string {"));
    assert!(!source.contains("StrictPatient"));
    assert!(!source.contains("pub struct Definition"));
}
