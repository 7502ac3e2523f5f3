//! StructureDefinition XML parser.
//!
//! This module reads StructureDefinition resources, standalone or wrapped in
//! a Bundle, into [`Schema`] values. Scalars follow the `<tag value="..."/>`
//! convention, so each definition is first read into a small node tree and
//! then picked apart by direct children only.

use crate::elements::{Cardinality, ElementDef, FixedValue, TypeRef};
use crate::error::ParseError;
use crate::types::{Derivation, Schema, SchemaKind};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Root element of one definition.
const STRUCTURE_DEFINITION: &str = "StructureDefinition";

/// Extension carrying a value regex on an element or its type.
const REGEX_EXTENSION: &str = "http://hl7.org/fhir/StructureDefinition/regex";

/// Narrative subtrees, never needed.
const NARRATIVE: &str = "div";

/// Parses every StructureDefinition in a document.
///
/// Accepts a single definition or a Bundle; other resources in a bundle are
/// ignored.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or a definition lacks a
/// required element.
pub fn parse_bundle(xml: &str) -> Result<Vec<Schema>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut schemas = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if local_name(e)? == STRUCTURE_DEFINITION => {
                let mut node = Node::from_start(e)?;
                read_children(&mut reader, &mut node)?;
                schemas.push(schema_from_node(&node)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(schemas)
}

/// Parses a document holding exactly one StructureDefinition.
///
/// # Errors
/// Returns `ParseError::InvalidStructure` if the document holds zero or
/// several definitions.
pub fn parse_structure_definition(xml: &str) -> Result<Schema, ParseError> {
    let mut schemas = parse_bundle(xml)?;
    match schemas.len() {
        1 => schemas
            .pop()
            .ok_or_else(|| ParseError::structure("no StructureDefinition element found")),
        0 => Err(ParseError::structure("no StructureDefinition element found")),
        n => Err(ParseError::structure(format!(
            "expected one StructureDefinition, found {n}"
        ))),
    }
}

/// Minimal element tree for one definition.
#[derive(Debug, Default)]
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = local_name(e)?.to_string();
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|err| ParseError::invalid(&name, &key, err.to_string()))?
                .into_owned();
            attrs.push((key, value));
        }
        Ok(Self {
            name,
            attrs,
            children: Vec::new(),
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn value(&self) -> Option<&str> {
        self.attr("value")
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Node::value)
    }

    /// Value of a regex extension among this node's children.
    fn regex_extension(&self) -> Option<&str> {
        self.children_named("extension")
            .find(|ext| ext.attr("url") == Some(REGEX_EXTENSION))
            .and_then(|ext| ext.child_value("valueString"))
    }
}

fn local_name<'a>(e: &'a BytesStart<'_>) -> Result<&'a str, ParseError> {
    Ok(std::str::from_utf8(e.local_name().into_inner())?)
}

/// Reads children until the end tag matching `node`.
fn read_children(reader: &mut Reader<&[u8]>, node: &mut Node) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if local_name(e)? == NARRATIVE {
                    skip_to_end(reader)?;
                } else {
                    let mut child = Node::from_start(e)?;
                    read_children(reader, &mut child)?;
                    node.children.push(child);
                }
            }
            Ok(Event::Empty(ref e)) => node.children.push(Node::from_start(e)?),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!(
                    "unexpected end of document inside '{}'",
                    node.name
                )));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn schema_from_node(node: &Node) -> Result<Schema, ParseError> {
    let name = node
        .child_value("name")
        .ok_or_else(|| ParseError::missing("name", STRUCTURE_DEFINITION))?;
    let kind_value = node
        .child_value("kind")
        .ok_or_else(|| ParseError::missing("kind", name))?;
    let kind = SchemaKind::parse(kind_value)
        .ok_or_else(|| ParseError::invalid("kind", name, kind_value))?;

    let mut schema = Schema::new(name, kind);
    schema.is_abstract = match node.child_value("abstract") {
        Some(value) => parse_bool(value).ok_or_else(|| ParseError::invalid("abstract", name, value))?,
        None => false,
    };
    if let Some(value) = node.child_value("derivation") {
        schema.derivation =
            Derivation::parse(value).ok_or_else(|| ParseError::invalid("derivation", name, value))?;
    }
    schema.base_type_name = node
        .child_value("baseDefinition")
        .and_then(|url| url.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string);
    schema.description = node.child_value("description").map(str::to_string);

    let Some(tree) = node.child("snapshot").or_else(|| node.child("differential")) else {
        return Ok(schema);
    };
    for element in tree.children_named("element") {
        schema.add_element(element_from_node(element, name)?);
    }

    Ok(schema)
}

fn element_from_node(node: &Node, schema: &str) -> Result<ElementDef, ParseError> {
    let path = node
        .child_value("path")
        .ok_or_else(|| ParseError::missing("path", schema))?;
    let mut element = ElementDef::new(path);
    if let Some(id) = node.attr("id") {
        element.id = id.to_string();
    }

    if let Some(value) = node.child_value("min") {
        element.min = value
            .parse()
            .map_err(|_| ParseError::invalid("min", path, value))?;
    }
    if let Some(value) = node.child_value("max") {
        element.max = Cardinality::parse(value).ok_or_else(|| ParseError::invalid("max", path, value))?;
    }
    if let Some(value) = node.child_value("maxLength") {
        element.max_length = Some(
            value
                .parse()
                .map_err(|_| ParseError::invalid("maxLength", path, value))?,
        );
    }

    element.content_reference = node.child_value("contentReference").map(str::to_string);
    element.short = node.child_value("short").map(str::to_string);
    element.pattern = node.regex_extension().map(str::to_string);

    for type_node in node.children_named("type") {
        if let Some(code) = type_node.child_value("code") {
            element.type_refs.push(TypeRef::new(code));
        }
        if element.pattern.is_none() {
            element.pattern = type_node.regex_extension().map(str::to_string);
        }
    }

    element.fixed_value = node.children.iter().find_map(fixed_value);

    Ok(element)
}

/// Reads a primitive `fixed<Type>` or `pattern<Type>` child.
fn fixed_value(node: &Node) -> Option<FixedValue> {
    let suffix = node
        .name
        .strip_prefix("fixed")
        .or_else(|| node.name.strip_prefix("pattern"))?;
    if !suffix.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    FixedValue::from_suffix(suffix, node.value()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<StructureDefinition xmlns="http://hl7.org/fhir">
  <id value="Patient"/>
  <text>
    <status value="generated"/>
    <div xmlns="http://www.w3.org/1999/xhtml"><p><name>not a field</name></p></div>
  </text>
  <name value="Patient"/>
  <contact>
    <name value="FHIR Project"/>
  </contact>
  <description value="Demographics &amp; other administrative information"/>
  <kind value="resource"/>
  <abstract value="false"/>
  <type value="Patient"/>
  <baseDefinition value="http://hl7.org/fhir/StructureDefinition/DomainResource"/>
  <derivation value="specialization"/>
  <snapshot>
    <element id="Patient">
      <path value="Patient"/>
      <min value="0"/>
      <max value="*"/>
    </element>
    <element id="Patient.active">
      <path value="Patient.active"/>
      <short value="Whether this patient's record is in active use"/>
      <min value="0"/>
      <max value="1"/>
      <base>
        <path value="Patient.active"/>
        <min value="1"/>
        <max value="1"/>
      </base>
      <type>
        <code value="boolean"/>
      </type>
    </element>
    <element id="Patient.contact">
      <path value="Patient.contact"/>
      <min value="0"/>
      <max value="*"/>
      <type>
        <code value="BackboneElement"/>
      </type>
    </element>
    <element id="Patient.deceased[x]">
      <path value="Patient.deceased[x]"/>
      <min value="0"/>
      <max value="1"/>
      <type><code value="boolean"/></type>
      <type><code value="dateTime"/></type>
    </element>
    <element id="Patient.link.other">
      <path value="Patient.link.other"/>
      <min value="1"/>
      <max value="1"/>
      <contentReference value="#Patient.contact"/>
    </element>
  </snapshot>
  <differential>
    <element id="Patient">
      <path value="Patient"/>
    </element>
  </differential>
</StructureDefinition>"##;

    #[test]
    fn test_parse_structure_definition() {
        let schema = parse_structure_definition(PATIENT).expect("Failed to parse definition");

        assert_eq!(schema.name, "Patient");
        assert_eq!(schema.kind, SchemaKind::Resource);
        assert!(!schema.is_abstract);
        assert_eq!(schema.derivation, Derivation::Specialization);
        assert_eq!(schema.base_type_name.as_deref(), Some("DomainResource"));
        assert_eq!(
            schema.description.as_deref(),
            Some("Demographics & other administrative information")
        );
        assert_eq!(schema.elements.len(), 5);
    }

    #[test]
    fn test_parse_elements() {
        let schema = parse_structure_definition(PATIENT).expect("Failed to parse definition");

        let active = &schema.elements[1];
        assert_eq!(active.path, "Patient.active");
        assert_eq!(active.min, 0);
        assert_eq!(active.max, Cardinality::Bounded(1));
        assert_eq!(active.type_refs, vec![TypeRef::new("boolean")]);

        let contact = &schema.elements[2];
        assert_eq!(contact.max, Cardinality::Unbounded);

        let deceased = &schema.elements[3];
        assert!(deceased.is_choice());
        assert_eq!(deceased.type_refs.len(), 2);

        let other = &schema.elements[4];
        assert_eq!(other.content_reference.as_deref(), Some("#Patient.contact"));
        assert!(other.type_refs.is_empty());
        assert_eq!(other.min, 1);
    }

    #[test]
    fn test_parse_constraints() {
        let xml = r#"<StructureDefinition xmlns="http://hl7.org/fhir">
  <name value="Sample"/>
  <kind value="complex-type"/>
  <abstract value="false"/>
  <differential>
    <element id="Sample">
      <path value="Sample"/>
    </element>
    <element id="Sample.code">
      <path value="Sample.code"/>
      <min value="1"/>
      <max value="1"/>
      <maxLength value="8"/>
      <type>
        <extension url="http://hl7.org/fhir/StructureDefinition/regex">
          <valueString value="[A-Z]+"/>
        </extension>
        <code value="string"/>
      </type>
      <fixedString value="ABC"/>
    </element>
    <element id="Sample.flag">
      <path value="Sample.flag"/>
      <type><code value="boolean"/></type>
      <patternBoolean value="true"/>
    </element>
  </differential>
</StructureDefinition>"#;

        let schema = parse_structure_definition(xml).expect("Failed to parse definition");
        assert_eq!(schema.kind, SchemaKind::ComplexType);

        let code = &schema.elements[1];
        assert_eq!(code.max_length, Some(8));
        assert_eq!(code.pattern.as_deref(), Some("[A-Z]+"));
        assert_eq!(code.fixed_value, Some(FixedValue::Text("ABC".to_string())));

        let flag = &schema.elements[2];
        assert_eq!(flag.fixed_value, Some(FixedValue::Boolean(true)));
    }

    #[test]
    fn test_parse_bundle() {
        let xml = r#"<Bundle xmlns="http://hl7.org/fhir">
  <id value="types"/>
  <entry>
    <resource>
      <StructureDefinition>
        <name value="string"/>
        <kind value="primitive-type"/>
        <snapshot>
          <element id="string"><path value="string"/></element>
          <element id="string.value"><path value="string.value"/></element>
        </snapshot>
      </StructureDefinition>
    </resource>
  </entry>
  <entry>
    <resource>
      <SearchParameter>
        <name value="ignored"/>
      </SearchParameter>
    </resource>
  </entry>
  <entry>
    <resource>
      <StructureDefinition>
        <name value="Element"/>
        <kind value="complex-type"/>
        <abstract value="true"/>
      </StructureDefinition>
    </resource>
  </entry>
</Bundle>"#;

        let schemas = parse_bundle(xml).expect("Failed to parse bundle");
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].name, "string");
        assert_eq!(schemas[0].kind, SchemaKind::PrimitiveType);
        assert_eq!(schemas[0].elements.len(), 2);
        assert!(schemas[1].is_abstract);
        assert!(schemas[1].elements.is_empty());

        assert!(parse_structure_definition(xml).is_err());
    }

    #[test]
    fn test_parse_errors() {
        let missing_name = r#"<StructureDefinition><kind value="resource"/></StructureDefinition>"#;
        assert!(matches!(
            parse_bundle(missing_name),
            Err(ParseError::MissingElement { .. })
        ));

        let bad_kind = r#"<StructureDefinition><name value="X"/><kind value="widget"/></StructureDefinition>"#;
        assert!(matches!(
            parse_bundle(bad_kind),
            Err(ParseError::InvalidValue { .. })
        ));

        let bad_min = r#"<StructureDefinition><name value="X"/><kind value="resource"/>
<snapshot><element id="X.a"><path value="X.a"/><min value="many"/></element></snapshot>
</StructureDefinition>"#;
        assert!(parse_bundle(bad_min).is_err());

        let truncated = r#"<StructureDefinition><name value="X"/>"#;
        assert!(parse_bundle(truncated).is_err());
    }
}
