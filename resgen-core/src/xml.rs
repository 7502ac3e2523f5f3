//! XML encoding for generated types.
//!
//! Values follow the `<name value="..."/>` convention for primitives and
//! nest child elements for composites. Generated structs implement both
//! traits through `#[derive(XmlElement)]`.

use crate::RawValue;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use thiserror::Error;

/// Namespace declared on the document root.
pub const NAMESPACE: &str = "http://hl7.org/fhir";

/// Error type for XML writing.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Writer failure.
    #[error("XML write error: {0}")]
    Write(String),

    /// Output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Thin element writer over a `quick_xml::Writer`.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Creates a writer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.inner
            .write_event(event)
            .map_err(|e| XmlError::Write(e.to_string()))
    }

    /// Writes the XML declaration.
    ///
    /// # Errors
    /// Returns `XmlError::Write` if the writer fails.
    pub fn declaration(&mut self) -> Result<(), XmlError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    /// Opens an element.
    ///
    /// # Errors
    /// Returns `XmlError::Write` if the writer fails.
    pub fn start(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    /// Opens an element carrying the default namespace.
    ///
    /// # Errors
    /// Returns `XmlError::Write` if the writer fails.
    pub fn start_root(&mut self, name: &str) -> Result<(), XmlError> {
        let mut start = BytesStart::new(name);
        start.push_attribute(("xmlns", NAMESPACE));
        self.write(Event::Start(start))
    }

    /// Closes an element.
    ///
    /// # Errors
    /// Returns `XmlError::Write` if the writer fails.
    pub fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Writes `<name value="..."/>`.
    ///
    /// # Errors
    /// Returns `XmlError::Write` if the writer fails.
    pub fn value(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        let mut start = BytesStart::new(name);
        start.push_attribute(("value", value));
        self.write(Event::Empty(start))
    }

    /// Consumes the writer, returning the document text.
    ///
    /// # Errors
    /// Returns `XmlError::Utf8` if the buffer is not valid UTF-8.
    pub fn into_string(self) -> Result<String, XmlError> {
        Ok(String::from_utf8(self.inner.into_inner())?)
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// A value written as one named element (or several, for sequences).
pub trait XmlValue {
    /// Writes the value under `name`.
    ///
    /// # Errors
    /// Returns `XmlError` if the writer fails.
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError>;

    /// Returns true if the value counts as absent when empty values are
    /// omitted.
    fn is_xml_empty(&self) -> bool {
        false
    }
}

/// A composite whose fields are written as child elements.
pub trait XmlElement {
    /// Writes the fields as child elements.
    ///
    /// # Errors
    /// Returns `XmlError` if the writer fails.
    fn write_children(&self, writer: &mut XmlWriter) -> Result<(), XmlError>;
}

/// Serializes a composite as a namespaced document rooted at `root`.
///
/// # Errors
/// Returns `XmlError` if writing fails.
pub fn to_string<T: XmlElement + ?Sized>(value: &T, root: &str) -> Result<String, XmlError> {
    let mut writer = XmlWriter::new();
    writer.declaration()?;
    writer.start_root(root)?;
    value.write_children(&mut writer)?;
    writer.end(root)?;
    writer.into_string()
}

impl XmlValue for str {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.value(name, self)
    }

    fn is_xml_empty(&self) -> bool {
        self.is_empty()
    }
}

impl XmlValue for String {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.value(name, self)
    }

    fn is_xml_empty(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_xml_scalar {
    ($($ty:ty),*) => {
        $(
            impl XmlValue for $ty {
                fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
                    writer.value(name, &self.to_string())
                }

                fn is_xml_empty(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

impl_xml_scalar!(bool, i32, i64, f64);

impl<T: XmlValue> XmlValue for Option<T> {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        match self {
            Some(value) => value.write_xml(name, writer),
            None => Ok(()),
        }
    }

    fn is_xml_empty(&self) -> bool {
        self.is_none()
    }
}

impl<T: XmlValue + ?Sized> XmlValue for Box<T> {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        (**self).write_xml(name, writer)
    }

    fn is_xml_empty(&self) -> bool {
        (**self).is_xml_empty()
    }
}

impl<T: XmlValue> XmlValue for Vec<T> {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        for item in self {
            item.write_xml(name, writer)?;
        }
        Ok(())
    }

    fn is_xml_empty(&self) -> bool {
        self.is_empty()
    }
}

/// Raw payloads: scalars use the value convention, objects with a
/// `resourceType` key nest one element named after the resource.
impl XmlValue for RawValue {
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), XmlError> {
        match self {
            RawValue::Null => Ok(()),
            RawValue::Bool(b) => writer.value(name, &b.to_string()),
            RawValue::Number(n) => writer.value(name, &n.to_string()),
            RawValue::String(s) => writer.value(name, s),
            RawValue::Array(items) => {
                for item in items {
                    item.write_xml(name, writer)?;
                }
                Ok(())
            }
            RawValue::Object(map) => {
                writer.start(name)?;
                let resource = map.get("resourceType").and_then(RawValue::as_str);
                if let Some(resource) = resource {
                    writer.start(resource)?;
                }
                for (key, value) in map.iter().filter(|(k, _)| k.as_str() != "resourceType") {
                    value.write_xml(key, writer)?;
                }
                if let Some(resource) = resource {
                    writer.end(resource)?;
                }
                writer.end(name)
            }
        }
    }

    fn is_xml_empty(&self) -> bool {
        self.is_null()
    }
}
