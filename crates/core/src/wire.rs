//! Wire encoder
//!
//! Serializes a [`CallDescriptor`] into the request the transport sends:
//! an XML `<qdbapi>` body for POST actions, ordered query pairs for GET
//! actions. Both shapes put the ticket and application token ahead of every
//! other parameter. The application token never goes out on a root call.

use qbase_domain::constants::{ACTION_HEADER, ACTION_QUERY_KEY, REQUEST_ROOT};
use qbase_domain::{QuickBaseError, Result};
use serde_json::Value;

use crate::options::CallDescriptor;
use crate::params::ParamValue;
use crate::ports::TransportRequest;
use crate::registry::HttpMethod;

/// Encoded request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WirePayload {
    /// Complete XML document for the POST body
    Xml(String),
    /// Flat query pairs, `act` first
    Query(Vec<(String, String)>),
}

/// Encode a descriptor into a transport request.
///
/// # Errors
///
/// Returns [`QuickBaseError::InvalidParameterType`] when a parameter name is
/// not a plain XML name, or a parameter or field value cannot be encoded. Nothing has been sent at that point.
pub fn encode(descriptor: &CallDescriptor) -> Result<TransportRequest> {
    let url = descriptor.url();
    match descriptor.method {
        HttpMethod::Post => Ok(TransportRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![
                (ACTION_HEADER.to_string(), descriptor.action.to_string()),
                ("Content-Type".to_string(), "application/xml".to_string()),
            ],
            payload: WirePayload::Xml(encode_xml(descriptor)?),
        }),
        HttpMethod::Get => Ok(TransportRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            payload: WirePayload::Query(encode_query(descriptor)?),
        }),
    }
}

/// Build the `<qdbapi>` document for a POST action.
///
/// # Errors
///
/// See [`encode`].
pub fn encode_xml(descriptor: &CallDescriptor) -> Result<String> {
    let mut xml = String::with_capacity(128);
    xml.push('<');
    xml.push_str(REQUEST_ROOT);
    xml.push('>');

    for (tag, value) in credentials(descriptor) {
        push_element(&mut xml, tag, value);
    }
    for (name, value) in &descriptor.params {
        check_param_name(name)?;
        for entry in ParamValue::from_json(name, value)?.entries() {
            push_element(&mut xml, name, &entry);
        }
    }
    for (key, value) in &descriptor.fields {
        let value = field_value(key, value)?;
        let attr = if is_field_id(key) { "fid" } else { "name" };
        xml.push_str("<field ");
        xml.push_str(attr);
        xml.push_str("=\"");
        escape_into(&mut xml, key);
        xml.push_str("\">");
        escape_into(&mut xml, &value);
        xml.push_str("</field>");
    }

    xml.push_str("</");
    xml.push_str(REQUEST_ROOT);
    xml.push('>');
    Ok(xml)
}

/// Build the query pairs for a GET action.
///
/// Record fields, when given, follow the parameters as `_fid_N` or
/// `_fnm_name` keys.
///
/// # Errors
///
/// See [`encode`].
pub fn encode_query(descriptor: &CallDescriptor) -> Result<Vec<(String, String)>> {
    let mut pairs = vec![(ACTION_QUERY_KEY.to_string(), descriptor.action.to_string())];
    for (key, value) in credentials(descriptor) {
        pairs.push((key.to_string(), value.to_string()));
    }
    for (name, value) in &descriptor.params {
        check_param_name(name)?;
        for entry in ParamValue::from_json(name, value)?.entries() {
            pairs.push((name.clone(), entry));
        }
    }
    for (key, value) in &descriptor.fields {
        let value = field_value(key, value)?;
        let name = if is_field_id(key) { format!("_fid_{key}") } else { format!("_fnm_{key}") };
        pairs.push((name, value));
    }
    Ok(pairs)
}

fn credentials(descriptor: &CallDescriptor) -> Vec<(&'static str, &str)> {
    let mut out = Vec::with_capacity(2);
    if !descriptor.ticket.is_empty() {
        out.push(("ticket", descriptor.ticket.as_str()));
    }
    if !descriptor.apptoken.is_empty() && !descriptor.is_root() {
        out.push(("apptoken", descriptor.apptoken.as_str()));
    }
    out
}

fn field_value(key: &str, value: &Value) -> Result<String> {
    match ParamValue::from_json(key, value)? {
        ParamValue::List(_) => Err(QuickBaseError::InvalidParameterType {
            param: key.to_string(),
            found: "array".to_string(),
        }),
        scalar => Ok(scalar.to_string()),
    }
}

/// Parameter names become XML element names, so only ASCII letters, digits
/// and `_` are accepted, and the first character may not be a digit.
fn check_param_name(name: &str) -> Result<()> {
    let valid = name.bytes().next().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(QuickBaseError::InvalidParameterType {
            param: name.to_string(),
            found: "invalid parameter name".to_string(),
        })
    }
}

/// Field keys made only of ASCII digits are field ids.
pub fn is_field_id(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn push_element(xml: &mut String, tag: &str, value: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    escape_into(xml, value);
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

/// Append `text` with XML special characters escaped.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}
