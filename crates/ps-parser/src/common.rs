//! Attribute and child-element helpers shared by the plan and scalar parsers

use crate::error::{ParseError, ParseResult};
use crate::xml::Element;
use ps_core::{ColumnReference, Object};

pub(crate) fn required_attr<'a>(element: &'a Element, attribute: &str) -> ParseResult<&'a str> {
    element
        .attr(attribute)
        .ok_or_else(|| ParseError::MissingAttribute {
            element: element.name.clone(),
            attribute: attribute.to_string(),
        })
}

pub(crate) fn required_child<'a>(element: &'a Element, name: &str) -> ParseResult<&'a Element> {
    element
        .child(name)
        .ok_or_else(|| missing_element(element, name))
}

pub(crate) fn required_path<'a>(element: &'a Element, path: &[&str]) -> ParseResult<&'a Element> {
    element
        .find(path)
        .ok_or_else(|| missing_element(element, &path.join("/")))
}

pub(crate) fn missing_element(parent: &Element, name: &str) -> ParseError {
    ParseError::MissingElement {
        parent: parent.name.clone(),
        element: name.to_string(),
    }
}

pub(crate) fn invalid_attribute(element: &Element, attribute: &str, value: &str) -> ParseError {
    ParseError::InvalidAttribute {
        element: element.name.clone(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

/// Decode an `xsd:boolean` attribute (`1`, `0`, `true`, `false`)
pub(crate) fn parse_bool(element: &Element, attribute: &str) -> ParseResult<bool> {
    let value = required_attr(element, attribute)?;
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(invalid_attribute(element, attribute, other)),
    }
}

pub(crate) fn parse_optional_bool(element: &Element, attribute: &str) -> ParseResult<Option<bool>> {
    match element.attr(attribute) {
        Some(_) => parse_bool(element, attribute).map(Some),
        None => Ok(None),
    }
}

/// Decode an optional numeric attribute
pub(crate) fn parse_optional_number<T: std::str::FromStr>(
    element: &Element,
    attribute: &str,
) -> ParseResult<Option<T>> {
    element
        .attr(attribute)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| invalid_attribute(element, attribute, value))
        })
        .transpose()
}

pub(crate) fn parse_column_reference(element: &Element) -> ParseResult<ColumnReference> {
    Ok(ColumnReference {
        column: required_attr(element, "Column")?.to_string(),
        schema: element.attr("Schema").map(str::to_string),
        table: element.attr("Table").map(str::to_string),
        alias: element.attr("Alias").map(str::to_string),
    })
}

/// Every `ColumnReference` child of `element`
pub(crate) fn parse_column_list(element: &Element) -> ParseResult<Vec<ColumnReference>> {
    element
        .children_named("ColumnReference")
        .map(parse_column_reference)
        .collect()
}

pub(crate) fn parse_object(element: &Element) -> ParseResult<Object> {
    Ok(Object {
        schema: required_attr(element, "Schema")?.to_string(),
        table: required_attr(element, "Table")?.to_string(),
        alias: element.attr("Alias").map(str::to_string),
        index: element.attr("Index").map(str::to_string),
    })
}
