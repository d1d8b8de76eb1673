#![deny(missing_docs)]

//! # Endpoint Documentation Pages
//!
//! Extracts method, base path, description and parameters from one endpoint's
//! documentation page.
//!
//! Expected markup:
//! - `h2.text-monospace`: base path as the heading's first text.
//! - `h4.mgb-20`: description.
//! - `#table-documentation`: rows of `th` label / `td` value. The `Method` row
//!   holds the HTTP method, the `Input` row one `strong` per parameter
//!   (`text-red` when required, `text-violet` for the user secret), each
//!   followed by an `em` type annotation such as `int(11)`.

use crate::endpoint::{CombinationGenerator, Endpoint, Parameter};
use crate::error::{AppError, AppResult};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// Input name carrying the user's secret; never a request parameter.
pub const SECRET_KEY_PARAM: &str = "secret_key";

/// Everything parsed from one documentation page.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointPage {
    /// Page URL.
    pub docs_url: String,
    /// Endpoint id from the URL.
    pub id: String,
    /// HTTP method.
    pub method: String,
    /// Path relative to the API base.
    pub base_path: String,
    /// Description heading.
    pub description: String,
    /// Whether the endpoint takes the user's `secret_key`.
    pub is_user_bound: bool,
    /// Required parameters in page order.
    pub required: Vec<Parameter>,
    /// Optional parameters in page order.
    pub optional: Vec<Parameter>,
}

impl EndpointPage {
    /// Parses a documentation page fetched from `docs_url`.
    pub fn parse(docs_url: &str, html: &str) -> AppResult<Self> {
        debug!(url = docs_url, "parsing endpoint docs");
        let id = endpoint_id(docs_url)?;
        let document = Html::parse_document(html);

        let table = document
            .select(&selector("#table-documentation")?)
            .next()
            .ok_or_else(|| malformed(docs_url, "no #table-documentation"))?;

        let method = row_value(table, "Method")?
            .map(element_text)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| malformed(docs_url, "no Method row"))?;

        let base_path = document
            .select(&selector("h2.text-monospace")?)
            .next()
            .and_then(|h2| {
                h2.children()
                    .filter_map(|node| node.value().as_text())
                    .map(|text| text.trim())
                    .find(|text| !text.is_empty())
                    .map(str::to_string)
            })
            .ok_or_else(|| malformed(docs_url, "no h2.text-monospace base path"))?;

        let description = document
            .select(&selector("h4.mgb-20")?)
            .next()
            .map(element_text)
            .ok_or_else(|| malformed(docs_url, "no h4.mgb-20 description"))?;

        let mut page = EndpointPage {
            docs_url: docs_url.to_string(),
            id,
            method,
            base_path,
            description,
            is_user_bound: false,
            required: Vec::new(),
            optional: Vec::new(),
        };

        // endpoints without inputs have no Input row
        if let Some(input) = row_value(table, "Input")? {
            page.read_inputs(input)?;
        }
        Ok(page)
    }

    fn read_inputs(&mut self, input: ElementRef<'_>) -> AppResult<()> {
        for tag in input.select(&selector("strong")?) {
            let name = element_text(tag);
            let classes: Vec<&str> = tag.value().classes().collect();

            if name == SECRET_KEY_PARAM {
                if classes.contains(&"text-violet") {
                    self.is_user_bound = true;
                }
                continue;
            }
            let is_required = classes.contains(&"text-red");
            if self.required.iter().chain(&self.optional).any(|p| p.name == name) {
                continue;
            }

            let annotation = tag
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "em")
                .map(|em| em.text().collect::<String>())
                .ok_or_else(|| malformed(&self.docs_url, &format!("no type annotation for '{}'", name)))?;
            let (ty, length) = parse_type_annotation(&annotation)
                .map_err(|e| malformed(&self.docs_url, &format!("parameter '{}': {}", name, e)))?;
            debug!(parameter = %name, ty = %ty, length, is_required, "parsed parameter");

            let param = Parameter {
                name,
                ty,
                length,
                is_required,
            };
            if is_required {
                self.required.push(param);
            } else {
                self.optional.push(param);
            }
        }
        Ok(())
    }

    /// Builds the endpoint, generating its request variants.
    pub fn into_endpoint(self, generator: &CombinationGenerator) -> Endpoint {
        let variants = generator.generate(&self.id, &self.base_path, &self.required, &self.optional);
        Endpoint {
            id: self.id,
            method: self.method,
            base_path: self.base_path,
            description: self.description,
            docs_url: self.docs_url,
            is_user_bound: self.is_user_bound,
            variants,
        }
    }
}

/// The path segment following `/id/` in a documentation URL.
pub fn endpoint_id(docs_url: &str) -> AppResult<String> {
    docs_url
        .rsplit_once("/id/")
        .and_then(|(_, rest)| rest.split('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| malformed(docs_url, "no /id/ segment in documentation URL"))
}

/// Splits `int(11)` into `("int", 11)`; a missing length is `0`.
pub fn parse_type_annotation(annotation: &str) -> Result<(String, u32), String> {
    static TYPE_RE: OnceLock<Regex> = OnceLock::new();
    let type_re = TYPE_RE.get_or_init(|| {
        Regex::new(r"^(?P<name>[^(]+)(\((?P<length>\d+)\))?").expect("Invalid regex")
    });

    let caps = type_re
        .captures(annotation)
        .ok_or_else(|| format!("unparsable type annotation '{}'", annotation))?;
    let name = caps["name"].trim().to_string();
    if name.is_empty() {
        return Err(format!("empty type name in '{}'", annotation));
    }
    let length = match caps.name("length") {
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .map_err(|e| format!("invalid length in '{}': {}", annotation, e))?,
        None => 0,
    };
    Ok((name, length))
}

/// The `td` following the `th` whose text contains `label`.
fn row_value<'a>(table: ElementRef<'a>, label: &str) -> AppResult<Option<ElementRef<'a>>> {
    let header = table
        .select(&selector("th")?)
        .find(|th| th.text().collect::<String>().contains(label));
    Ok(header.and_then(|th| {
        th.next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| sibling.value().name() == "td")
    }))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::General(format!("invalid selector '{}': {}", css, e)))
}

fn malformed(docs_url: &str, reason: &str) -> AppError {
    AppError::MalformedInput(format!("{}: {}", docs_url, reason))
}
