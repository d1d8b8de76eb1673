use docspec_core::annotate::AnnotationRules;
use docspec_core::endpoint::{CombinationGenerator, DefaultValueResolver, DefaultsConfig, ValueMode};
use docspec_core::schema::{resolve_path, Extraction, Insertion};
use docspec_core::{default_status_names, endpoint_links, EndpointPage, SchemaNode, SpecDocument};
use pretty_assertions::assert_eq;
use std::fs;

const INDEX: &str = r#"<html><body>
<p class="mgb-5 pdl-10"><a href="https://uexcorp.space/api/documentation/id/commodities_prices/">commodities_prices</a></p>
</body></html>"#;

const PAGE: &str = r#"<html><body>
<h2 class="text-monospace">/commodities_prices</h2>
<h4 class="mgb-20">Retrieve a list of prices for all commodities in all terminals</h4>
<table id="table-documentation">
  <tr><th>Method</th><td>GET</td></tr>
  <tr><th>Input</th><td>
    <strong class="text-red">id_commodity</strong> <em>int(11)</em><br>
    <strong>id_terminal</strong> <em>int(11)</em>
  </td></tr>
</table>
</body></html>"#;

const SPEC: &str = r#"openapi: 3.0.0
paths:
  /commodities_prices/id_commodity/{id_commodity}/:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  data:
                    type: array
                    items:
                      type: object
                      properties:
                        id:
                          type: integer
"#;

fn generator(mode: ValueMode) -> CombinationGenerator {
    let defaults: DefaultsConfig = serde_yaml::from_str(
        r#"
global:
  id_commodity: 33
  id_terminal: 74
"#,
    )
    .unwrap();
    CombinationGenerator::new(
        DefaultValueResolver::new(defaults).with_mode(mode),
        Vec::<String>::new(),
    )
}

#[test]
fn test_sample_urls_from_scraped_pages() {
    let links = endpoint_links(INDEX).unwrap();
    assert_eq!(links.len(), 1);

    let endpoint = EndpointPage::parse(&links[0], PAGE)
        .unwrap()
        .into_endpoint(&generator(ValueMode::Sample));
    let urls: Vec<String> = endpoint.variants.iter().map(|v| v.url()).collect();
    assert_eq!(
        urls,
        vec![
            "/commodities_prices/id_commodity/33/",
            "/commodities_prices/id_commodity/33/?id_terminal=74",
        ]
    );
}

#[test]
fn test_fixup_document_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("openapi.yaml");
    fs::write(&spec_path, SPEC).unwrap();

    let endpoint = EndpointPage::parse(
        "https://uexcorp.space/api/documentation/id/commodities_prices/",
        PAGE,
    )
    .unwrap()
    .into_endpoint(&generator(ValueMode::Template));

    let mut doc = SpecDocument::from_yaml_str(&fs::read_to_string(&spec_path).unwrap()).unwrap();
    doc.add_path_templates(endpoint.distinct_paths()).unwrap();

    let lifted = doc
        .lift_response_schemas(&endpoint, &default_status_names())
        .unwrap();
    assert_eq!(lifted.len(), 1);
    assert_eq!(lifted[0].name, "GetCommoditiesPricesOkResponse");

    let rules = AnnotationRules::default();
    let report = doc.merge_operation_data(&rules.build_operation_map([&endpoint]));
    assert_eq!(report.merged.len(), 1);

    let extraction = doc
        .with_catalog(|catalog| {
            catalog.extract_schema(
                "GetCommoditiesPricesOkResponse.properties.data.items",
                "CommodityPrice",
            )
        })
        .unwrap();
    assert_eq!(extraction, Extraction::Extracted(Insertion::Inserted));

    fs::write(&spec_path, doc.to_yaml_string().unwrap()).unwrap();
    let reloaded = SpecDocument::from_yaml_str(&fs::read_to_string(&spec_path).unwrap()).unwrap();
    assert_eq!(reloaded, doc);

    assert_eq!(
        reloaded.path_templates(),
        vec!["/commodities_prices/id_commodity/{id_commodity}/"]
    );
    let operation = resolve_path(
        reloaded.root(),
        &["paths", "/commodities_prices/id_commodity/{id_commodity}/", "get"],
    )
    .unwrap();
    assert_eq!(
        operation.get("operationId"),
        Some(&SchemaNode::string("get_commodities_prices_by_commodity"))
    );
    assert_eq!(
        resolve_path(
            reloaded.root(),
            &["components", "schemas", "GetCommoditiesPricesOkResponse", "properties", "data", "items"],
        ),
        Some(&SchemaNode::reference("CommodityPrice"))
    );
}
