use anyhow::Context;
use graphbound::{
    hook_fn, ConstructOptions, Literal, NamedNode, RegistryBuilder, RegistryConfig,
    ResourceValidator,
};
use tracing::info;

const DEMO_CONFIG: &str = r#"
prefixes:
  org: "http://www.w3.org/ns/org#"
classes:
  - name: Person
    default_graph: "http://swirrl.com/graph/people"
    rdf_type: "foaf:Person"
  - name: Employee
    parent: Person
    rdf_type: "org:Membership"
"#;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("graphbound v{}", graphbound::version());
    println!("==========================================");

    // Optional path to a YAML/JSON class config
    let config = match std::env::args().nth(1) {
        Some(path) => RegistryConfig::from_path(&path)
            .with_context(|| format!("loading class config from {}", path))?,
        None => RegistryConfig::from_yaml_str(DEMO_CONFIG)?,
    };

    let mut builder = RegistryBuilder::new();
    config.apply(&mut builder)?;

    if let Some(person) = builder.class_id("Person") {
        let name = NamedNode::new("http://xmlns.com/foaf/0.1/name")?;
        builder.around_initialize(
            person,
            hook_fn("default-name", move |resource, next| {
                resource.set_literal(&name, Literal::new_simple_literal("Anonymous"));
                next.run(resource)
            }),
        )?;
    }
    let registry = builder.build()?;
    info!("Registry ready: {:?}", registry);

    let validator = ResourceValidator::new();
    let demos = [
        ("Person", "http://swirrl.com/ric.rdf#me", ConstructOptions::default()),
        ("Person", "http://swirrl.com/ric.rdf#me", ConstructOptions::with_graph("http://other/graph")),
        ("Employee", "http://swirrl.com/bill.rdf#me", ConstructOptions::default()),
        ("Person", "http://swirrl.com/nobody", ConstructOptions::ignoring_graph()),
    ];

    for (class, uri, options) in demos {
        let resource = match registry.construct_named(class, Some(uri), options) {
            Ok(resource) => resource,
            Err(e) => {
                println!("✗ {} {}: {}", class, uri, e);
                continue;
            }
        };

        println!("\n✓ Constructed {} {}", class, resource.uri());
        println!(
            "  graph:  {}",
            resource
                .graph_uri()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
        println!("  new:    {}", resource.is_new_record());
        println!("  key:    {:?}", resource.key());
        for triple in resource.repository().iter() {
            println!("  triple: {}", triple);
        }
        match validator.validate(&resource) {
            Ok(()) => println!("  valid:  yes"),
            Err(errors) => println!("  valid:  no ({})", errors),
        }
    }

    match registry.construct_named("Person", None, ConstructOptions::default()) {
        Ok(_) => println!("\nunexpected: constructed a resource without a URI"),
        Err(e) => println!("\n✗ Person without URI: {}", e),
    }

    Ok(())
}
