//! External schema resolution against documents on disk.

use std::fs;
use std::path::Path;

use wsdlgen_wsdl::{load, Fetcher, Location};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn wsdl_importing(imports: &str) -> String {
    format!(
        r#"<definitions targetNamespace="urn:svc"
            xmlns="http://schemas.xmlsoap.org/wsdl/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema">
          <types>
            <xsd:schema targetNamespace="urn:svc">
              {imports}
            </xsd:schema>
          </types>
        </definitions>"#
    )
}

#[test]
fn externals_are_fetched_exactly_once() {
    let dir = tempfile::tempdir().unwrap();

    // Two import statements resolve to the same location; the second must
    // be a no-op.
    write(
        dir.path(),
        "service.wsdl",
        &wsdl_importing(
            r#"<xsd:import namespace="urn:a" schemaLocation="a.xsd"/>
               <xsd:import namespace="urn:a" schemaLocation="a.xsd"/>"#,
        ),
    );
    write(
        dir.path(),
        "a.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
             <xsd:import namespace="urn:b" schemaLocation="b.xsd"/>
             <xsd:complexType name="A"/>
           </xsd:schema>"#,
    );
    write(
        dir.path(),
        "b.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:b">
             <xsd:complexType name="B"/>
           </xsd:schema>"#,
    );

    let location = Location::parse(dir.path().join("service.wsdl").to_str().unwrap()).unwrap();
    let document = load(&location, &Fetcher::new(false)).unwrap();

    let namespaces: Vec<&str> = document
        .wsdl
        .schemas
        .iter()
        .map(|s| s.target_namespace.as_str())
        .collect();
    assert_eq!(namespaces, ["urn:svc", "urn:b", "urn:a"]);
}

#[test]
fn include_cycles_terminate() {
    let dir = tempfile::tempdir().unwrap();

    write(
        dir.path(),
        "service.wsdl",
        &wsdl_importing(r#"<xsd:include schemaLocation="a.xsd"/>"#),
    );
    write(
        dir.path(),
        "a.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
             <xsd:include schemaLocation="b.xsd"/>
           </xsd:schema>"#,
    );
    write(
        dir.path(),
        "b.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:b">
             <xsd:include schemaLocation="a.xsd"/>
           </xsd:schema>"#,
    );

    let location = Location::parse(dir.path().join("service.wsdl").to_str().unwrap()).unwrap();
    let document = load(&location, &Fetcher::new(false)).unwrap();

    let mut namespaces: Vec<&str> = document
        .wsdl
        .schemas
        .iter()
        .map(|s| s.target_namespace.as_str())
        .collect();
    namespaces.sort_unstable();
    assert_eq!(namespaces, ["urn:a", "urn:b", "urn:svc"]);
}

#[test]
fn import_without_location_is_skipped() {
    let dir = tempfile::tempdir().unwrap();

    write(
        dir.path(),
        "service.wsdl",
        &wsdl_importing(r#"<xsd:import namespace="urn:nowhere"/>"#),
    );

    let location = Location::parse(dir.path().join("service.wsdl").to_str().unwrap()).unwrap();
    let document = load(&location, &Fetcher::new(false)).unwrap();
    assert_eq!(document.wsdl.schemas.len(), 1);
}

#[test]
fn missing_required_external_aborts() {
    let dir = tempfile::tempdir().unwrap();

    write(
        dir.path(),
        "service.wsdl",
        &wsdl_importing(r#"<xsd:import namespace="urn:a" schemaLocation="missing.xsd"/>"#),
    );

    let location = Location::parse(dir.path().join("service.wsdl").to_str().unwrap()).unwrap();
    assert!(load(&location, &Fetcher::new(false)).is_err());
}
