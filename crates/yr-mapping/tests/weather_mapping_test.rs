//! Integration tests mapping forecast documents with the built-in weather schema.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::fs;
use std::path::PathBuf;
use yr_ir::{Document, Record, Value};
use yr_mapping::{EmptyMatchPolicy, Error, Mapper, MappingConfig};
use yr_schema::{weather_schema, SECTIONS};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../testdata/forecast.xml")
}

fn load_fixture() -> Document {
    let xml = fs::read_to_string(fixture_path()).expect("fixture should be readable");
    Document::parse_str(&xml).expect("fixture should be well-formed")
}

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn section<'a>(record: &'a Record, name: &str) -> &'a Record {
    record[name]
        .as_record()
        .unwrap_or_else(|| panic!("section '{name}' should be a record"))
}

const SINGLE_TIME: &str = r#"<weatherdata>
  <location><name>Bergen</name><type>City</type><country>Norway</country>
    <timezone id="CET" utcoffsetMinutes="60"/>
    <location altitude="3" latitude="60.39" longitude="5.32" geobase="geonames" geobaseid="3161732"/>
  </location>
  <credit><link text="yr.no" url="http://www.yr.no/"/></credit>
  <sun set="2012-01-01T15:20:00"/>
  <forecast><tabular>
    <time from="2012-01-01T06:00:00" to="2012-01-01T12:00:00" period="1">
      <symbol number="1" name="Clear sky" var="01d"/>
      <precipitation value="0"/>
      <windDirection deg="90.0" code="E" name="East"/>
      <windSpeed mps="2.1" name="Light breeze"/>
      <temperature unit="celsius" value="-2"/>
      <pressure unit="hPa" value="1020.0"/>
    </time>
  </tabular></forecast>
</weatherdata>"#;

#[test]
fn test_document_has_exactly_four_sections() -> anyhow::Result<()> {
    let record = Mapper::new().convert_document(&load_fixture(), weather_schema())?;

    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    let mut expected = SECTIONS.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
    Ok(())
}

#[test]
fn test_location_section() -> anyhow::Result<()> {
    let record = Mapper::new().convert_document(&load_fixture(), weather_schema())?;
    let location = section(&record, "location");

    assert_eq!(location["name"], Value::from("Malmö"));
    assert_eq!(location["type"], Value::from("Populated place"));
    assert_eq!(location["country"], Value::from("Sweden"));

    let timezone = section(location, "timezone");
    assert_eq!(timezone["id"], Value::from("Europe/Stockholm"));
    assert_eq!(timezone["utcoffsetMinutes"], Value::Duration(TimeDelta::hours(1)));

    let position = section(location, "location");
    assert_eq!(position["altitude"], Value::Float(12.0));
    assert_eq!(position["latitude"], Value::Float(55.60587));
    assert_eq!(position["geobase"], Value::from("geonames"));
    assert_eq!(position["geobaseid"], Value::Integer(2_692_969));
    Ok(())
}

#[test]
fn test_credit_and_sun_sections() -> anyhow::Result<()> {
    let record = Mapper::new().convert_document(&load_fixture(), weather_schema())?;

    let link = section(section(&record, "credit"), "link");
    assert_eq!(link["url"], Value::from("http://www.yr.no/place/Sweden/Scania/Malmö/"));

    let sun = section(&record, "sun");
    assert_eq!(sun["rise"], Value::Timestamp(timestamp(2012, 1, 1, 8, 31, 25)));
    assert_eq!(sun["set"], Value::Timestamp(timestamp(2012, 1, 1, 15, 49, 6)));
    Ok(())
}

#[test]
fn test_repeated_time_nodes_become_ordered_list() -> anyhow::Result<()> {
    let record = Mapper::new().convert_document(&load_fixture(), weather_schema())?;
    let forecast = record["forecast"]
        .as_list()
        .expect("three time nodes should map to a list");

    assert_eq!(forecast.len(), 3);
    let periods: Vec<i64> = forecast.iter().filter_map(|t| t["period"].as_i64()).collect();
    assert_eq!(periods, vec![1, 2, 3]);

    let first = &forecast[0];
    assert_eq!(first["from"], Value::Timestamp(timestamp(2012, 1, 1, 6, 0, 0)));
    assert_eq!(first["to"], Value::Timestamp(timestamp(2012, 1, 1, 12, 0, 0)));
    assert_eq!(section(first, "symbol")["number"], Value::Integer(9));
    assert_eq!(section(first, "symbol")["var"], Value::from("09"));
    assert_eq!(section(first, "precipitation")["maxvalue"], Value::Float(2.3));
    assert_eq!(section(first, "windDirection")["code"], Value::from("SW"));
    assert_eq!(section(first, "windSpeed")["mps"], Value::Float(12.9));
    assert_eq!(section(first, "temperature")["unit"], Value::from("celsius"));
    assert_eq!(section(first, "pressure")["value"], Value::Float(1001.2));

    // precipitation without min/max keeps the keys as empty text
    let second_precipitation = section(&forecast[1], "precipitation");
    assert_eq!(second_precipitation["value"], Value::Float(0.0));
    assert!(second_precipitation["minvalue"].is_empty_text());
    assert!(second_precipitation["maxvalue"].is_empty_text());
    Ok(())
}

#[test]
fn test_single_time_node_becomes_bare_record() -> anyhow::Result<()> {
    let document = Document::parse_str(SINGLE_TIME)?;
    let record = Mapper::new().convert_document(&document, weather_schema())?;

    let forecast = record["forecast"]
        .as_record()
        .expect("a single time node should map to a record");
    assert_eq!(forecast["period"], Value::Integer(1));
    assert_eq!(section(forecast, "temperature")["value"], Value::Float(-2.0));

    let timezone = section(section(&record, "location"), "timezone");
    assert_eq!(timezone["id"], Value::from("CET"));
    assert_eq!(timezone["utcoffsetMinutes"], Value::Duration(TimeDelta::minutes(60)));
    Ok(())
}

#[test]
fn test_missing_sun_rise_is_empty_text() -> anyhow::Result<()> {
    let document = Document::parse_str(SINGLE_TIME)?;
    let record = Mapper::new().convert_document(&document, weather_schema())?;

    let sun = section(&record, "sun");
    assert_eq!(sun["rise"], Value::from(""));
    assert!(sun["set"].as_timestamp().is_some());
    Ok(())
}

#[test]
fn test_missing_location_section_is_not_found() {
    let xml = SINGLE_TIME.replace("<location><name>", "<place><name>").replacen(
        "</location>\n  <credit>",
        "</place>\n  <credit>",
        1,
    );
    let document = Document::parse_str(&xml).expect("edited fixture should stay well-formed");

    let result = Mapper::new().convert_document(&document, weather_schema());
    match result {
        Err(Error::NotFound { path }) => assert_eq!(path, "weatherdata/location"),
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

#[test]
fn test_missing_forecast_with_empty_list_policy() -> anyhow::Result<()> {
    let xml = r#"<weatherdata>
      <location><timezone/><location/></location>
      <credit><link/></credit>
      <sun/>
      <forecast><tabular/></forecast>
    </weatherdata>"#;
    let document = Document::parse_str(xml)?;
    let mapper = Mapper::with_config(MappingConfig::new().empty_match(EmptyMatchPolicy::EmptyList));

    let record = mapper.convert_document(&document, weather_schema())?;
    assert_eq!(record["forecast"], Value::List(Vec::new()));
    assert!(section(&record, "location")["name"].is_empty_text());
    Ok(())
}

#[test]
fn test_unparsable_number_aborts_mapping() {
    let xml = SINGLE_TIME.replace(r#"period="1""#, r#"period="first""#);
    let document = Document::parse_str(&xml).expect("edited fixture should stay well-formed");

    let result = Mapper::new().convert_document(&document, weather_schema());
    match result {
        Err(Error::Conversion { path, .. }) => {
            assert_eq!(path, "weatherdata/forecast/tabular/time/@period");
        }
        other => panic!("Expected Conversion error, got {other:?}"),
    }
}

#[test]
fn test_mapping_is_deterministic() -> anyhow::Result<()> {
    let document = load_fixture();
    let mapper = Mapper::new();

    let first = mapper.convert_document(&document, weather_schema())?;
    let second = mapper.convert_document(&document, weather_schema())?;
    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}
