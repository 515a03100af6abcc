//! Schema for yr.no `forecast.xml` documents
//!
//! Top-level sections are nested fields of one schema applied to the
//! document's root element (`weatherdata`).

use crate::conversion::Conversion::{Float, Integer, Minutes, Text, Timestamp};
use crate::model::Schema;
use std::sync::LazyLock;

/// Top-level section names, in the order they appear in a document
pub const SECTIONS: [&str; 4] = ["location", "credit", "sun", "forecast"];

static WEATHER_SCHEMA: LazyLock<Schema> = LazyLock::new(build_weather_schema);

/// The schema for a complete forecast document
pub fn weather_schema() -> &'static Schema {
    &WEATHER_SCHEMA
}

fn build_weather_schema() -> Schema {
    Schema::new()
        .nested("location", "location", location())
        .nested("credit", "credit", credit())
        .nested("sun", "sun", sun())
        .nested("forecast", "forecast/tabular/time", time())
}

fn location() -> Schema {
    let timezone = Schema::new()
        .field("@id", Text)
        .field("@utcoffsetMinutes", Minutes);

    let position = Schema::new()
        .field("@altitude", Float)
        .field("@latitude", Float)
        .field("@longitude", Float)
        .field("@geobase", Text)
        .field("@geobaseid", Integer);

    Schema::new()
        .field("name", Text)
        .field("type", Text)
        .field("country", Text)
        .nested("timezone", "timezone", timezone)
        .nested("location", "location", position)
}

fn credit() -> Schema {
    let link = Schema::new().field("@text", Text).field("@url", Text);
    Schema::new().nested("link", "link", link)
}

fn sun() -> Schema {
    Schema::new().field("@rise", Timestamp).field("@set", Timestamp)
}

fn time() -> Schema {
    let symbol = Schema::new()
        .field("@number", Integer)
        .field("@name", Text)
        .field("@var", Text);

    let precipitation = Schema::new()
        .field("@value", Float)
        .field("@minvalue", Float)
        .field("@maxvalue", Float);

    let temperature = Schema::new().field("@unit", Text).field("@value", Float);

    let pressure = Schema::new().field("@unit", Text).field("@value", Float);

    let wind_speed = Schema::new().field("@mps", Float).field("@name", Text);

    let wind_direction = Schema::new()
        .field("@deg", Float)
        .field("@code", Text)
        .field("@name", Text);

    Schema::new()
        .field("@from", Timestamp)
        .field("@to", Timestamp)
        .field("@period", Integer)
        .nested("symbol", "symbol", symbol)
        .nested("precipitation", "precipitation", precipitation)
        .nested("temperature", "temperature", temperature)
        .nested("pressure", "pressure", pressure)
        .nested("windSpeed", "windSpeed", wind_speed)
        .nested("windDirection", "windDirection", wind_direction)
}
