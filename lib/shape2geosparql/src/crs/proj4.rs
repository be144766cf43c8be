//! Derivation of PROJ.4 definitions from WKT reference systems.

use std::fmt::Write;

/// Datums that are realized close enough to WGS 84 to use a null shift.
const WGS84_COMPATIBLE_DATUMS: &[&str] = &[
    "wgs1984",
    "dwgs1984",
    "wgs84",
    "worldgeodeticsystem1984",
    "northamerican1983",
    "dnorthamerican1983",
    "etrs1989",
    "detrs1989",
    "europeanterrestrialreferencesystem1989",
    "gda94",
    "dgda1994",
    "geocentricdatumofaustralia1994",
];

const LONGITUDE_OF_ORIGIN: &[&str] = &[
    "centralmeridian",
    "longitudeofcenter",
    "longitudeoforigin",
    "longitudeofnaturalorigin",
    "longitudeoffalseorigin",
];
const LATITUDE_OF_ORIGIN: &[&str] = &[
    "latitudeoforigin",
    "latitudeofcenter",
    "latitudeofnaturalorigin",
    "latitudeoffalseorigin",
];
const SCALE_FACTOR: &[&str] = &["scalefactor", "scalefactoratnaturalorigin"];
const STANDARD_PARALLEL_1: &[&str] = &["standardparallel1", "latitudeof1ststandardparallel"];
const STANDARD_PARALLEL_2: &[&str] = &["standardparallel2", "latitudeof2ndstandardparallel"];
const FALSE_EASTING: &[&str] = &["falseeasting", "eastingatfalseorigin"];
const FALSE_NORTHING: &[&str] = &["falsenorthing", "northingatfalseorigin"];

/// Builds the PROJ.4 definition of a `GEOGCS` or `PROJCS` WKT definition.
///
/// Returns `None` if the definition can't be parsed or uses an unknown projection or datum layout.
pub fn from_wkt(wkt: &str) -> Option<String> {
    let mut input = wkt.trim();
    let root = Node::parse(&mut input)?;
    match normalize(root.keyword).as_str() {
        "geogcs" => {
            let mut definition = String::from("+proj=longlat");
            push_datum(&mut definition, &root)?;
            definition.push_str(" +no_defs");
            Some(definition)
        }
        "projcs" => projected(&root),
        _ => None,
    }
}

/// Checks if a PROJ.4 definition describes geographic coordinates.
pub fn is_geographic(definition: &str) -> bool {
    definition.split_whitespace().any(|token| {
        matches!(
            token,
            "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"
        )
    })
}

fn projected(projcs: &Node<'_>) -> Option<String> {
    let geogcs = projcs.child("GEOGCS")?;
    let projection = normalize(projcs.child("PROJECTION")?.name()?);
    let name = match projection.as_str() {
        "transversemercator" | "gausskruger" => "tmerc",
        "mercator" | "mercator1sp" | "mercator2sp" => "merc",
        "lambertconformalconic" | "lambertconformalconic1sp" | "lambertconformalconic2sp" => {
            "lcc"
        }
        "lambertazimuthalequalarea" => "laea",
        "albers" | "albersconicequalarea" => "aea",
        "polarstereographic" | "stereographicnorthpole" | "stereographicsouthpole" => "stere",
        "obliquestereographic" | "doublestereographic" => "sterea",
        _ => return None,
    };
    let to_meter = projcs
        .child("UNIT")
        .and_then(|unit| unit.number(1))
        .unwrap_or(1.);

    let parameters = projcs
        .children("PARAMETER")
        .filter_map(|parameter| Some((normalize(parameter.name()?), parameter.number(1)?)))
        .collect::<Vec<_>>();
    let parameter = |names: &[&str]| {
        parameters
            .iter()
            .find(|(name, _)| names.contains(&name.as_str()))
            .map(|(_, value)| *value)
    };
    let mut lat_0 = parameter(LATITUDE_OF_ORIGIN);
    let mut lat_1 = parameter(STANDARD_PARALLEL_1);
    let mut lat_ts = None;
    match name {
        "merc" => lat_ts = lat_1.take(),
        "lcc" if lat_1.is_none() => lat_1 = lat_0,
        "stere" => {
            let latitude = lat_1.take().or(lat_0).unwrap_or(90.);
            lat_ts = Some(latitude);
            lat_0 = Some(if latitude < 0. { -90. } else { 90. });
        }
        _ => (),
    }

    let mut definition = format!("+proj={name}");
    let values = [
        ("lat_0", lat_0),
        ("lon_0", parameter(LONGITUDE_OF_ORIGIN)),
        ("lat_1", lat_1),
        ("lat_2", parameter(STANDARD_PARALLEL_2)),
        ("lat_ts", lat_ts),
        ("k_0", parameter(SCALE_FACTOR)),
        ("x_0", parameter(FALSE_EASTING).map(|v| v * to_meter)),
        ("y_0", parameter(FALSE_NORTHING).map(|v| v * to_meter)),
    ];
    for (key, value) in values {
        if let Some(value) = value {
            write!(definition, " +{key}={value}").ok()?;
        }
    }
    push_datum(&mut definition, geogcs)?;
    if to_meter == 1. {
        definition.push_str(" +units=m");
    } else {
        write!(definition, " +to_meter={to_meter}").ok()?;
    }
    definition.push_str(" +no_defs");
    Some(definition)
}

fn push_datum(definition: &mut String, geogcs: &Node<'_>) -> Option<()> {
    let datum = geogcs.child("DATUM")?;
    let spheroid = datum.child("SPHEROID").or_else(|| datum.child("ELLIPSOID"))?;
    let semi_major_axis = spheroid.number(1)?;
    let inverse_flattening = spheroid.number(2)?;
    if inverse_flattening == 0. {
        write!(definition, " +a={semi_major_axis} +b={semi_major_axis}").ok()?;
    } else {
        write!(definition, " +a={semi_major_axis} +rf={inverse_flattening}").ok()?;
    }
    if let Some(to_wgs84) = datum.child("TOWGS84") {
        let parameters = to_wgs84
            .values
            .iter()
            .filter_map(|value| match value {
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();
        if matches!(parameters.len(), 3 | 7) {
            write!(definition, " +towgs84={}", parameters.join(",")).ok()?;
        }
    } else if datum
        .name()
        .is_some_and(|name| WGS84_COMPATIBLE_DATUMS.contains(&normalize(name).as_str()))
    {
        definition.push_str(" +towgs84=0,0,0");
    }
    if let Some(longitude) = geogcs
        .child("PRIMEM")
        .and_then(|primem| primem.number(1))
        .filter(|longitude| *longitude != 0.)
    {
        write!(definition, " +pm={longitude}").ok()?;
    }
    Some(())
}

/// Lowercase ASCII alphanumeric form of a WKT name, e.g. `standardparallel1` for `Standard_Parallel_1`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A `KEYWORD[value, ...]` WKT element.
#[derive(Debug)]
struct Node<'a> {
    keyword: &'a str,
    values: Vec<Value<'a>>,
}

#[derive(Debug)]
enum Value<'a> {
    Node(Node<'a>),
    Text(String),
    Number(f64),
}

impl<'a> Node<'a> {
    /// Parses the node at the start of `input` and advances `input` after it.
    fn parse(input: &mut &'a str) -> Option<Self> {
        let keyword = take_identifier(input)?;
        let close = match input.trim_start().chars().next()? {
            '[' => ']',
            '(' => ')',
            _ => return None,
        };
        *input = &input.trim_start()[1..];
        let mut values = Vec::new();
        loop {
            *input = input.trim_start();
            if let Some(rest) = input.strip_prefix(close) {
                *input = rest;
                return Some(Self { keyword, values });
            }
            if !values.is_empty() {
                *input = input.strip_prefix(',')?.trim_start();
            }
            values.push(Value::parse(input)?);
        }
    }

    /// The first text value, i.e. the name for most elements.
    fn name(&self) -> Option<&str> {
        self.values.iter().find_map(|value| match value {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    fn number(&self, position: usize) -> Option<f64> {
        match self.values.get(position)? {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    fn children(&self, keyword: &'static str) -> impl Iterator<Item = &Node<'a>> {
        self.values.iter().filter_map(move |value| match value {
            Value::Node(node) if node.keyword.eq_ignore_ascii_case(keyword) => Some(node),
            _ => None,
        })
    }

    fn child(&self, keyword: &'static str) -> Option<&Node<'a>> {
        self.children(keyword).next()
    }
}

impl<'a> Value<'a> {
    fn parse(input: &mut &'a str) -> Option<Self> {
        if let Some(rest) = input.strip_prefix('"') {
            let mut text = String::new();
            let mut rest = rest;
            loop {
                let end = rest.find('"')?;
                text.push_str(&rest[..end]);
                rest = &rest[end + 1..];
                // "" is an escaped quote
                match rest.strip_prefix('"') {
                    Some(after) => {
                        text.push('"');
                        rest = after;
                    }
                    None => break,
                }
            }
            *input = rest;
            return Some(Self::Text(text));
        }
        if input.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let mut lookahead = *input;
            take_identifier(&mut lookahead)?;
            if lookahead.trim_start().starts_with(['[', '(']) {
                return Node::parse(input).map(Self::Node);
            }
            // Bare enumeration values like the EAST of AXIS["Easting",EAST]
            return take_identifier(input).map(|identifier| Self::Text(identifier.into()));
        }
        let end = input
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .unwrap_or(input.len());
        let number = input[..end].parse().ok()?;
        *input = &input[end..];
        Some(Self::Number(number))
    }
}

fn take_identifier<'a>(input: &mut &'a str) -> Option<&'a str> {
    let trimmed = input.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    let (identifier, rest) = trimmed.split_at(end);
    *input = rest;
    Some(identifier)
}
