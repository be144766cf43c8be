use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

mod proj4;

pub(crate) use self::proj4::is_geographic;

/// Spherical Web Mercator, written without the `+nadgrids=@null` grid of the EPSG registry.
const WEB_MERCATOR: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

/// A coordinate reference system.
///
/// It is known either from an [EPSG](https://epsg.org/) code, from a WKT definition
/// (like the content of a Shapefile `.prj` file) or both.
/// When built from a WKT definition, the EPSG code is recovered if the definition carries
/// an `AUTHORITY["EPSG", ...]` clause or if it uses one of the ESRI names of WGS 84,
/// Web Mercator or the WGS 84 UTM zones.
///
/// [`SpatialReference::proj4_definition`] resolves it to a PROJ.4 definition
/// for the reprojection engine.
///
/// ```
/// use shape2geosparql::SpatialReference;
///
/// let prj = r#"PROJCS["WGS_1984_UTM_Zone_33N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],UNIT["Meter",1.0]]"#;
/// assert_eq!(SpatialReference::from_wkt(prj).epsg(), Some(32633));
/// assert!("EPSG:4326".parse::<SpatialReference>()?.is_wgs84());
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpatialReference {
    epsg: Option<u32>,
    wkt: Option<String>,
}

impl SpatialReference {
    /// WGS 84 geographic coordinates, i.e. EPSG:4326.
    pub const WGS84: Self = Self::from_epsg(4326);

    /// Builds a reference system from its EPSG code.
    #[inline]
    pub const fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            wkt: None,
        }
    }

    /// Builds a reference system from a WKT (OGC or ESRI flavor) definition.
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        let wkt = wkt.into();
        Self {
            epsg: epsg_from_wkt(&wkt),
            wkt: Some(wkt),
        }
    }

    /// The EPSG code if known.
    #[inline]
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// The WKT definition if the reference system has been built from one.
    #[inline]
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Checks if both reference systems describe the same coordinates.
    ///
    /// EPSG codes are compared when both are known, the WKT definitions otherwise.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self.epsg, other.epsg) {
            (Some(left), Some(right)) => left == right,
            _ => self.wkt.is_some() && self.wkt == other.wkt,
        }
    }

    /// Checks if this reference system is [`SpatialReference::WGS84`].
    #[inline]
    pub fn is_wgs84(&self) -> bool {
        self.is_equivalent(&Self::WGS84)
    }

    /// The PROJ.4 definition of this reference system.
    ///
    /// EPSG codes are looked up in the registry of the `crs-definitions` crate.
    /// WKT definitions without a known code are converted if they use a common projection.
    ///
    /// ```
    /// use shape2geosparql::SpatialReference;
    ///
    /// let wgs84 = SpatialReference::WGS84.proj4_definition().unwrap_or_default();
    /// assert!(wgs84.starts_with("+proj=longlat"));
    /// assert_eq!(SpatialReference::from_epsg(1).proj4_definition(), None);
    /// ```
    pub fn proj4_definition(&self) -> Option<Cow<'static, str>> {
        if let Some(code) = self.epsg {
            if matches!(code, 3857 | 900_913 | 102_100 | 102_113) {
                return Some(Cow::Borrowed(WEB_MERCATOR));
            }
            if let Some(definition) = u16::try_from(code).ok().and_then(crs_definitions::from_code)
            {
                return Some(Cow::Borrowed(definition.proj4));
            }
        }
        self.wkt.as_deref().and_then(proj4::from_wkt).map(Cow::Owned)
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.epsg {
            write!(f, "EPSG:{code}")
        } else if let Some(wkt) = &self.wkt {
            if let Some((_, name)) = wkt_root(wkt) {
                write!(f, "\"{name}\"")
            } else {
                f.write_str("unnamed reference system")
            }
        } else {
            f.write_str("unknown reference system")
        }
    }
}

impl FromStr for SpatialReference {
    type Err = SpatialReferenceParseError;

    /// Parses `EPSG:<code>` or a WKT definition.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((authority, code)) = s.split_once(':') {
            if authority.eq_ignore_ascii_case("EPSG") {
                return code
                    .trim()
                    .parse()
                    .map(Self::from_epsg)
                    .map_err(|_| SpatialReferenceParseError(s.to_owned()));
            }
        }
        if wkt_root(s).is_some() {
            return Ok(Self::from_wkt(s));
        }
        Err(SpatialReferenceParseError(s.to_owned()))
    }
}

/// An error raised when parsing a [`SpatialReference`] from a string.
#[derive(Debug, thiserror::Error)]
#[error("'{0}' is neither an EPSG:<code> identifier nor a WKT reference system definition")]
pub struct SpatialReferenceParseError(String);

#[expect(clippy::unwrap_used)]
static TOP_LEVEL_EPSG_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)AUTHORITY\[\s*"EPSG"\s*,\s*"?(\d+)"?\s*\]\s*\]\s*$"#).unwrap()
});

#[expect(clippy::unwrap_used)]
static WGS84_UTM_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^WGS[_ ]?(?:19)?84.*UTM[_ ]zone[_ ](\d{1,2})([NS])$").unwrap()
});

fn epsg_from_wkt(wkt: &str) -> Option<u32> {
    if let Some(code) = TOP_LEVEL_EPSG_AUTHORITY
        .captures(wkt)
        .and_then(|c| c.get(1))
        .and_then(|c| c.as_str().parse().ok())
    {
        return Some(code);
    }
    let (keyword, name) = wkt_root(wkt)?;
    let compact = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if keyword.eq_ignore_ascii_case("GEOGCS") {
        return matches!(compact.as_str(), "gcswgs1984" | "wgs84" | "wgs1984").then_some(4326);
    }
    if !keyword.eq_ignore_ascii_case("PROJCS") {
        return None;
    }
    if ["webmercator", "pseudomercator", "mercatorauxiliarysphere"]
        .iter()
        .any(|n| compact.contains(n))
    {
        return Some(3857);
    }
    let captures = WGS84_UTM_ZONE.captures(name.trim())?;
    let zone = captures.get(1)?.as_str().parse::<u32>().ok()?;
    if !(1..=60).contains(&zone) {
        return None;
    }
    let hemisphere = captures.get(2)?.as_str();
    Some(if hemisphere.eq_ignore_ascii_case("S") {
        32700 + zone
    } else {
        32600 + zone
    })
}

/// Returns the root keyword and the name of a WKT definition.
fn wkt_root(wkt: &str) -> Option<(&str, &str)> {
    let (keyword, rest) = wkt.trim_start().split_once('[')?;
    let keyword = keyword.trim();
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('"')?;
    let (name, _) = rest.split_once('"')?;
    Some((keyword, name))
}
