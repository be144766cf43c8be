use crate::classify::SimpleFeaturesClass;
use crate::error::ConversionError;
use crate::feature::Feature;
use crate::namespace::Namespaces;
use crate::vocab::{geo, sf};
use oxrdf::vocab::rdf;
use oxrdf::{Literal, NamedNodeRef, Triple};

/// Builds the triples describing one feature and its geometry.
///
/// `class` is the Simple Features class of the geometry and `literals` its serializations
/// as returned by [`encode`](crate::encode).
/// Exactly `4 + fields + literals` triples are returned, null field values are kept as `""`.
///
/// ```
/// use shape2geosparql::{Feature, Namespaces, SimpleFeaturesClass, build};
///
/// let feature = Feature {
///     index: 0,
///     fields: vec![("NAME".into(), "A".into())],
///     geometry: None,
/// };
/// let namespaces = Namespaces::new("http://example.com/data/", "http://example.com/schema/")?;
/// let triples = build(&feature, &namespaces, SimpleFeaturesClass::Point, &[])?;
/// assert_eq!(triples.len(), 5);
/// assert_eq!(
///     triples[1].to_string(),
///     "<http://example.com/data/0> <http://example.com/schema/name> \"A\""
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn build(
    feature: &Feature,
    namespaces: &Namespaces,
    class: SimpleFeaturesClass,
    literals: &[(NamedNodeRef<'static>, Literal)],
) -> Result<Vec<Triple>, ConversionError> {
    let feature_id = namespaces.feature_iri(feature.index);
    let geometry_id = namespaces.geometry_iri(feature.index);
    let mut triples = Vec::with_capacity(4 + feature.fields.len() + literals.len());
    triples.push(Triple::new(feature_id.clone(), rdf::TYPE, sf::FEATURE));
    for (name, value) in &feature.fields {
        triples.push(Triple::new(
            feature_id.clone(),
            namespaces.field_predicate(name)?,
            value.to_literal(),
        ));
    }
    triples.push(Triple::new(feature_id, geo::HAS_GEOMETRY, geometry_id.clone()));
    triples.push(Triple::new(geometry_id.clone(), rdf::TYPE, sf::GEOMETRY));
    triples.push(Triple::new(geometry_id.clone(), rdf::TYPE, class.iri()));
    for (predicate, literal) in literals {
        triples.push(Triple::new(
            geometry_id.clone(),
            *predicate,
            literal.clone(),
        ));
    }
    Ok(triples)
}
