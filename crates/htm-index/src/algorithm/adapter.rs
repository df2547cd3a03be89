//! Geography Adapter: flattens a host geography value into the
//! vertex sequences the seed generator and region builder consume.

use crate::error::IndexError;
use geo_types::{Geometry, Polygon};
use htm_types::CartesianPoint;

/// Depth-first walks `geom`, calling `visit` once per `Polygon` leaf. Holes
/// are visited as part of the same `Polygon`, not separately — callers that
/// only need vertices (not ring structure) flatten further themselves.
///
/// Rejects every non-polygonal leaf (`LineString`, `Point`, `CircularString`
/// equivalents, etc. — geo-types has no curve primitives, so `Line` and
/// `Rect` round out the rejection list) and rejects a
/// nested `MultiPolygon` rather than silently skipping it, to preserve
/// vertex-ordering guarantees.
pub(crate) fn for_each_polygon(
    geom: &Geometry<f64>,
    visit: &mut dyn FnMut(&Polygon<f64>) -> Result<(), IndexError>,
) -> Result<(), IndexError> {
    match geom {
        Geometry::Polygon(p) => visit(p),
        Geometry::MultiPolygon(mp) => {
            for p in mp.iter() {
                visit(p)?;
            }
            Ok(())
        }
        Geometry::GeometryCollection(gc) => {
            for g in gc.iter() {
                for_each_polygon(g, visit)?;
            }
            Ok(())
        }
        other => Err(IndexError::UnsupportedGeometry {
            found: geometry_variant_name(other),
        }),
    }
}

fn geometry_variant_name(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Flattens every vertex (exterior ring and holes, in visitation order) of
/// every polygon leaf reachable from `geom` into a single list, for hull
/// construction. Holes are not distinguished in the output — the hull
/// generator is orientation-agnostic.
pub fn vertices_of(geom: &Geometry<f64>) -> Result<Vec<CartesianPoint>, IndexError> {
    let mut out = Vec::new();
    for_each_polygon(geom, &mut |polygon| {
        for coord in polygon.exterior().coords() {
            out.push(CartesianPoint::from_lonlat_deg(coord.x, coord.y));
        }
        for hole in polygon.interiors() {
            for coord in hole.coords() {
                out.push(CartesianPoint::from_lonlat_deg(coord.x, coord.y));
            }
        }
        Ok(())
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point, polygon, Geometry};

    #[test]
    fn flattens_single_polygon() {
        let poly: Geometry<f64> = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
        .into();
        let verts = vertices_of(&poly).unwrap();
        assert_eq!(verts.len(), 5);
    }

    #[test]
    fn rejects_point() {
        let geom: Geometry<f64> = point! { x: 1.0, y: 2.0 }.into();
        let err = vertices_of(&geom).unwrap_err();
        assert_eq!(err, IndexError::UnsupportedGeometry { found: "Point" });
    }

    #[test]
    fn rejects_line_string() {
        let geom: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into();
        assert!(matches!(
            vertices_of(&geom),
            Err(IndexError::UnsupportedGeometry { found: "LineString" })
        ));
    }
}
