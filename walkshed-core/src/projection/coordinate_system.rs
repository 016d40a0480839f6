use geo::Coord;

use super::{utm, web_mercator, ProjectionError};
use crate::collection::{Crs, WGS84_EPSG};

const WEB_MERCATOR_EPSG: u32 = 3857;

/// the coordinate systems that collections may be reprojected between. every
/// transform pivots through WGS84 geographic coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// EPSG:4326, longitude/latitude in degrees
    Geographic,
    /// EPSG:3857, spherical Mercator in meters
    WebMercator,
    /// EPSG:326xx / 327xx, WGS84 UTM zone in meters
    Utm { zone: u32, north: bool },
}

impl TryFrom<Crs> for Projection {
    type Error = ProjectionError;

    fn try_from(crs: Crs) -> Result<Self, Self::Error> {
        match crs.epsg() {
            WGS84_EPSG => Ok(Projection::Geographic),
            WEB_MERCATOR_EPSG => Ok(Projection::WebMercator),
            code => utm::parse_utm_epsg(code)
                .map(|(zone, north)| Projection::Utm { zone, north })
                .ok_or(ProjectionError::UnsupportedEpsg(code)),
        }
    }
}

impl Projection {
    pub fn name(&self) -> String {
        match self {
            Projection::Geographic => String::from("EPSG:4326"),
            Projection::WebMercator => String::from("EPSG:3857"),
            Projection::Utm { zone, north: true } => format!("EPSG:{}", 32600 + zone),
            Projection::Utm { zone, north: false } => format!("EPSG:{}", 32700 + zone),
        }
    }

    /// projected coordinate to longitude/latitude degrees
    pub fn to_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let (x, y) = match self {
            Projection::Geographic => (coord.x, coord.y),
            Projection::WebMercator => web_mercator::web_mercator_to_wgs84(coord.x, coord.y),
            Projection::Utm { zone, north } => utm::utm_to_wgs84(coord.x, coord.y, *zone, *north),
        };
        self.check(coord, x, y)
    }

    /// longitude/latitude degrees to projected coordinate
    pub fn from_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        if coord.y.abs() > 90.0 || coord.x.abs() > 180.0 {
            return Err(self.out_of_domain(coord));
        }
        let (x, y) = match self {
            Projection::Geographic => (coord.x, coord.y),
            Projection::WebMercator => {
                if coord.y.abs() > web_mercator::MAX_LATITUDE {
                    return Err(self.out_of_domain(coord));
                }
                web_mercator::wgs84_to_web_mercator(coord.x, coord.y)
            }
            Projection::Utm { zone, north } => utm::wgs84_to_utm(coord.x, coord.y, *zone, *north),
        };
        self.check(coord, x, y)
    }

    /// moves a coordinate from this projection into another
    pub fn transform(
        &self,
        coord: Coord<f64>,
        to: &Projection,
    ) -> Result<Coord<f64>, ProjectionError> {
        if self == to {
            return Ok(coord);
        }
        let geographic = self.to_geographic(coord)?;
        to.from_geographic(geographic)
    }

    fn check(&self, input: Coord<f64>, x: f64, y: f64) -> Result<Coord<f64>, ProjectionError> {
        if x.is_finite() && y.is_finite() {
            Ok(Coord { x, y })
        } else {
            Err(self.out_of_domain(input))
        }
    }

    fn out_of_domain(&self, coord: Coord<f64>) -> ProjectionError {
        ProjectionError::OutOfDomain(coord.x, coord.y, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_codes() {
        assert_eq!(
            Projection::try_from(Crs::from_epsg(32610)).unwrap(),
            Projection::Utm {
                zone: 10,
                north: true
            }
        );
        assert_eq!(
            Projection::try_from(Crs::wgs84()).unwrap(),
            Projection::Geographic
        );
        assert_eq!(
            Projection::try_from(Crs::from_epsg(3857)).unwrap(),
            Projection::WebMercator
        );
        assert!(matches!(
            Projection::try_from(Crs::from_epsg(3031)),
            Err(ProjectionError::UnsupportedEpsg(3031))
        ));
    }

    #[test]
    fn web_mercator_to_utm_passes_through_geographic() {
        let web = Projection::WebMercator;
        let utm = Projection::Utm {
            zone: 10,
            north: true,
        };
        let lonlat = Coord {
            x: -122.292986,
            y: 47.732567,
        };
        let mercator = web.from_geographic(lonlat).unwrap();
        let projected = web.transform(mercator, &utm).unwrap();
        let expected = utm.from_geographic(lonlat).unwrap();
        assert!((projected.x - expected.x).abs() < 1e-3);
        assert!((projected.y - expected.y).abs() < 1e-3);
    }

    #[test]
    fn rejects_invalid_latitude() {
        let result = Projection::WebMercator.from_geographic(Coord { x: 0.0, y: 89.0 });
        assert!(matches!(result, Err(ProjectionError::OutOfDomain(..))));
        let result = Projection::Geographic.from_geographic(Coord { x: 0.0, y: 91.0 });
        assert!(result.is_err());
    }
}
