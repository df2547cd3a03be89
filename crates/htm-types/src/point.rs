#[cfg(feature = "approx")]
use approx::{AbsDiffEq, RelativeEq};

/// A single point on the unit sphere S², stored as a Cartesian unit vector.
///
/// Unlike a bare `(x, y, z)` tuple, `CartesianPoint` carries the invariant that
/// it has been normalized: it is only ever constructed through [`CartesianPoint::new`]
/// (which normalizes) or [`CartesianPoint::from_lonlat_deg`].
///
/// # Examples
///
/// ```
/// use htm_types::CartesianPoint;
///
/// let north_pole = CartesianPoint::from_lonlat_deg(0.0, 90.0);
/// assert!((north_pole.dec_deg() - 90.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    /// Builds a point from raw coordinates, normalizing onto S².
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }.normalized()
    }

    /// Builds a point from a (longitude, latitude) pair in degrees, as delivered
    /// by the host's geography value (WGS-84 lon/lat).
    pub fn from_lonlat_deg(lon_deg: f64, lat_deg: f64) -> Self {
        let lon = lon_deg.to_radians();
        let lat = lat_deg.to_radians();
        let cos_lat = lat.cos();
        Self {
            x: cos_lat * lon.cos(),
            y: cos_lat * lon.sin(),
            z: lat.sin(),
        }
        .normalized()
    }

    /// Declination / latitude in degrees, in `[-90, 90]`.
    pub fn dec_deg(&self) -> f64 {
        self.z.clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// Right ascension / longitude in degrees, in `[0, 360)`.
    pub fn ra_deg(&self) -> f64 {
        let ra = self.y.atan2(self.x).to_degrees();
        if ra < 0.0 {
            ra + 360.0
        } else {
            ra
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Re-normalizes onto S². Leaves the zero vector untouched (a degenerate
    /// case callers must guard against before relying on the result).
    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            self
        } else {
            Self {
                x: self.x / n,
                y: self.y / n,
                z: self.z / n,
            }
        }
    }

    /// The midpoint of the great-circle arc between `self` and `other`,
    /// renormalized onto S². Used by trixel subdivision.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
        .normalized()
    }

    /// Angular separation from `other`, in degrees.
    pub fn angle_to_deg(&self, other: &Self) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl std::ops::Add for CartesianPoint {
    type Output = CartesianPoint;
    fn add(self, rhs: CartesianPoint) -> CartesianPoint {
        CartesianPoint {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl std::ops::Sub for CartesianPoint {
    type Output = CartesianPoint;
    fn sub(self, rhs: CartesianPoint) -> CartesianPoint {
        CartesianPoint {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl std::ops::Mul<f64> for CartesianPoint {
    type Output = CartesianPoint;
    fn mul(self, rhs: f64) -> CartesianPoint {
        CartesianPoint {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

#[cfg(feature = "approx")]
impl AbsDiffEq for CartesianPoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

#[cfg(feature = "approx")]
impl RelativeEq for CartesianPoint {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f64::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lonlat_roundtrip() {
        let p = CartesianPoint::from_lonlat_deg(-21.8174, 64.1265);
        assert!((p.ra_deg() - (360.0 - 21.8174)).abs() < 1e-9);
        assert!((p.dec_deg() - 64.1265).abs() < 1e-9);
    }

    #[test]
    fn normalized_unit_length() {
        let p = CartesianPoint::new(3.0, 4.0, 0.0);
        assert!((p.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equator_prime_meridian_is_x_axis() {
        let p = CartesianPoint::from_lonlat_deg(0.0, 0.0);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }
}
