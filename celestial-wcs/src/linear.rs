use celestial_core::angle::wrapped_delta;
use celestial_core::CoordinateKind;

use crate::error::{WcsError, WcsResult};
use crate::header::KeywordProvider;
use crate::transform::Transform;

const DETERMINANT_THRESHOLD: f64 = 1e-15;

/// Affine N-dimensional WCS: `world = crval + M (pixel - crpix)` with
/// `M[i][j] = cdelt[i] * pc[i][j]`.
///
/// This is the in-tree reference [`Transform`]; real projections come from
/// the host's WCS library. Latitude axes outside `[-90, 90]` are reported as
/// out of bounds; longitudes are matched to `crval` the short way round on
/// the inverse mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTransform {
    crpix: Vec<f64>,
    crval: Vec<f64>,
    matrix: Vec<Vec<f64>>,
    inverse: Vec<Vec<f64>>,
    kinds: Vec<CoordinateKind>,
}

impl LinearTransform {
    /// Diagonal transform (identity PC matrix).
    pub fn new(
        crpix: Vec<f64>,
        crval: Vec<f64>,
        cdelt: Vec<f64>,
        kinds: Vec<CoordinateKind>,
    ) -> WcsResult<Self> {
        let n = crpix.len();
        let pc = identity(n);
        Self::with_pc(crpix, crval, cdelt, pc, kinds)
    }

    pub fn with_pc(
        crpix: Vec<f64>,
        crval: Vec<f64>,
        cdelt: Vec<f64>,
        pc: Vec<Vec<f64>>,
        kinds: Vec<CoordinateKind>,
    ) -> WcsResult<Self> {
        let n = crpix.len();
        if n == 0 {
            return Err(WcsError::invalid_keyword("NAXIS", "must be positive"));
        }
        for len in [crval.len(), cdelt.len(), pc.len(), kinds.len()] {
            if len != n {
                return Err(WcsError::dimension_mismatch(n, len));
            }
        }
        if let Some(row) = pc.iter().find(|row| row.len() != n) {
            return Err(WcsError::dimension_mismatch(n, row.len()));
        }

        let matrix: Vec<Vec<f64>> = pc
            .iter()
            .zip(&cdelt)
            .map(|(row, scale)| row.iter().map(|v| v * scale).collect())
            .collect();
        let inverse = invert(&matrix)?;

        Ok(Self {
            crpix,
            crval,
            matrix,
            inverse,
            kinds,
        })
    }

    /// Builds from FITS-style keywords: `NAXIS`, `CTYPEi`, `CRPIXi`,
    /// `CRVALi`, `CDELTi`, `PCi_j`.
    ///
    /// `CRPIXi` is 1-based as in FITS and converted to 0-based pixels.
    /// Missing `CRPIX`/`CRVAL` default to 1/0, `CDELT` to 1 and `PC` to the
    /// identity.
    pub fn from_header(header: &impl KeywordProvider) -> WcsResult<Self> {
        let naxis = header.require_int("NAXIS")?;
        if naxis <= 0 {
            return Err(WcsError::invalid_keyword("NAXIS", "must be positive"));
        }
        let n = naxis as usize;

        let mut crpix = Vec::with_capacity(n);
        let mut crval = Vec::with_capacity(n);
        let mut cdelt = Vec::with_capacity(n);
        let mut kinds = Vec::with_capacity(n);
        for i in 1..=n {
            crpix.push(header.get_float(&format!("CRPIX{i}")).unwrap_or(1.0) - 1.0);
            crval.push(header.get_float(&format!("CRVAL{i}")).unwrap_or(0.0));
            cdelt.push(header.get_float(&format!("CDELT{i}")).unwrap_or(1.0));
            let ctype = header.get_string(&format!("CTYPE{i}")).unwrap_or_default();
            kinds.push(kind_from_ctype(&ctype));
        }

        let mut pc = identity(n);
        for (i, row) in pc.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                if let Some(v) = header.get_float(&format!("PC{}_{}", i + 1, j + 1)) {
                    *value = v;
                }
            }
        }

        Self::with_pc(crpix, crval, cdelt, pc, kinds)
    }

    #[inline]
    pub fn crpix(&self) -> &[f64] {
        &self.crpix
    }

    #[inline]
    pub fn crval(&self) -> &[f64] {
        &self.crval
    }

    fn check_len(&self, values: &[f64]) -> WcsResult<()> {
        if values.len() != self.dims() {
            return Err(WcsError::dimension_mismatch(self.dims(), values.len()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(WcsError::out_of_bounds("non-finite coordinate"));
        }
        Ok(())
    }
}

impl Transform for LinearTransform {
    fn dims(&self) -> usize {
        self.crpix.len()
    }

    fn world_kinds(&self) -> Vec<CoordinateKind> {
        self.kinds.clone()
    }

    fn pixel_to_world(&self, pixel: &[f64]) -> WcsResult<Vec<f64>> {
        self.check_len(pixel)?;
        let offsets: Vec<f64> = pixel.iter().zip(&self.crpix).map(|(p, r)| p - r).collect();
        let world: Vec<f64> = self
            .matrix
            .iter()
            .zip(&self.crval)
            .map(|(row, c)| c + dot(row, &offsets))
            .collect();

        for (value, kind) in world.iter().zip(&self.kinds) {
            if *kind == CoordinateKind::Latitude && value.abs() > 90.0 {
                return Err(WcsError::out_of_bounds(format!(
                    "latitude {value} beyond the pole"
                )));
            }
        }
        Ok(world)
    }

    fn world_to_pixel(&self, world: &[f64]) -> WcsResult<Vec<f64>> {
        self.check_len(world)?;
        let offsets: Vec<f64> = world
            .iter()
            .zip(&self.crval)
            .zip(&self.kinds)
            .map(|((w, c), kind)| match kind {
                CoordinateKind::Longitude { .. } => wrapped_delta(*c, *w),
                _ => w - c,
            })
            .collect();
        Ok(self
            .inverse
            .iter()
            .zip(&self.crpix)
            .map(|(row, r)| r + dot(row, &offsets))
            .collect())
    }
}

/// Maps the leading segment of a CTYPE (`GLON-CAR` -> `GLON`) to a kind.
pub fn kind_from_ctype(ctype: &str) -> CoordinateKind {
    let prefix = ctype.split('-').next().unwrap_or("").trim().to_ascii_uppercase();
    match prefix.as_str() {
        "RA" | "GLON" | "ELON" | "HLON" | "SLON" => CoordinateKind::longitude(),
        "DEC" | "GLAT" | "ELAT" | "HLAT" | "SLAT" => CoordinateKind::Latitude,
        "FREQ" | "WAVE" | "VELO" | "VOPT" | "VRAD" | "ZOPT" | "ENER" | "WAVN" => {
            CoordinateKind::Spectral
        }
        _ => CoordinateKind::Scalar,
    }
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Gauss-Jordan inverse with partial pivoting.
fn invert(m: &[Vec<f64>]) -> WcsResult<Vec<Vec<f64>>> {
    let n = m.len();
    let mut a: Vec<Vec<f64>> = m.to_vec();
    let mut inv = identity(n);
    let mut determinant = 1.0;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < DETERMINANT_THRESHOLD {
            return Err(WcsError::non_invertible_matrix(0.0));
        }
        if pivot != col {
            a.swap(pivot, col);
            inv.swap(pivot, col);
            determinant = -determinant;
        }

        let p = a[col][col];
        determinant *= p;
        for j in 0..n {
            a[col][j] /= p;
            inv[col][j] /= p;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[row][j] -= factor * a[col][j];
                inv[row][j] -= factor * inv[col][j];
            }
        }
    }

    if determinant.abs() < DETERMINANT_THRESHOLD {
        return Err(WcsError::non_invertible_matrix(determinant));
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::KeywordMap;

    fn celestial_2d() -> LinearTransform {
        LinearTransform::new(
            vec![50.0, 50.0],
            vec![0.0, 0.0],
            vec![-0.01, 0.01],
            vec![CoordinateKind::longitude(), CoordinateKind::Latitude],
        )
        .unwrap()
    }

    #[test]
    fn test_known_values() {
        let t = celestial_2d();
        let world = t.pixel_to_world(&[0.0, 0.0]).unwrap();
        assert!((world[0] - 0.5).abs() < 1e-12);
        assert!((world[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_pixel_world_pixel() {
        let t = LinearTransform::with_pc(
            vec![10.0, 20.0, 5.0],
            vec![266.4, -28.9, 1.4e9],
            vec![-0.002, 0.002, 1.0e6],
            vec![
                vec![0.9, 0.1, 0.0],
                vec![-0.1, 0.9, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            vec![
                CoordinateKind::longitude(),
                CoordinateKind::Latitude,
                CoordinateKind::Spectral,
            ],
        )
        .unwrap();

        let pixel = [12.5, 31.25, 7.0];
        let world = t.pixel_to_world(&pixel).unwrap();
        let back = t.world_to_pixel(&world).unwrap();
        for (a, b) in pixel.iter().zip(&back) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_world_to_pixel_takes_short_way_round() {
        let t = celestial_2d();
        let pixel = t.world_to_pixel(&[359.9, 0.0]).unwrap();
        assert!((pixel[0] - 60.0).abs() < 1e-9);
        assert!((pixel[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_invertible_matrix() {
        let result = LinearTransform::with_pc(
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![vec![1.0, 2.0], vec![2.0, 4.0]],
            vec![CoordinateKind::Scalar, CoordinateKind::Scalar],
        );
        assert!(matches!(result, Err(WcsError::NonInvertibleMatrix { .. })));
    }

    #[test]
    fn test_dimension_mismatch_on_construction() {
        let result = LinearTransform::new(
            vec![0.0, 0.0],
            vec![0.0],
            vec![1.0, 1.0],
            vec![CoordinateKind::Scalar, CoordinateKind::Scalar],
        );
        assert_eq!(result, Err(WcsError::dimension_mismatch(2, 1)));
    }

    #[test]
    fn test_dimension_mismatch_on_query() {
        let t = celestial_2d();
        assert_eq!(
            t.pixel_to_world(&[1.0, 2.0, 3.0]),
            Err(WcsError::dimension_mismatch(2, 3))
        );
    }

    #[test]
    fn test_latitude_beyond_pole_is_out_of_bounds() {
        let t = celestial_2d();
        let err = t.pixel_to_world(&[0.0, 10_000.0]).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_non_finite_pixel_is_out_of_bounds() {
        let t = celestial_2d();
        let err = t.pixel_to_world(&[f64::NAN, 0.0]).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_from_header() {
        let mut header = KeywordMap::new();
        header
            .set_int("NAXIS", 3)
            .set_string("CTYPE1", "GLON-CAR")
            .set_string("CTYPE2", "GLAT-CAR")
            .set_string("CTYPE3", "VOPT")
            .set_float("CRPIX1", 1.0)
            .set_float("CRPIX2", 1.0)
            .set_float("CDELT1", -0.5)
            .set_float("CDELT2", 0.5)
            .set_float("CRVAL3", 2500.0)
            .set_float("CDELT3", 10.0);

        let t = LinearTransform::from_header(&header).unwrap();
        assert_eq!(t.dims(), 3);
        assert_eq!(
            t.world_kinds(),
            vec![
                CoordinateKind::longitude(),
                CoordinateKind::Latitude,
                CoordinateKind::Spectral
            ]
        );
        assert_eq!(t.crpix(), &[0.0, 0.0, 0.0]);

        let world = t.pixel_to_world(&[2.0, 2.0, 3.0]).unwrap();
        assert_eq!(world, vec![-1.0, 1.0, 2530.0]);
    }

    #[test]
    fn test_from_header_requires_naxis() {
        let header = KeywordMap::new();
        let err = LinearTransform::from_header(&header).unwrap_err();
        assert_eq!(err, WcsError::missing_keyword("NAXIS"));
    }

    #[test]
    fn test_kind_from_ctype() {
        assert_eq!(kind_from_ctype("RA---TAN"), CoordinateKind::longitude());
        assert_eq!(kind_from_ctype("DEC--TAN"), CoordinateKind::Latitude);
        assert_eq!(kind_from_ctype("FREQ"), CoordinateKind::Spectral);
        assert_eq!(kind_from_ctype("STOKES"), CoordinateKind::Scalar);
        assert_eq!(kind_from_ctype(""), CoordinateKind::Scalar);
    }
}
