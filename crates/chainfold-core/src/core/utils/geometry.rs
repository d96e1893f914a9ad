use nalgebra::{Matrix3, Point3, Vector3};

/// Signed dihedral angle over four points, in degrees within (-180, 180].
///
/// Uses the standard right-handed convention: looking down the p2->p3 bond,
/// a positive angle means the far bond is rotated clockwise relative to the
/// near bond. Any NaN coordinate or degenerate central bond yields NaN.
pub fn dihedral_angle(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> f64 {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let c1 = b1.cross(&b2);
    let c2 = b2.cross(&b3);

    let b2_norm = b2.norm();
    if b2_norm < 1e-12 {
        return f64::NAN;
    }

    let x = c1.dot(&c2);
    let y = c1.cross(&c2).dot(&b2) / b2_norm;

    let mut degrees = y.atan2(x).to_degrees();
    if degrees <= -180.0 {
        degrees += 360.0;
    }
    degrees
}

/// Least-squares best-fit line through a set of points.
///
/// Returns a point on the line (the centroid) and a unit direction vector.
/// The direction is found by power iteration on the scatter matrix, seeded
/// with the chord between the first and last points so the returned vector
/// points from the start of the set toward its end.
pub fn best_fit_line(points: &[Point3<f64>], iterations: usize) -> Option<(Point3<f64>, Vector3<f64>)> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords)
        / n;

    let chord = points[points.len() - 1].coords - points[0].coords;
    let mut direction = if chord.norm() > 1e-12 {
        chord.normalize()
    } else {
        return None;
    };

    let mut scatter = Matrix3::zeros();
    for p in points {
        let d = p.coords - centroid;
        scatter += d * d.transpose();
    }

    for _ in 0..iterations {
        let next = scatter * direction;
        if next.norm() < 1e-12 {
            break;
        }
        let next = next.normalize();
        // keep the orientation of the seed chord
        direction = if next.dot(&direction) < 0.0 { -next } else { next };
    }

    Some((Point3::from(centroid), direction))
}

/// Projects a point onto the axis through `origin` with unit direction `unit`.
pub fn project_onto_axis(
    point: &Point3<f64>,
    origin: &Point3<f64>,
    unit: &Vector3<f64>,
) -> Point3<f64> {
    origin + unit * (point - origin).dot(unit)
}
