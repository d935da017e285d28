use super::Rgb;

/// Distance between black and white, the largest possible value.
pub const MAX_DISTANCE: f64 = 441.672_955_930_063_7;

/// Euclidean distance in RGB space.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
}
