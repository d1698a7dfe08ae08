/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Exact-equality hash key for a vertex coordinate triple.
///
/// Bit-level comparison, no quantization: two vertices deduplicate only
/// when all three coordinates match exactly.
#[must_use]
pub fn coord_key(point: &Point3) -> [u64; 3] {
    [point.x.to_bits(), point.y.to_bits(), point.z.to_bits()]
}
