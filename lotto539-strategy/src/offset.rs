use lotto539_db::models::POOL_SIZE;

/// Shift a base number by an offset on the cyclic 1-39 label space.
/// A sum of exactly 39 stays 39; only sums strictly above 39 wrap
/// around by subtracting 39.
pub fn offset_number(base: u8, offset: u8) -> u8 {
    let sum = base + offset;
    if sum > POOL_SIZE {
        sum - POOL_SIZE
    } else {
        sum
    }
}

/// Derive the two candidate numbers of a strategy from a Monday draw.
/// Ball positions are 1-indexed against the draw order; `ball_a` may
/// equal `ball_b`.
pub fn derived_numbers(
    monday_numbers: &[u8; 5],
    ball_a: u8,
    ball_b: u8,
    offset_a: u8,
    offset_b: u8,
) -> (u8, u8) {
    let base_a = monday_numbers[(ball_a - 1) as usize];
    let base_b = monday_numbers[(ball_b - 1) as usize];
    (offset_number(base_a, offset_a), offset_number(base_b, offset_b))
}
