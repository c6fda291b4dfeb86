//! Aggregate rating and price tier of a course.
//!
//! The first [`BOOTSTRAP_RATINGS`] star ratings a course receives count as
//! [`BOOTSTRAP_SCORE`] no matter what was submitted, so a handful of early
//! reviews cannot swing a new course. Every later rating contributes its real
//! value.

/// Number of leading ratings replaced by the bootstrap score
pub const BOOTSTRAP_RATINGS: usize = 4;

/// Score counted for each of the leading ratings
pub const BOOTSTRAP_SCORE: f64 = 4.8;

/// Courses rated below this are sold at [`LOW_PRICE`]
pub const PRICE_THRESHOLD: f64 = 3.0;

pub const LOW_PRICE: i32 = 100;
pub const STANDARD_PRICE: i32 = 200;

/// Smallest star value a user may submit
pub const MIN_STARS: i32 = 1;
/// Largest star value a user may submit
pub const MAX_STARS: i32 = 5;

/// Computes the course rating from its star values in submission order
///
/// # Arguments
/// * `stars` - Every star value the course received, oldest first
///
/// # Returns
/// * The weighted mean rounded to one decimal place, or `0.0` without ratings
pub fn course_rating(stars: &[i32]) -> f64 {
    if stars.is_empty() {
        return 0.0;
    }

    let sum: f64 = stars
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            if idx < BOOTSTRAP_RATINGS {
                BOOTSTRAP_SCORE
            } else {
                f64::from(value)
            }
        })
        .sum();

    round_to_tenth(sum / stars.len() as f64)
}

/// Price tier for a rating
pub fn course_price(rating: f64) -> i32 {
    if rating < PRICE_THRESHOLD {
        LOW_PRICE
    } else {
        STANDARD_PRICE
    }
}

/// Whether a submitted star value is within the accepted range
pub fn is_valid_star(value: i32) -> bool {
    (MIN_STARS..=MAX_STARS).contains(&value)
}

/// Rounds the exact binary value, so a mean stored just below 3.15 gives 3.1
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
