//! Reading-time estimation from raw text.

/// Default reading speed in words per second (~246 words per minute).
pub const DEFAULT_READING_SPEED: f64 = 4.1;

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read `text` at `words_per_second`.
///
/// Non-positive speeds yield 0.0 rather than a nonsense estimate; the
/// configured speed is validated where it is parsed.
pub fn reading_time(text: &str, words_per_second: f64) -> f64 {
    if words_per_second <= 0.0 || !words_per_second.is_finite() {
        return 0.0;
    }
    word_count(text) as f64 / (words_per_second * 60.0)
}
