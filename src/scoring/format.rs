use super::Difficulty;

/// Formats a score with `.` as the thousands separator, e.g. `1.234.567`
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(ch);
    }

    formatted
}

pub fn difficulty_emoji(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "🟢",
        Difficulty::Medium => "⚡",
        Difficulty::Hard => "💪",
        Difficulty::Ultra => "🔥",
    }
}
