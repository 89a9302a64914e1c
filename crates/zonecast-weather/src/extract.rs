//! High/low temperature extraction from NWS forecast narratives.
//!
//! Each matcher looks for a keyword ("high", "low", "temperature"), then at
//! least one filler character (whitespace or word characters, shortest run
//! first), then a temperature token: digits with an optional decade `s`, or
//! the word "zero". A token may carry a `to N` range suffix and must end on a
//! word boundary. Matching is case-insensitive and the leftmost keyword wins.

use std::ops::Range;

/// A temperature phrase captured from a narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureMatch {
    /// Captured text before cleanup, e.g. "70s", "zero" or "70 to 75".
    pub raw: String,
    /// Byte range of `raw` within the narrative.
    pub span: Range<usize>,
}

impl TemperatureMatch {
    pub fn cleaned(&self) -> String {
        clean_temperature(&self.raw)
    }

    /// True when both matches captured (part of) the same text.
    pub fn overlaps(&self, other: &TemperatureMatch) -> bool {
        self.span.start < other.span.end && other.span.start < self.span.end
    }
}

/// The three narrative matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    High,
    Low,
    /// Steady temperature, e.g. "Temperature steady around 32".
    Constant,
}

impl Matcher {
    pub fn keyword(self) -> &'static str {
        match self {
            Matcher::High => "high",
            Matcher::Low => "low",
            Matcher::Constant => "temperature",
        }
    }

    pub fn find(self, narrative: &str) -> Option<TemperatureMatch> {
        Scanner::new(narrative).find(self.keyword())
    }
}

/// Derived high/low pair; empty strings when not determinable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Temperatures {
    pub high: String,
    pub low: String,
}

/// Derive the high/low pair for one narrative.
///
/// A steady temperature fills both fields, but only when neither the high nor
/// the low matcher found anything. A low that captured the same text as the
/// high (e.g. "Slow warming with a high near 60") is dropped.
pub fn extract_temperatures(narrative: &str) -> Temperatures {
    let high = Matcher::High.find(narrative);
    let low = Matcher::Low.find(narrative);

    if high.is_none() && low.is_none() {
        return match Matcher::Constant.find(narrative) {
            Some(steady) => {
                let temp = steady.cleaned();
                Temperatures {
                    high: temp.clone(),
                    low: temp,
                }
            }
            None => Temperatures::default(),
        };
    }

    let low = match (&high, low) {
        (Some(h), Some(l)) if h.overlaps(&l) => None,
        (_, l) => l,
    };

    Temperatures {
        high: high.map(|m| m.cleaned()).unwrap_or_default(),
        low: low.map(|m| m.cleaned()).unwrap_or_default(),
    }
}

/// Replace the word "zero" with "0"; everything else is kept verbatim.
pub fn clean_temperature(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(ch) = rest.chars().next() {
        if rest.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("zero")) {
            out.push('0');
            rest = &rest[4..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_filler(c: char) -> bool {
    c.is_whitespace() || is_word(c)
}

/// Backtracking scanner over the narrative's characters.
///
/// Positions are char indices; spans are converted to byte offsets on output.
struct Scanner<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
        }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).map(|&(_, c)| c)
    }

    fn byte_at(&self, pos: usize) -> usize {
        self.chars.get(pos).map_or(self.text.len(), |&(b, _)| b)
    }

    fn find(&self, keyword: &str) -> Option<TemperatureMatch> {
        for start in 0..self.chars.len() {
            let Some(filler_start) = self.literal_at(start, keyword) else {
                continue;
            };
            if let Some(capture) = self.phrase_after(filler_start) {
                let span = self.byte_at(capture.start)..self.byte_at(capture.end);
                return Some(TemperatureMatch {
                    raw: self.text[span.clone()].to_string(),
                    span,
                });
            }
        }
        None
    }

    /// Case-insensitive literal at `pos`; returns the position after it.
    fn literal_at(&self, pos: usize, literal: &str) -> Option<usize> {
        let mut end = pos;
        for expected in literal.chars() {
            let c = self.char_at(end)?;
            if !c.eq_ignore_ascii_case(&expected) {
                return None;
            }
            end += 1;
        }
        Some(end)
    }

    fn run_len(&self, pos: usize, pred: impl Fn(char) -> bool) -> usize {
        self.chars
            .get(pos..)
            .map_or(0, |rest| rest.iter().take_while(|&&(_, c)| pred(c)).count())
    }

    fn is_boundary(&self, pos: usize) -> bool {
        let before = pos
            .checked_sub(1)
            .and_then(|p| self.char_at(p))
            .is_some_and(is_word);
        let after = self.char_at(pos).is_some_and(is_word);
        before != after
    }

    /// Grow the filler one character at a time until a token follows it.
    fn phrase_after(&self, filler_start: usize) -> Option<Range<usize>> {
        let mut token_start = filler_start + 1;
        loop {
            if !is_filler(self.char_at(token_start - 1)?) {
                return None;
            }
            if let Some(end) = self.capture_at(token_start) {
                return Some(token_start..end);
            }
            token_start += 1;
        }
    }

    /// Token, optional suffix, then a word boundary. Returns the capture end.
    fn capture_at(&self, pos: usize) -> Option<usize> {
        let digits = self.run_len(pos, |c| c.is_ascii_digit());
        for n in (1..=digits).rev() {
            let after = pos + n;
            if self.literal_at(after, "s").is_some() {
                if let Some(end) = self.suffix_then_boundary(after + 1) {
                    return Some(end);
                }
            }
            if let Some(end) = self.suffix_then_boundary(after) {
                return Some(end);
            }
        }
        self.literal_at(pos, "zero")
            .and_then(|after| self.suffix_then_boundary(after))
    }

    fn suffix_then_boundary(&self, pos: usize) -> Option<usize> {
        if let Some(end) = self
            .range_suffix_ends(pos)
            .into_iter()
            .find(|&end| self.is_boundary(end))
        {
            return Some(end);
        }
        if let Some(end) = self.literal_at(pos, "zero") {
            if self.is_boundary(end) {
                return Some(end);
            }
        }
        self.is_boundary(pos).then_some(pos)
    }

    /// Possible ends of a " to N" suffix at `pos`, longest first.
    fn range_suffix_ends(&self, pos: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        let lead = self.run_len(pos, char::is_whitespace);
        for l in (1..=lead).rev() {
            let Some(gap_start) = self.literal_at(pos + l, "to") else {
                continue;
            };
            let gap = self.run_len(gap_start, char::is_whitespace);
            for g in (1..=gap).rev() {
                let digits_start = gap_start + g;
                let digits = self.run_len(digits_start, |c| c.is_ascii_digit());
                ends.extend((1..=digits).rev().map(|d| digits_start + d));
            }
        }
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temps(narrative: &str) -> (String, String) {
        let t = extract_temperatures(narrative);
        (t.high, t.low)
    }

    fn pair(high: &str, low: &str) -> (String, String) {
        (high.to_string(), low.to_string())
    }

    #[test]
    fn test_high_and_low_in_one_narrative() {
        assert_eq!(
            temps("Partly sunny. High near 75 and low around 50."),
            pair("75", "50")
        );
    }

    #[test]
    fn test_steady_temperature_fills_both() {
        assert_eq!(
            temps("Cloudy. Temperature steady around 32. Calm wind."),
            pair("32", "32")
        );
    }

    #[test]
    fn test_zero_is_normalized() {
        assert_eq!(temps("Bitterly cold. High near zero."), pair("0", ""));
    }

    #[test]
    fn test_decade_and_separate_low() {
        assert_eq!(
            temps("Sunny. Highs in the 70s. Clear overnight with lows around 50."),
            pair("70s", "50")
        );
    }

    #[test]
    fn test_range_is_kept_verbatim() {
        assert_eq!(
            temps("Mostly sunny. Highs 70 to 75. West wind around 10 mph."),
            pair("70 to 75", "")
        );
    }

    #[test]
    fn test_no_keywords() {
        assert_eq!(temps("Rain likely. Breezy."), pair("", ""));
        assert_eq!(temps(""), pair("", ""));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(temps("HIGH NEAR 80. LOW AROUND 60."), pair("80", "60"));
        assert_eq!(temps("TEMPERATURE STEADY AROUND 40."), pair("40", "40"));
    }

    #[test]
    fn test_low_sharing_the_high_phrase_is_suppressed() {
        // "low" inside "Slow" reaches the same number as the high matcher.
        assert_eq!(
            temps("Slow warming with a high near 60."),
            pair("60", "")
        );
        assert_eq!(temps("Below normal highs near 30."), pair("30", ""));
    }

    #[test]
    fn test_constant_ignored_when_high_or_low_present() {
        assert_eq!(
            temps("Mostly cloudy, with a high near 40. Temperatures falling to around 30 in the afternoon."),
            pair("40", "")
        );
        assert_eq!(
            temps("Clear, with a low around 20. Temperature rising to 25 by morning."),
            pair("", "20")
        );
    }

    #[test]
    fn test_filler_stops_at_punctuation() {
        // The comma ends the filler, so no token follows "high".
        assert_eq!(temps("High pressure, sunny. Around 70 degrees."), pair("", ""));
    }

    #[test]
    fn test_token_must_end_on_word_boundary() {
        // "75F" has no boundary after the digits; the matcher keeps looking.
        assert_eq!(temps("High 75F then high near 72."), pair("72", ""));
    }

    #[test]
    fn test_zero_range_and_below_zero() {
        assert_eq!(temps("Lows zero to 5."), pair("", "0 to 5"));
        assert_eq!(temps("Lows 5 below zero."), pair("", "5"));
    }

    #[test]
    fn test_match_span_points_at_capture() {
        let narrative = "Sunny, with a high near 75.";
        let m = Matcher::High.find(narrative).unwrap();
        assert_eq!(m.raw, "75");
        assert_eq!(&narrative[m.span.clone()], "75");
    }

    #[test]
    fn test_span_is_byte_based_with_multibyte_text() {
        let narrative = "Café weather: high near 75.";
        let m = Matcher::High.find(narrative).unwrap();
        assert_eq!(&narrative[m.span], "75");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let narrative = "Highs in the 70s. Lows around 50. Temperature steady.";
        assert_eq!(extract_temperatures(narrative), extract_temperatures(narrative));
    }

    #[test]
    fn test_clean_temperature() {
        assert_eq!(clean_temperature("zero"), "0");
        assert_eq!(clean_temperature("Zero"), "0");
        assert_eq!(clean_temperature("zero to 5"), "0 to 5");
        assert_eq!(clean_temperature("70s"), "70s");
    }

    #[test]
    fn test_results_come_from_narrative() {
        let narrative = "Snow. High near 28. Low around 15.";
        let t = extract_temperatures(narrative);
        assert!(narrative.contains(&t.high));
        assert!(narrative.contains(&t.low));
    }
}
