//! Prediction card layout.
//!
//! Cards are described as plain data so the reveal timing can be tested
//! without a document. The surface creates each card with its bar at
//! [`CardDescriptor::initial_width`] and grows it to
//! [`CardDescriptor::target_width`] once [`CardDescriptor::reveal_delay`] has
//! elapsed.

use std::time::Duration;

use crate::constants::{BAR_BASE_DELAY, BAR_STRIDE};
use crate::prediction::PredictionRecord;

/// Everything needed to draw one prediction card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDescriptor {
    /// Position in the input sequence
    pub index: usize,
    pub emoji: String,
    pub label: String,
    pub confidence: f64,
    /// Text shown next to the bar, e.g. `97%`
    pub confidence_text: String,
    /// Delay before the bar animates from 0% to its target width
    pub reveal_delay: Duration,
}

impl CardDescriptor {
    /// CSS width the bar is created with.
    pub fn initial_width(&self) -> &'static str {
        "0%"
    }

    /// CSS width the bar animates to.
    pub fn target_width(&self) -> String {
        format!("{}%", format_number(self.confidence))
    }
}

/// Describe the card for the `index`-th prediction.
pub fn render_card(record: &PredictionRecord, index: usize) -> CardDescriptor {
    CardDescriptor {
        index,
        emoji: record.emoji.clone(),
        label: record.label.clone(),
        confidence: record.confidence,
        confidence_text: format!("{}%", format_number(record.confidence)),
        reveal_delay: reveal_delay(index),
    }
}

/// Describe all cards, preserving input order.
pub fn render_cards(predictions: &[PredictionRecord]) -> Vec<CardDescriptor> {
    predictions
        .iter()
        .enumerate()
        .map(|(index, record)| render_card(record, index))
        .collect()
}

/// Staggered reveal: base delay plus one stride per preceding card.
pub fn reveal_delay(index: usize) -> Duration {
    BAR_BASE_DELAY + BAR_STRIDE * index as u32
}

/// Shortest decimal form, so `97.0` prints as `97` and `97.25` as `97.25`.
fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PredictionRecord> {
        vec![
            PredictionRecord::new("Cat", 97.0, "🐱"),
            PredictionRecord::new("Dog", 3.0, "🐶"),
        ]
    }

    #[test]
    fn test_cards_follow_input_order() {
        let cards = render_cards(&sample());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].label, "Cat");
        assert_eq!(cards[0].emoji, "🐱");
        assert_eq!(cards[1].label, "Dog");
        assert_eq!(cards[1].index, 1);
    }

    #[test]
    fn test_reveal_delays_use_fixed_stride() {
        let records: Vec<_> = (0..6)
            .map(|i| PredictionRecord::new(format!("L{i}"), i as f64, "✨"))
            .collect();
        for (i, card) in render_cards(&records).iter().enumerate() {
            assert_eq!(card.reveal_delay, Duration::from_millis(100 + 100 * i as u64));
        }
    }

    #[test]
    fn test_confidence_text() {
        let cards = render_cards(&sample());
        assert_eq!(cards[0].confidence_text, "97%");
        assert_eq!(cards[0].target_width(), "97%");
        assert_eq!(cards[0].initial_width(), "0%");

        let card = render_card(&PredictionRecord::new("Tabby", 42.37, "🐈"), 0);
        assert_eq!(card.confidence_text, "42.37%");
    }

    #[test]
    fn test_content_is_not_validated() {
        let card = render_card(&PredictionRecord::new("<b>x</b>", 250.0, ""), 3);
        assert_eq!(card.label, "<b>x</b>");
        assert_eq!(card.confidence_text, "250%");
        assert_eq!(card.reveal_delay, Duration::from_millis(400));
    }
}
