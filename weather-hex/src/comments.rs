//! Pre-authored remarks shown under each forecast.

use std::sync::Arc;

use rand::Rng;
use weather_types::{Locale, Weather};

/// Uniform index source, injectable for deterministic tests.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always returns the same index, clamped to the list length.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub usize);

impl RandomSource for FixedSource {
    fn pick_index(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Candidate remarks for a classification, in a fixed order.
pub fn candidates(locale: Locale, weather: Weather) -> &'static [&'static str] {
    match (locale, weather) {
        (Locale::Ja, Weather::Sunny) => &[
            "今が両替のチャンスです！",
            "快晴です。ユーロに替えるなら今日がおすすめ。",
            "平均よりお得なレートです。",
        ],
        (Locale::Ja, Weather::Cloudy) => &[
            "いつも通りのレートです。",
            "大きな動きはありません。様子見でも大丈夫。",
            "可もなく不可もなく。急ぎでなければ待ってみても。",
        ],
        (Locale::Ja, Weather::Rainy) => &[
            "今は両替を控えたほうがよさそうです。",
            "平均より割高です。急ぎでなければ待ちましょう。",
            "雨模様。晴れ間を待ちましょう。",
        ],
        (Locale::En, Weather::Sunny) => &[
            "Great time to exchange!",
            "Clear skies: the rate beats the monthly average.",
            "Better than usual. Exchange today if you can.",
        ],
        (Locale::En, Weather::Cloudy) => &[
            "Business as usual.",
            "No big moves. Exchange whenever it suits you.",
            "Close to the average. Waiting costs little.",
        ],
        (Locale::En, Weather::Rainy) => &[
            "Better hold off for now.",
            "Below the monthly average. Wait if you can.",
            "Rainy day for your money. Wait for the sun.",
        ],
    }
}

/// Picks one remark at random per call; carries no state between calls.
#[derive(Clone)]
pub struct CommentSelector {
    random: Arc<dyn RandomSource>,
}

impl CommentSelector {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn pick(&self, locale: Locale, weather: Weather) -> &'static str {
        let list = candidates(locale, weather);
        let index = self.random.pick_index(list.len());
        list[index.min(list.len() - 1)]
    }
}

impl Default for CommentSelector {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Rainy];

    #[test]
    fn test_every_catalogue_is_non_empty() {
        for locale in [Locale::Ja, Locale::En] {
            for weather in ALL {
                assert!(!candidates(locale, weather).is_empty());
            }
        }
    }

    #[test]
    fn test_fixed_source_is_deterministic() {
        let selector = CommentSelector::new(Arc::new(FixedSource(1)));
        for _ in 0..3 {
            assert_eq!(
                selector.pick(Locale::En, Weather::Rainy),
                "Below the monthly average. Wait if you can."
            );
        }
    }

    #[test]
    fn test_fixed_source_clamps() {
        let selector = CommentSelector::new(Arc::new(FixedSource(99)));
        let list = candidates(Locale::Ja, Weather::Sunny);
        assert_eq!(selector.pick(Locale::Ja, Weather::Sunny), list[list.len() - 1]);
    }

    #[test]
    fn test_random_pick_comes_from_catalogue() {
        let selector = CommentSelector::default();
        for weather in ALL {
            for _ in 0..20 {
                let comment = selector.pick(Locale::En, weather);
                assert!(candidates(Locale::En, weather).contains(&comment));
            }
        }
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        for len in 1..10 {
            assert!(ThreadRandom.pick_index(len) < len);
        }
    }
}
